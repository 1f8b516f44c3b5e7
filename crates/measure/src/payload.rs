//! Wire payload encoding.

use crate::keys;
use crate::types::Params;
use url::form_urlencoded;
use uuid::Uuid;

/// Generate a random v4 client ID in canonical 36-character form.
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}

/// Encode params as a form-urlencoded payload.
///
/// `Unset` values are dropped. When neither `cid` nor `uid` is set, a fresh
/// random `cid` is appended.
pub fn build_payload(params: &Params) -> String {
    build_payload_with(params, generate_client_id)
}

/// Like [`build_payload`], with an injected client ID generator.
pub fn build_payload_with<F>(params: &Params, client_id: F) -> String
where
    F: FnOnce() -> String,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in params.iter() {
        if let Some(encoded) = value.encode() {
            serializer.append_pair(key, &encoded);
        }
    }

    if !params.is_set(keys::CLIENT_ID) && !params.is_set(keys::USER_ID) {
        serializer.append_pair(keys::CLIENT_ID, &client_id());
    }

    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamValue;

    fn parse(payload: &str) -> Vec<(String, String)> {
        form_urlencoded::parse(payload.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let params = Params::new()
            .with("v", "1")
            .with("tid", "UA-1")
            .with("t", "pageview")
            .with("dl", "/");

        let payload = build_payload_with(&params, || "fixed".into());

        assert_eq!(payload, "v=1&tid=UA-1&t=pageview&dl=%2F&cid=fixed");
    }

    #[test]
    fn test_unset_values_elided() {
        let params = Params::new()
            .with("ec", "cat")
            .with("el", ParamValue::Unset)
            .with("cid", "abc");

        let payload = build_payload(&params);

        assert_eq!(payload, "ec=cat&cid=abc");
        assert!(!payload.contains("undefined"));
    }

    #[test]
    fn test_generated_cid_is_uuid_v4() {
        let payload = build_payload(&Params::new().with("tid", "UA-1"));
        let pairs = parse(&payload);

        let (key, cid) = pairs.last().unwrap();
        assert_eq!(key, "cid");
        assert_eq!(cid.len(), 36);
        let uuid = Uuid::parse_str(cid).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn test_user_id_suppresses_cid() {
        let payload = build_payload(&Params::new().with("uid", "usr_1"));

        assert_eq!(payload, "uid=usr_1");
    }

    #[test]
    fn test_unset_cid_still_generates() {
        let params = Params::new().with("cid", ParamValue::Unset);

        let payload = build_payload_with(&params, || "gen".into());

        assert_eq!(payload, "cid=gen");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let params = Params::new()
            .with("dt", "Hello World & más")
            .with("cid", "1");

        let payload = build_payload(&params);

        assert_eq!(payload, "dt=Hello+World+%26+m%C3%A1s&cid=1");
        assert_eq!(parse(&payload)[0].1, "Hello World & más");
    }

    #[test]
    fn test_client_ids_are_unique() {
        assert_ne!(generate_client_id(), generate_client_id());
    }
}
