//! Parameter values and the ordered parameter map.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Hit type values (`t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitType {
    Pageview,
    Screenview,
    Transaction,
    Event,
    Item,
    Social,
    Exception,
    Timing,
}

impl HitType {
    /// Wire value of the hit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            HitType::Pageview => "pageview",
            HitType::Screenview => "screenview",
            HitType::Transaction => "transaction",
            HitType::Event => "event",
            HitType::Item => "item",
            HitType::Social => "social",
            HitType::Exception => "exception",
            HitType::Timing => "timing",
        }
    }
}

impl fmt::Display for HitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page a pageview hit refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// Full document location (`dl`).
    Url(String),
    /// Document host (`dh`) and path (`dp`).
    HostPath { host: String, path: String },
}

impl PageTarget {
    /// Create a host/path target.
    pub fn host_path(host: impl Into<String>, path: impl Into<String>) -> Self {
        PageTarget::HostPath {
            host: host.into(),
            path: path.into(),
        }
    }
}

impl From<&str> for PageTarget {
    fn from(url: &str) -> Self {
        PageTarget::Url(url.into())
    }
}

impl From<String> for PageTarget {
    fn from(url: String) -> Self {
        PageTarget::Url(url)
    }
}

impl<H: Into<String>, P: Into<String>> From<(H, P)> for PageTarget {
    fn from((host, path): (H, P)) -> Self {
        PageTarget::host_path(host, path)
    }
}

/// A single protocol parameter value.
///
/// Boolean fields are carried as `Text("1")` / `Text("0")`, the protocol's
/// wire encoding. `Unset` keeps a key in the map but elides it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Unset,
}

impl ParamValue {
    /// Whether this value is elided during serialization.
    pub fn is_unset(&self) -> bool {
        matches!(self, ParamValue::Unset)
    }

    /// Wire encoding of the value, or `None` for `Unset`.
    pub fn encode(&self) -> Option<String> {
        match self {
            ParamValue::Text(s) => Some(s.clone()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::Float(f) => Some(format_float(*f)),
            ParamValue::Unset => None,
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    // NaN fails the fract check and falls through to "NaN".
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return (f as i64).to_string();
    }
    f.to_string()
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.into())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Text(s.clone())
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(n.into())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<f32> for ParamValue {
    fn from(f: f32) -> Self {
        ParamValue::Float(f.into())
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Text(if b { "1" } else { "0" }.into())
    }
}

impl From<HitType> for ParamValue {
    fn from(t: HitType) -> Self {
        ParamValue::Text(t.as_str().into())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ParamValue::Unset)
    }
}

/// Insertion-ordered map of protocol keys to values.
///
/// Replacing an existing key keeps its original position. `Unset` entries
/// are real entries: they count towards [`len`](Params::len), satisfy
/// [`contains_key`](Params::contains_key) and take part in equality, even
/// though they never reach the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, returning the updated map.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present and not `Unset`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_unset())
    }

    /// Whether the key is present at all, including as `Unset`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries, including `Unset` ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow union of `self` and `overrides`; `overrides` wins per key.
    pub fn merge(&self, overrides: Params) -> Params {
        let mut merged = self.clone();
        for (key, value) in overrides.entries {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for Params {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::from([("a", "1"), ("b", "2")]);
        params.insert("a", "3");

        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::from("3")));
    }

    #[test]
    fn test_merge_right_hand_side_wins() {
        let base = Params::new().with("t", "pageview").with("dp", "/");
        let merged = base.merge(Params::new().with("t", "event").with("ec", "cat"));

        assert_eq!(merged.get("t"), Some(&ParamValue::from("event")));
        assert_eq!(merged.len(), 3);
        // receiver is untouched
        assert_eq!(base.get("t"), Some(&ParamValue::from("pageview")));
    }

    #[test]
    fn test_unset_is_present_but_not_set() {
        let params = Params::new().with("el", None::<String>);

        assert!(params.contains_key("el"));
        assert!(!params.is_set("el"));
        assert_eq!(params.len(), 1);
        assert_ne!(params, Params::new());
    }

    #[test]
    fn test_number_encoding() {
        assert_eq!(ParamValue::from(10).encode().unwrap(), "10");
        assert_eq!(ParamValue::from(10.0).encode().unwrap(), "10");
        assert_eq!(ParamValue::from(1.5).encode().unwrap(), "1.5");
        assert_eq!(ParamValue::from(-3_i64).encode().unwrap(), "-3");
        assert_eq!(ParamValue::from(f64::INFINITY).encode().unwrap(), "Infinity");
        assert_eq!(ParamValue::Unset.encode(), None);
        assert_eq!(ParamValue::from(f64::NAN).encode().unwrap(), "NaN");
        assert_eq!(ParamValue::from(1e21).encode().unwrap(), "1000000000000000000000");
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(ParamValue::from(true), ParamValue::Text("1".into()));
        assert_eq!(ParamValue::from(false), ParamValue::Text("0".into()));
    }

    #[test]
    fn test_hit_type_wire_values() {
        assert_eq!(HitType::Pageview.as_str(), "pageview");
        assert_eq!(HitType::Screenview.to_string(), "screenview");
        assert_eq!(serde_json::to_value(HitType::Timing).unwrap(), "timing");
    }

    #[test]
    fn test_params_serialize_as_map() {
        let params = Params::new()
            .with("t", HitType::Event)
            .with("ev", 10)
            .with("el", None::<&str>);

        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json, json!({ "t": "event", "ev": 10, "el": null }));
    }

    #[test]
    fn test_page_target_conversions() {
        assert_eq!(PageTarget::from("/docs"), PageTarget::Url("/docs".into()));
        assert_eq!(
            PageTarget::from(("yo.com", "/docs")),
            PageTarget::HostPath {
                host: "yo.com".into(),
                path: "/docs".into()
            }
        );
    }
}
