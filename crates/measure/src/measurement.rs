//! Immutable measurement builder.

use crate::config::{Config, ConfigOverrides};
use crate::keys;
use crate::payload::build_payload;
use crate::transport::{self, HttpPost};
use crate::types::{HitType, PageTarget, ParamValue, Params};
use crate::Error;
use std::fmt;

/// Maximum number of custom dimensions or metrics accepted per hit.
///
/// Standard accounts are limited to 20 server-side; only the larger
/// ceiling is enforced here.
pub const MAX_CUSTOM_DEFINITIONS: usize = 200;

/// Protocol version written to every hit.
pub const PROTOCOL_VERSION: &str = "1";

/// One analytics hit.
///
/// Every method returns a new `Measurement`; the receiver is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    params: Params,
    config: Config,
}

impl Measurement {
    /// Create a measurement for the given tracking ID.
    pub fn new(tracking_id: impl Into<String>) -> Self {
        Self::with_config(tracking_id, Params::new(), Config::default())
    }

    /// Create a measurement with initial parameters.
    pub fn with_params(tracking_id: impl Into<String>, params: Params) -> Self {
        Self::with_config(tracking_id, params, Config::default())
    }

    /// Create a measurement with initial parameters and configuration.
    pub fn with_config(tracking_id: impl Into<String>, params: Params, config: Config) -> Self {
        let base = Params::new()
            .with(keys::PROTOCOL_VERSION, PROTOCOL_VERSION)
            .with(keys::TRACKING_ID, ParamValue::Text(tracking_id.into()));
        Self {
            params: merge_params(&base, params),
            config,
        }
    }

    /// Get the parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the endpoint base URL.
    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    /// Merge parameters over the current ones.
    pub fn set(&self, overrides: Params) -> Self {
        Self {
            params: merge_params(&self.params, overrides),
            config: self.config.clone(),
        }
    }

    /// Merge configuration over the current one.
    pub fn set_config(&self, overrides: ConfigOverrides) -> Self {
        Self {
            params: self.params.clone(),
            config: self.config.merge(overrides),
        }
    }

    /// Set a single parameter.
    pub fn param(&self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(Params::new().with(key, value))
    }

    /// Set custom dimensions `cd1..cdN` in order.
    pub fn set_custom_dimensions<I, S>(&self, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        check_limit("dimensions", values.len())?;

        Ok(self.set(
            values
                .into_iter()
                .enumerate()
                .map(|(idx, val)| (keys::custom_dimension(idx + 1), ParamValue::from(val)))
                .collect(),
        ))
    }

    /// Set custom metrics `cm1..cmN` in order.
    pub fn set_custom_metrics<I, N>(&self, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = N>,
        N: Into<ParamValue>,
    {
        let values: Vec<ParamValue> = values.into_iter().map(Into::into).collect();
        check_limit("metrics", values.len())?;

        Ok(self.set(
            values
                .into_iter()
                .enumerate()
                .map(|(idx, val)| (keys::custom_metric(idx + 1), val))
                .collect(),
        ))
    }

    /// Pageview hit for a full URL or a host/path pair.
    pub fn pageview(&self, target: impl Into<PageTarget>) -> Self {
        let params = Params::new().with(keys::HIT_TYPE, HitType::Pageview);
        let params = match target.into() {
            PageTarget::Url(url) => params.with(keys::DOCUMENT_LOCATION, url),
            PageTarget::HostPath { host, path } => params
                .with(keys::DOCUMENT_HOST, host)
                .with(keys::DOCUMENT_PATH, path),
        };
        self.set(params)
    }

    /// Event hit.
    ///
    /// Missing `label`/`value` are stored as [`ParamValue::Unset`], which
    /// clears any earlier value and is elided from the payload.
    pub fn event(
        &self,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<&str>,
        value: Option<i64>,
    ) -> Self {
        self.set(
            Params::new()
                .with(keys::HIT_TYPE, HitType::Event)
                .with(keys::EVENT_CATEGORY, ParamValue::Text(category.into()))
                .with(keys::EVENT_ACTION, ParamValue::Text(action.into()))
                .with(keys::EVENT_LABEL, label)
                .with(keys::EVENT_VALUE, value),
        )
    }

    /// User timing hit; `value` is in milliseconds.
    pub fn timing(
        &self,
        category: impl Into<String>,
        name: impl Into<String>,
        value: i64,
        label: Option<&str>,
    ) -> Self {
        self.set(
            Params::new()
                .with(keys::HIT_TYPE, HitType::Timing)
                .with(keys::TIMING_CATEGORY, ParamValue::Text(category.into()))
                .with(keys::TIMING_VARIABLE, ParamValue::Text(name.into()))
                .with(keys::TIMING_TIME, value)
                .with(keys::TIMING_LABEL, label),
        )
    }

    /// Exception hit.
    pub fn exception(&self, description: impl Into<String>, fatal: bool) -> Self {
        self.set(
            Params::new()
                .with(keys::HIT_TYPE, HitType::Exception)
                .with(keys::EXCEPTION_DESCRIPTION, ParamValue::Text(description.into()))
                .with(keys::EXCEPTION_FATAL, fatal),
        )
    }

    /// Fatal exception hit.
    pub fn fatal_exception(&self, description: impl Into<String>) -> Self {
        self.exception(description, true)
    }

    /// Set the hit type (`t`).
    pub fn hit_type(&self, hit_type: HitType) -> Self {
        self.param(keys::HIT_TYPE, hit_type)
    }

    /// Set the client ID (`cid`).
    pub fn client_id(&self, cid: impl Into<String>) -> Self {
        self.param(keys::CLIENT_ID, ParamValue::Text(cid.into()))
    }

    /// Set the user ID (`uid`).
    pub fn user_id(&self, uid: impl Into<String>) -> Self {
        self.param(keys::USER_ID, ParamValue::Text(uid.into()))
    }

    /// Set the document title (`dt`).
    pub fn title(&self, title: impl Into<String>) -> Self {
        self.param(keys::DOCUMENT_TITLE, ParamValue::Text(title.into()))
    }

    /// Set the cache buster (`z`).
    pub fn cache_buster(&self, z: impl Into<String>) -> Self {
        self.param(keys::CACHE_BUSTER, ParamValue::Text(z.into()))
    }

    /// Send this measurement to `{endpoint}/collect`.
    pub async fn send<P: HttpPost + ?Sized>(&self, poster: &P) -> Result<P::Response, Error> {
        transport::send(poster, self).await
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build_payload(&self.params))
    }
}

/// Create a measurement for the given tracking ID.
pub fn measure(tracking_id: impl Into<String>) -> Measurement {
    Measurement::new(tracking_id)
}

// `v` is fixed at construction; overrides never touch it.
fn merge_params(base: &Params, overrides: Params) -> Params {
    base.merge(
        overrides
            .iter()
            .filter(|(key, _)| *key != keys::PROTOCOL_VERSION)
            .map(|(key, value)| (key, value.clone()))
            .collect(),
    )
}

fn check_limit(kind: &'static str, actual: usize) -> Result<(), Error> {
    if actual > MAX_CUSTOM_DEFINITIONS {
        return Err(Error::LimitExceeded {
            kind,
            limit: MAX_CUSTOM_DEFINITIONS,
            actual,
        });
    }
    Ok(())
}
