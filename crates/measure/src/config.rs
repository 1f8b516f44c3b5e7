//! Measurement and transport configuration.

use std::time::Duration;

/// Default collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com";

/// Path appended to the endpoint for single hits.
pub const COLLECT_PATH: &str = "/collect";

/// Path appended to the endpoint for batches.
pub const BATCH_PATH: &str = "/batch";

/// Default user agent sent by [`HttpTransport`](crate::HttpTransport).
pub const DEFAULT_USER_AGENT: &str = concat!("measure-rs/", env!("CARGO_PKG_VERSION"));

/// Per-measurement configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) endpoint: String,
}

impl Config {
    /// Create a configuration with the given endpoint base URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Get the endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Shallow merge: fields set in `overrides` replace ours.
    pub fn merge(&self, overrides: ConfigOverrides) -> Config {
        Config {
            endpoint: overrides.endpoint.unwrap_or_else(|| self.endpoint.clone()),
        }
    }

    /// URL for single-hit submission.
    pub fn collect_url(&self) -> String {
        self.url_for(COLLECT_PATH)
    }

    /// URL for batch submission.
    pub fn batch_url(&self) -> String {
        self.url_for(BATCH_PATH)
    }

    /// Check that the endpoint is usable before any request is made.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.endpoint.trim().trim_end_matches('/').is_empty() {
            return Err(crate::Error::Config("endpoint cannot be empty".into()));
        }
        Ok(())
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Partial configuration used by [`Measurement::set_config`](crate::Measurement::set_config).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
}

impl ConfigOverrides {
    /// Override the endpoint base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Settings for the default HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: String,
}

impl TransportConfig {
    /// Get the request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Get the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Builder for [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpTransportBuilder {
    /// Create a new builder. No timeout is applied unless set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration.
    pub(crate) fn build_config(self) -> Result<TransportConfig, crate::Error> {
        if self.timeout == Some(Duration::ZERO) {
            return Err(crate::Error::Config("timeout cannot be zero".into()));
        }
        if self.user_agent.as_deref().is_some_and(str::is_empty) {
            return Err(crate::Error::Config("user_agent cannot be empty".into()));
        }

        Ok(TransportConfig {
            timeout: self.timeout,
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_endpoint() {
        let config = Config::default();

        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(
            config.collect_url(),
            "https://www.google-analytics.com/collect"
        );
        assert_eq!(config.batch_url(), "https://www.google-analytics.com/batch");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("http://localhost:8080/");

        assert_eq!(config.collect_url(), "http://localhost:8080/collect");
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        assert!(Config::default().validate().is_ok());
        assert!(matches!(
            Config::new("").validate(),
            Err(crate::Error::Config(_))
        ));
        assert!(Config::new(" / ").validate().is_err());
    }

    #[test]
    fn test_merge_only_replaces_set_fields() {
        let config = Config::new("https://a.example.com");

        assert_eq!(config.merge(ConfigOverrides::default()), config);
        assert_eq!(
            config
                .merge(ConfigOverrides::default().endpoint("https://b.example.com"))
                .endpoint(),
            "https://b.example.com"
        );
    }

    #[test]
    fn test_transport_builder_defaults() {
        let config = HttpTransportBuilder::new().build_config().unwrap();

        assert_eq!(config.timeout(), None);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_transport_builder_custom_values() {
        let config = HttpTransportBuilder::new()
            .timeout(Duration::from_secs(5))
            .user_agent("my-app/1.0")
            .build_config()
            .unwrap();

        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent(), "my-app/1.0");
    }

    #[test]
    fn test_transport_builder_rejects_zero_timeout() {
        let result = HttpTransportBuilder::new()
            .timeout(Duration::ZERO)
            .build_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_transport_builder_rejects_empty_user_agent() {
        let result = HttpTransportBuilder::new().user_agent("").build_config();
        assert!(result.is_err());
    }
}
