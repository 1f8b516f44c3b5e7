//! HTTP transport for sending measurements.

use crate::config::{HttpTransportBuilder, TransportConfig};
use crate::measurement::Measurement;
use crate::payload::build_payload;
use crate::Error;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Content type of collection requests.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Capability to POST a body to a URL.
///
/// Implementations decide how the request is made; `send` and `batch_send`
/// only hand over the URL and the encoded body.
#[async_trait]
pub trait HttpPost: Send + Sync {
    /// Raw result of a successful POST.
    type Response: Send;

    /// POST `body` to `url`.
    async fn post(&self, url: &str, body: String) -> Result<Self::Response, Error>;
}

/// reqwest-backed [`HttpPost`].
///
/// Returns the raw response; status codes are left to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Create a new builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub(crate) fn from_config(config: TransportConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }
}

impl HttpTransportBuilder {
    /// Build the HTTP transport.
    pub fn build(self) -> Result<HttpTransport, Error> {
        let config = self.build_config()?;
        HttpTransport::from_config(config)
    }
}

#[async_trait]
impl HttpPost for HttpTransport {
    type Response = reqwest::Response;

    async fn post(&self, url: &str, body: String) -> Result<reqwest::Response, Error> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "collection endpoint returned non-success status");
        }

        Ok(response)
    }
}

/// Send one measurement to `{endpoint}/collect`.
pub async fn send<P: HttpPost + ?Sized>(
    poster: &P,
    measurement: &Measurement,
) -> Result<P::Response, Error> {
    measurement.config().validate()?;
    let url = measurement.config().collect_url();
    let body = build_payload(measurement.params());

    debug!(url = %url, bytes = body.len(), "sending hit");

    poster.post(&url, body).await
}

/// Send several measurements in one request to `{endpoint}/batch`.
///
/// All measurements must share the same endpoint. Nothing is sent if
/// validation fails. Server-side limits on hit count and size are not
/// checked here.
pub async fn batch_send<P: HttpPost + ?Sized>(
    poster: &P,
    measurements: &[Measurement],
) -> Result<P::Response, Error> {
    let first = measurements.first().ok_or(Error::EmptyBatch)?;

    if let Some(other) = measurements
        .iter()
        .find(|m| m.endpoint() != first.endpoint())
    {
        return Err(Error::MixedEndpoints {
            expected: first.endpoint().into(),
            found: other.endpoint().into(),
        });
    }

    first.config().validate()?;

    let url = first.config().batch_url();
    let body = measurements
        .iter()
        .map(|m| build_payload(m.params()))
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        url = %url,
        hit_count = measurements.len(),
        bytes = body.len(),
        "sending batch"
    );

    poster.post(&url, body).await
}
