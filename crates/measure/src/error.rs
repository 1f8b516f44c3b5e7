//! Error types for the measure crate.

/// Errors that can occur when building or sending measurements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Too many custom dimensions or metrics.
    #[error("There is a maximum of {limit} custom {kind} (20 for standard accounts), got {actual}")]
    LimitExceeded {
        kind: &'static str,
        limit: usize,
        actual: usize,
    },

    /// `batch_send` was called with no measurements.
    #[error("Cannot send an empty batch")]
    EmptyBatch,

    /// Measurements in a batch point at different endpoints.
    #[error("All measurements in a batch must share one endpoint: expected {expected}, found {found}")]
    MixedEndpoints { expected: String, found: String },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom `HttpPost` implementation failed.
    #[error("Transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
