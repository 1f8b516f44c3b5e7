//! Immutable hit builder for the Google Analytics Measurement Protocol v1.
//!
//! # Example
//!
//! ```rust,no_run
//! use measure::{batch_send, measure, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), measure::Error> {
//!     let transport = HttpTransport::new()?;
//!     let base = measure("UA-1234567-12").user_id("usr_123");
//!
//!     base.pageview("https://example.com/docs")
//!         .send(&transport)
//!         .await?;
//!
//!     batch_send(
//!         &transport,
//!         &[
//!             base.event("video", "play", Some("intro"), None),
//!             base.timing("video", "load", 420, None),
//!         ],
//!     )
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod keys;
mod measurement;
mod payload;
mod transport;
pub mod types;

pub use config::{
    Config, ConfigOverrides, HttpTransportBuilder, TransportConfig, DEFAULT_ENDPOINT,
};
pub use error::Error;
pub use measurement::{measure, Measurement, MAX_CUSTOM_DEFINITIONS, PROTOCOL_VERSION};
pub use payload::{build_payload, build_payload_with, generate_client_id};
pub use transport::{batch_send, send, HttpPost, HttpTransport};
pub use types::{HitType, PageTarget, ParamValue, Params};
