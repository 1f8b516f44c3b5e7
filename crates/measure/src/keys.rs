//! Measurement Protocol v1 parameter keys.
//!
//! These are the wire names the collection endpoint expects; see
//! <https://developers.google.com/analytics/devguides/collection/protocol/v1/parameters>.

/// Protocol version.
pub const PROTOCOL_VERSION: &str = "v";
/// Tracking ID / web property ID.
pub const TRACKING_ID: &str = "tid";
/// Client ID.
pub const CLIENT_ID: &str = "cid";
/// User ID.
pub const USER_ID: &str = "uid";
/// Hit type.
pub const HIT_TYPE: &str = "t";
/// Cache buster.
pub const CACHE_BUSTER: &str = "z";

/// Document location URL.
pub const DOCUMENT_LOCATION: &str = "dl";
/// Document host name.
pub const DOCUMENT_HOST: &str = "dh";
/// Document path.
pub const DOCUMENT_PATH: &str = "dp";
/// Document title.
pub const DOCUMENT_TITLE: &str = "dt";

/// Event category.
pub const EVENT_CATEGORY: &str = "ec";
/// Event action.
pub const EVENT_ACTION: &str = "ea";
/// Event label.
pub const EVENT_LABEL: &str = "el";
/// Event value.
pub const EVENT_VALUE: &str = "ev";

/// User timing category.
pub const TIMING_CATEGORY: &str = "utc";
/// User timing variable name.
pub const TIMING_VARIABLE: &str = "utv";
/// User timing time, in milliseconds.
pub const TIMING_TIME: &str = "utt";
/// User timing label.
pub const TIMING_LABEL: &str = "utl";

/// Exception description.
pub const EXCEPTION_DESCRIPTION: &str = "exd";
/// Whether the exception was fatal (`"1"`/`"0"`).
pub const EXCEPTION_FATAL: &str = "exf";

/// Key for the custom dimension at 1-based `index`.
pub fn custom_dimension(index: usize) -> String {
    format!("cd{}", index)
}

/// Key for the custom metric at 1-based `index`.
pub fn custom_metric(index: usize) -> String {
    format!("cm{}", index)
}
