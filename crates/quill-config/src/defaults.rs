//! Built-in defaults applied when configuration values are absent.

use crate::logging::LogFormat;

/// Default log filter expression used by the server.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Language identifier attached to hover signature segments.
pub const DEFAULT_SIGNATURE_LANGUAGE: &str = "java";

/// Default log filter expression used by the server.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the server.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned signature language used where allocation is required (e.g. serde).
#[must_use]
pub fn default_signature_language_string() -> String {
    DEFAULT_SIGNATURE_LANGUAGE.to_owned()
}
