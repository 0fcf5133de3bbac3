//! Shared configuration for the Quill language server.
//!
//! The crate models everything the server reads from its client: the
//! `initializationOptions` block sent with `initialize` ([`ServerConfig`]) and
//! the feature toggles carried by `workspace/didChangeConfiguration`
//! ([`ConfigurationUpdate`] overlaid on a [`ConfigurationSnapshot`]). Every
//! recognised key has a documented default so a client that sends nothing
//! still yields a complete, validated configuration.

mod defaults;
mod logging;
mod settings;
mod toggle;

use serde::Deserialize;
use serde_json::Value;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SIGNATURE_LANGUAGE, default_log_filter,
    default_log_filter_string, default_log_format, default_signature_language_string,
};
pub use logging::{LogFormat, LogSettings};
pub use settings::{ConfigurationError, ConfigurationSnapshot, ConfigurationUpdate};
pub use toggle::FeatureToggle;

/// Server configuration supplied through `initializationOptions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Tracing subscriber settings.
    pub logging: LogSettings,
    /// Language identifier attached to hover signature segments.
    pub signature_language: String,
    /// Toggle values in force before the first configuration change.
    pub settings: ConfigurationSnapshot,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            logging: LogSettings::default(),
            signature_language: default_signature_language_string(),
            settings: ConfigurationSnapshot::default(),
        }
    }
}

/// Raw `initializationOptions` shape. Toggles stay untyped so they go
/// through the same key parsing as configuration changes.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InitializationOptions {
    logging: LogSettings,
    signature_language: Option<String>,
    settings: Value,
}

impl ServerConfig {
    /// Builds the configuration from optional `initializationOptions`.
    ///
    /// The `settings` member accepts the same `java.*` keys, flat or nested,
    /// as `workspace/didChangeConfiguration`; absent toggles keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InitializationOptions`] when the options
    /// do not match the expected shape, and the [`ConfigurationUpdate`]
    /// errors when `settings` carries a malformed toggle.
    pub fn from_initialization_options(options: Option<Value>) -> Result<Self, ConfigurationError> {
        let raw: InitializationOptions = match options {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(value) => serde_json::from_value(value).map_err(|error| {
                ConfigurationError::InitializationOptions {
                    message: error.to_string(),
                }
            })?,
        };

        Ok(Self {
            logging: raw.logging,
            signature_language: raw
                .signature_language
                .unwrap_or_else(default_signature_language_string),
            settings: ConfigurationSnapshot::from_settings(&raw.settings)?,
        })
    }

    /// Log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.logging.filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.logging.format
    }
}
