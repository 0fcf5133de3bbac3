//! Structured logging for the language server.
//!
//! Standard output carries the protocol stream, so events always go to
//! standard error. The first [`initialise`] call wins; its settings stay in
//! force for the life of the process and every later handle reports them.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use quill_config::{LogFormat, LogSettings};
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

static ACTIVE_SETTINGS: OnceCell<LogSettings> = OnceCell::new();

/// Handle describing the subscriber installed for this process.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryHandle {
    active: &'static LogSettings,
}

impl TelemetryHandle {
    /// Settings of the subscriber that is actually installed.
    #[must_use]
    pub const fn active(&self) -> &'static LogSettings {
        self.active
    }

    /// Whether `requested` was ignored in favour of earlier settings.
    #[must_use]
    pub fn overrides(&self, requested: &LogSettings) -> bool {
        self.active != requested
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Directive string that was rejected.
        filter: String,
        /// Parser message.
        message: String,
    },
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global tracing subscriber on first call.
///
/// Later calls leave the global state alone, even when they pass different
/// settings; [`TelemetryHandle::overrides`] tells the caller when that
/// happened.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter and
/// [`TelemetryError::Subscriber`] when a subscriber from elsewhere is already
/// installed.
///
/// # Examples
///
/// ```rust
/// use quill_config::ServerConfig;
/// use quill_server::telemetry;
///
/// # fn main() -> Result<(), quill_server::telemetry::TelemetryError> {
/// let config = ServerConfig::default();
/// let handle = telemetry::initialise(&config.logging)?;
/// assert_eq!(handle.active(), &config.logging);
/// # Ok(())
/// # }
/// ```
pub fn initialise(settings: &LogSettings) -> Result<TelemetryHandle, TelemetryError> {
    let active = ACTIVE_SETTINGS.get_or_try_init(|| {
        let subscriber = build_subscriber(settings)?;
        tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)?;
        Ok::<_, TelemetryError>(settings.clone())
    })?;
    Ok(TelemetryHandle { active })
}

fn build_subscriber(
    settings: &LogSettings,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let filter =
        EnvFilter::try_new(settings.filter.as_str()).map_err(|error| TelemetryError::Filter {
            filter: settings.filter.clone(),
            message: error.to_string(),
        })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match settings.format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
