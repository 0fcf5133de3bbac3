//! Outbound client notifications.

use std::error::Error;
use std::fmt;

use lsp_types::{RegistrationParams, UnregistrationParams};
use thiserror::Error;

/// Errors reported when a message could not be handed to the client.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl TransportError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Delivers `client/registerCapability` and `client/unregisterCapability`
/// requests to the connected client.
///
/// A successful return means the message was handed off; the registry records
/// a transition only after that.
pub trait ClientTransport: Send {
    /// Sends a `client/registerCapability` request.
    fn register_capability(&mut self, params: RegistrationParams) -> Result<(), TransportError>;

    /// Sends a `client/unregisterCapability` request.
    fn unregister_capability(&mut self, params: UnregistrationParams)
    -> Result<(), TransportError>;
}

impl fmt::Debug for dyn ClientTransport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ClientTransport")
    }
}
