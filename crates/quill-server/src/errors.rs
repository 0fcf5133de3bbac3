//! Error types surfaced by the hover pipeline and the server facade.

use std::fmt;

use quill_config::ConfigurationError;
use thiserror::Error;

use crate::index::IndexError;

/// Collaborator call being executed when the element index failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOperation {
    /// Resolving the document identity.
    Document,
    /// Listing candidate elements at a position.
    Candidates,
    /// Walking the supertype chain of an element.
    SupertypeChain,
    /// Fetching rendered documentation.
    Documentation,
}

impl fmt::Display for IndexOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Document => "document lookup",
            Self::Candidates => "candidate lookup",
            Self::SupertypeChain => "supertype resolution",
            Self::Documentation => "documentation lookup",
        };
        formatter.write_str(label)
    }
}

/// Errors returned by [`crate::HoverResolver`].
///
/// A position that simply has nothing under it is not an error; it yields an
/// empty [`crate::HoverResult`].
#[derive(Debug, Error)]
pub enum HoverError {
    /// The document identity could not be resolved to content.
    #[error("document '{uri}' could not be resolved")]
    DocumentNotFound {
        /// Requested document URI.
        uri: String,
    },

    /// The line or character cannot address the document.
    #[error("position {line}:{character} is invalid for '{uri}'")]
    InvalidPosition {
        /// Requested document URI.
        uri: String,
        /// Requested zero-based line.
        line: i64,
        /// Requested zero-based character.
        character: i64,
    },

    /// The element index or documentation source failed.
    #[error("element index unavailable during {operation}: {source}")]
    ElementIndexUnavailable {
        /// Collaborator call that failed.
        operation: IndexOperation,
        /// Underlying failure.
        #[source]
        source: IndexError,
    },
}

impl HoverError {
    pub(crate) fn document_not_found(uri: &lsp_types::Uri) -> Self {
        Self::DocumentNotFound {
            uri: uri.as_str().to_owned(),
        }
    }

    pub(crate) fn invalid_position(uri: &lsp_types::Uri, line: i64, character: i64) -> Self {
        Self::InvalidPosition {
            uri: uri.as_str().to_owned(),
            line,
            character,
        }
    }

    pub(crate) const fn unavailable(operation: IndexOperation, source: IndexError) -> Self {
        Self::ElementIndexUnavailable { operation, source }
    }
}

/// Errors returned by [`crate::Server`].
#[derive(Debug, Error)]
pub enum ServerError {
    /// Hover resolution failed.
    #[error(transparent)]
    Hover(#[from] HoverError),

    /// A configuration payload was rejected.
    #[error("configuration rejected: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The operation needs a connected client.
    #[error("no client is connected")]
    ClientNotConnected,
}
