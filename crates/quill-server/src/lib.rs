//! Language server core for hover explanations and dynamic capabilities.
#![deny(missing_docs)]
//!
//! The crate answers hover requests by locating the innermost element under
//! the cursor and rendering a short explanation: a language-tagged signature
//! followed by documentation, inherited from overridden methods when the
//! element carries none of its own. Semantic knowledge stays behind the
//! [`ElementIndex`] and [`DocumentationSource`] traits so editors, tests, and
//! the bundled [`InMemoryIndex`] can all drive the same pipeline.
//!
//! Alongside hover, the [`Server`] keeps the client's dynamically registered
//! capabilities in step with the user's feature toggles. The
//! [`CapabilityRegistry`] tracks what the client currently believes is
//! registered and sends one message per real transition through a
//! [`ClientTransport`]; the [`CapabilityNegotiator`] decides which transitions
//! to request after initialisation and after each configuration change.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use quill_config::ServerConfig;
//! use quill_server::{InMemoryIndex, Server};
//!
//! let uri: lsp_types::Uri = "file:///src/java/Foo.java".parse().expect("valid uri");
//! let index = Arc::new(InMemoryIndex::new().with_document(&uri, "package java;\n"));
//! let server = Server::new(ServerConfig::default(), index.clone(), index);
//!
//! let result = server.hover_at(uri, 0, 3).expect("hover resolves");
//! assert!(result.is_empty());
//! ```

mod capability;
mod element;
mod errors;
mod host;
mod hover;
mod index;
mod locator;
mod memory;
mod negotiator;
mod registry;
mod render;
pub mod telemetry;
mod transport;

pub use capability::{
    CapabilityKind, ClientDeclaredSupport, SIGNATURE_HELP_TRIGGERS, SUPPORTED_COMMANDS,
};
pub use element::{
    DocumentPosition, LocatedElement, MemberElement, MemberKind, MethodRef, PackageElement,
    Parameter, TypeElement, UnresolvedReference, VariableElement,
};
pub use errors::{HoverError, IndexOperation, ServerError};
pub use host::Server;
pub use hover::{HoverResolver, HoverResult};
pub use index::{
    CandidateTarget, DocumentSummary, DocumentationSource, ElementCandidate, ElementIndex,
    ImportReference, ImportSegment, IndexError,
};
pub use locator::Locator;
pub use memory::InMemoryIndex;
pub use negotiator::{CapabilityNegotiator, KindFailure, KindOutcome, NegotiationReport};
pub use registry::{CapabilityRegistry, RegistryError, Transition, TransitionDirection};
pub use render::{ExplanationSegment, Renderer};
pub use transport::{ClientTransport, TransportError};

#[cfg(test)]
mod tests;
