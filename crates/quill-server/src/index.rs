//! Collaborator seams onto the language model.
//!
//! The hover pipeline never parses source itself. It asks an
//! [`ElementIndex`] which elements enclose a position and a
//! [`DocumentationSource`] for their rendered documentation. Both traits are
//! read-only and must tolerate concurrent callers.

use std::error::Error;
use std::fmt;

use lsp_types::{Position, Range, Uri};
use thiserror::Error;

use crate::element::LocatedElement;

/// Facts about a resolvable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Number of addressable lines.
    pub line_count: u32,
}

impl DocumentSummary {
    /// Builds a summary for a document with `line_count` lines.
    #[must_use]
    pub const fn new(line_count: u32) -> Self {
        Self { line_count }
    }
}

/// One segment of a dotted import name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSegment {
    /// Literal name token.
    pub token: String,
    /// Source range of the token.
    pub range: Range,
    /// Package or type the segment names, when resolvable.
    pub resolved: Option<LocatedElement>,
}

impl ImportSegment {
    /// Builds a segment that resolves to `element`.
    #[must_use]
    pub fn resolved(token: impl Into<String>, range: Range, element: LocatedElement) -> Self {
        Self {
            token: token.into(),
            range,
            resolved: Some(element),
        }
    }

    /// Builds a segment the language model could not resolve.
    #[must_use]
    pub fn unresolved(token: impl Into<String>, range: Range) -> Self {
        Self {
            token: token.into(),
            range,
            resolved: None,
        }
    }
}

/// Dotted name of an import declaration, split into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    /// Segments in source order.
    pub segments: Vec<ImportSegment>,
}

/// What a candidate range refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateTarget {
    /// A single element.
    Element(LocatedElement),
    /// An import declaration resolved segment by segment.
    Import(ImportReference),
}

/// Element whose source range contains a queried position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementCandidate {
    /// Source range of the reference or declaration.
    pub range: Range,
    /// Element or import the range refers to.
    pub target: CandidateTarget,
}

impl ElementCandidate {
    /// Builds a candidate for a single element.
    #[must_use]
    pub const fn element(range: Range, element: LocatedElement) -> Self {
        Self {
            range,
            target: CandidateTarget::Element(element),
        }
    }

    /// Builds a candidate for an import declaration.
    #[must_use]
    pub const fn import(range: Range, import: ImportReference) -> Self {
        Self {
            range,
            target: CandidateTarget::Import(import),
        }
    }
}

/// Errors reported by [`ElementIndex`] and [`DocumentationSource`]
/// implementations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct IndexError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl IndexError {
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

/// Queryable model of the workspace's named elements.
pub trait ElementIndex: Send + Sync {
    /// Resolves a document identity. `Ok(None)` means the document is unknown.
    fn document(&self, uri: &Uri) -> Result<Option<DocumentSummary>, IndexError>;

    /// Lists every candidate whose range contains `position`. The order is
    /// not significant.
    fn candidates_at(&self, uri: &Uri, position: Position)
    -> Result<Vec<ElementCandidate>, IndexError>;

    /// Returns the elements `element` overrides or implements, nearest
    /// ancestor first. Elements without ancestors yield an empty chain.
    fn supertype_chain(&self, element: &LocatedElement)
    -> Result<Vec<LocatedElement>, IndexError>;
}

/// Rendered documentation attached to elements.
pub trait DocumentationSource: Send + Sync {
    /// Returns the element's own documentation, if any.
    fn documentation(&self, element: &LocatedElement) -> Result<Option<String>, IndexError>;
}

impl fmt::Debug for dyn ElementIndex {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ElementIndex")
    }
}

impl fmt::Debug for dyn DocumentationSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("DocumentationSource")
    }
}
