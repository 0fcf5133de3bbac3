//! Turns located elements into ordered explanation segments.
//!
//! A rendered explanation is a signature line followed by documentation. The
//! shape of the result is significant to clients: no segments, a single empty
//! documentation segment and a signature on its own each mean something
//! different, so the renderer never collapses one into another.

mod signature;

use std::sync::Arc;

use tracing::debug;

use crate::element::LocatedElement;
use crate::errors::{HoverError, IndexOperation};
use crate::index::{DocumentationSource, ElementIndex};

const RENDER_TARGET: &str = "quill_server::render";

/// One unit of a rendered explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationSegment {
    /// Code-like signature tagged with a language identifier.
    Signature {
        /// Language used for syntax highlighting.
        language: String,
        /// Rendered signature line.
        value: String,
    },
    /// Markdown documentation text.
    Documentation(String),
}

impl ExplanationSegment {
    /// Builds a signature segment.
    #[must_use]
    pub fn signature(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Signature {
            language: language.into(),
            value: value.into(),
        }
    }

    /// Builds a documentation segment.
    #[must_use]
    pub fn documentation(text: impl Into<String>) -> Self {
        Self::Documentation(text.into())
    }
}

/// Renders elements using the index for inheritance and a documentation
/// source for prose.
#[derive(Debug, Clone)]
pub struct Renderer {
    index: Arc<dyn ElementIndex>,
    docs: Arc<dyn DocumentationSource>,
    language: String,
}

impl Renderer {
    /// Creates a renderer that tags signatures with `language`.
    #[must_use]
    pub fn new(
        index: Arc<dyn ElementIndex>,
        docs: Arc<dyn DocumentationSource>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            index,
            docs,
            language: language.into(),
        }
    }

    /// Renders `element` into ordered segments.
    ///
    /// # Errors
    ///
    /// Returns [`HoverError::ElementIndexUnavailable`] when documentation or
    /// supertype lookups fail.
    pub fn render(&self, element: &LocatedElement) -> Result<Vec<ExplanationSegment>, HoverError> {
        let headline = signature::signature(element);
        let segments = match element {
            LocatedElement::None => Vec::new(),
            LocatedElement::Unresolved(reference) => {
                vec![ExplanationSegment::signature(
                    self.language.as_str(),
                    reference.token.as_str(),
                )]
            }
            LocatedElement::Package(_) => {
                let documentation = self.own_documentation(element)?.unwrap_or_default();
                self.compose(headline, Some(documentation))
            }
            LocatedElement::Type(_) | LocatedElement::Variable(_) => {
                let documentation = self.own_documentation(element)?;
                self.compose(headline, documentation)
            }
            LocatedElement::Member(member) => {
                let documentation = match self.own_documentation(element)? {
                    None if member.is_method() => self.inherited_documentation(element)?,
                    own => own,
                };
                self.compose(headline, documentation)
            }
        };

        debug!(
            target: RENDER_TARGET,
            segments = segments.len(),
            "rendered explanation"
        );
        Ok(segments)
    }

    fn compose(
        &self,
        signature: Option<String>,
        documentation: Option<String>,
    ) -> Vec<ExplanationSegment> {
        match (signature, documentation) {
            (Some(value), Some(text)) => vec![
                ExplanationSegment::signature(self.language.as_str(), value),
                ExplanationSegment::Documentation(text),
            ],
            (Some(value), None) => {
                vec![ExplanationSegment::signature(self.language.as_str(), value)]
            }
            (None, Some(text)) => vec![ExplanationSegment::Documentation(text)],
            (None, None) => vec![ExplanationSegment::Documentation(String::new())],
        }
    }

    fn own_documentation(&self, element: &LocatedElement) -> Result<Option<String>, HoverError> {
        self.docs
            .documentation(element)
            .map(|text| text.filter(|body| !body.trim().is_empty()))
            .map_err(|source| HoverError::unavailable(IndexOperation::Documentation, source))
    }

    fn inherited_documentation(
        &self,
        element: &LocatedElement,
    ) -> Result<Option<String>, HoverError> {
        let ancestors = self
            .index
            .supertype_chain(element)
            .map_err(|source| HoverError::unavailable(IndexOperation::SupertypeChain, source))?;

        for ancestor in &ancestors {
            if let Some(text) = self.own_documentation(ancestor)? {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}
