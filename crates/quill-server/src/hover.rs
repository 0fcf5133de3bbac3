//! Position query to rendered explanation.

use std::sync::Arc;

use lsp_types::{Hover, HoverContents, LanguageString, MarkedString};

use crate::element::DocumentPosition;
use crate::errors::HoverError;
use crate::index::{DocumentationSource, ElementIndex};
use crate::locator::Locator;
use crate::render::{ExplanationSegment, Renderer};

/// Ordered explanation returned for a hover query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverResult {
    segments: Vec<ExplanationSegment>,
}

impl HoverResult {
    /// Wraps rendered segments.
    #[must_use]
    pub const fn new(segments: Vec<ExplanationSegment>) -> Self {
        Self { segments }
    }

    /// Rendered segments in order.
    #[must_use]
    pub fn segments(&self) -> &[ExplanationSegment] {
        &self.segments
    }

    /// Whether nothing was found at the position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Consumes the result, yielding its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<ExplanationSegment> {
        self.segments
    }
}

impl From<HoverResult> for Hover {
    fn from(result: HoverResult) -> Self {
        let contents = result
            .into_segments()
            .into_iter()
            .map(|segment| match segment {
                ExplanationSegment::Signature { language, value } => {
                    MarkedString::LanguageString(LanguageString { language, value })
                }
                ExplanationSegment::Documentation(text) => MarkedString::String(text),
            })
            .collect();
        Self {
            contents: HoverContents::Array(contents),
            range: None,
        }
    }
}

/// Locates the element at a position and renders its explanation.
///
/// The resolver holds no mutable state; concurrent queries only share the
/// read-only collaborators.
#[derive(Debug, Clone)]
pub struct HoverResolver {
    locator: Locator,
    renderer: Renderer,
}

impl HoverResolver {
    /// Builds a resolver over the supplied collaborators.
    #[must_use]
    pub fn new(
        index: Arc<dyn ElementIndex>,
        docs: Arc<dyn DocumentationSource>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            locator: Locator::new(Arc::clone(&index)),
            renderer: Renderer::new(index, docs, language),
        }
    }

    /// Resolves `position` into an explanation.
    ///
    /// A position with nothing under it yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HoverError`] when the document is unknown, the position is
    /// out of range, or a collaborator fails.
    pub fn hover(&self, position: &DocumentPosition) -> Result<HoverResult, HoverError> {
        let element = self.locator.locate(position)?;
        let segments = self.renderer.render(&element)?;
        Ok(HoverResult::new(segments))
    }
}
