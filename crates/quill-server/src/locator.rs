//! Maps a document position to the most specific element under it.

use std::sync::Arc;

use lsp_types::{Position, Range};
use tracing::debug;

use crate::element::{
    DocumentPosition, IMPORT_SPECIFICITY, LocatedElement, UnresolvedReference,
};
use crate::errors::{HoverError, IndexOperation};
use crate::index::{CandidateTarget, ElementCandidate, ElementIndex, ImportReference};

const LOCATOR_TARGET: &str = "quill_server::locator";

/// Resolves positions against an [`ElementIndex`].
#[derive(Debug, Clone)]
pub struct Locator {
    index: Arc<dyn ElementIndex>,
}

impl Locator {
    /// Creates a locator backed by `index`.
    #[must_use]
    pub const fn new(index: Arc<dyn ElementIndex>) -> Self {
        Self { index }
    }

    /// Finds the innermost, most specific element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`HoverError::DocumentNotFound`] for unknown documents,
    /// [`HoverError::InvalidPosition`] when the line lies beyond the document,
    /// and [`HoverError::ElementIndexUnavailable`] when the index fails.
    pub fn locate(&self, position: &DocumentPosition) -> Result<LocatedElement, HoverError> {
        let uri = position.uri();
        let summary = self
            .index
            .document(uri)
            .map_err(|source| HoverError::unavailable(IndexOperation::Document, source))?
            .ok_or_else(|| HoverError::document_not_found(uri))?;

        if position.line() >= summary.line_count {
            return Err(HoverError::invalid_position(
                uri,
                i64::from(position.line()),
                i64::from(position.character()),
            ));
        }

        let query = position.position();
        let candidates = self
            .index
            .candidates_at(uri, query)
            .map_err(|source| HoverError::unavailable(IndexOperation::Candidates, source))?;

        let located = select_innermost(candidates).map_or(LocatedElement::None, |candidate| {
            resolve_candidate(candidate.target, query)
        });

        debug!(
            target: LOCATOR_TARGET,
            uri = uri.as_str(),
            line = position.line(),
            character = position.character(),
            element = ?located,
            "located element"
        );
        Ok(located)
    }
}

/// Whether `range` contains `position`, start inclusive and end exclusive.
pub(crate) fn contains(range: &Range, position: Position) -> bool {
    let at = (position.line, position.character);
    (range.start.line, range.start.character) <= at && at < (range.end.line, range.end.character)
}

fn select_innermost(candidates: Vec<ElementCandidate>) -> Option<ElementCandidate> {
    candidates
        .into_iter()
        .min_by_key(|candidate| (extent(&candidate.range), category_rank(&candidate.target)))
}

fn extent(range: &Range) -> (u32, i64) {
    let lines = range.end.line.saturating_sub(range.start.line);
    let characters = i64::from(range.end.character) - i64::from(range.start.character);
    (lines, characters)
}

fn category_rank(target: &CandidateTarget) -> u8 {
    match target {
        CandidateTarget::Element(element) => element.specificity(),
        CandidateTarget::Import(_) => IMPORT_SPECIFICITY,
    }
}

fn resolve_candidate(target: CandidateTarget, position: Position) -> LocatedElement {
    match target {
        CandidateTarget::Element(element) => element,
        CandidateTarget::Import(import) => resolve_import_segment(import, position),
    }
}

fn resolve_import_segment(import: ImportReference, position: Position) -> LocatedElement {
    let Some(segment) = import
        .segments
        .into_iter()
        .find(|segment| contains(&segment.range, position))
    else {
        return LocatedElement::None;
    };

    segment
        .resolved
        .unwrap_or_else(|| LocatedElement::Unresolved(UnresolvedReference::new(segment.token)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::element::TypeElement;

    fn range(start: (u32, u32), end: (u32, u32)) -> Range {
        Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
    }

    #[rstest]
    #[case(Position::new(3, 4), true)]
    #[case(Position::new(3, 9), false)]
    #[case(Position::new(3, 3), false)]
    #[case(Position::new(4, 0), false)]
    fn containment_is_start_inclusive_end_exclusive(
        #[case] position: Position,
        #[case] expected: bool,
    ) {
        assert_eq!(contains(&range((3, 4), (3, 9)), position), expected);
    }

    #[rstest]
    fn multi_line_ranges_contain_interior_lines() {
        assert!(contains(&range((1, 10), (6, 1)), Position::new(4, 80)));
    }

    #[rstest]
    fn narrower_single_line_range_wins_over_block() {
        let block = ElementCandidate::element(
            range((0, 0), (12, 1)),
            LocatedElement::Type(TypeElement::new("java.Foo")),
        );
        let name = ElementCandidate::element(
            range((2, 13), (2, 16)),
            LocatedElement::Type(TypeElement::new("java.Bar")),
        );

        let chosen = select_innermost(vec![block, name.clone()]);
        assert_eq!(chosen, Some(name));
    }
}
