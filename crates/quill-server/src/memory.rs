//! In-memory element index for tests and embedders without a language model.
//!
//! [`InMemoryIndex`] implements both [`ElementIndex`] and
//! [`DocumentationSource`] from declared facts: documents, candidate ranges,
//! documentation strings and override chains.
//!
//! ```
//! use std::str::FromStr;
//! use std::sync::Arc;
//!
//! use lsp_types::{Position, Range, Uri};
//! use quill_server::{
//!     DocumentPosition, HoverResolver, InMemoryIndex, LocatedElement, TypeElement,
//! };
//!
//! let uri = Uri::from_str("file:///src/java/Foo.java").expect("valid URI");
//! let foo = LocatedElement::Type(TypeElement::new("java.Foo"));
//! let index = Arc::new(
//!     InMemoryIndex::new()
//!         .with_document(&uri, "public class Foo {}\n")
//!         .with_element(&uri, Range::new(Position::new(0, 13), Position::new(0, 16)), foo.clone())
//!         .with_documentation(foo, "This is foo"),
//! );
//!
//! let resolver = HoverResolver::new(index.clone(), index, "java");
//! let result = resolver
//!     .hover(&DocumentPosition::new(uri, 0, 14))
//!     .expect("hover succeeds");
//! assert_eq!(result.segments().len(), 2);
//! ```

use std::collections::HashMap;

use lsp_types::{Position, Range, Uri};

use crate::element::LocatedElement;
use crate::index::{
    DocumentSummary, DocumentationSource, ElementCandidate, ElementIndex, ImportReference,
    IndexError,
};
use crate::locator::contains;

/// Element index backed by declared facts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    documents: HashMap<String, DocumentSummary>,
    candidates: HashMap<String, Vec<ElementCandidate>>,
    documentation: HashMap<LocatedElement, String>,
    supertypes: HashMap<LocatedElement, Vec<LocatedElement>>,
}

impl InMemoryIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a document whose line count is taken from `text`.
    #[must_use]
    pub fn with_document(self, uri: &Uri, text: &str) -> Self {
        let line_count = u32::try_from(text.split('\n').count()).unwrap_or(u32::MAX);
        self.with_line_count(uri, line_count)
    }

    /// Declares a document with an explicit line count.
    #[must_use]
    pub fn with_line_count(mut self, uri: &Uri, line_count: u32) -> Self {
        self.documents
            .insert(uri.as_str().to_owned(), DocumentSummary::new(line_count));
        self
    }

    /// Declares that `range` in `uri` refers to `element`.
    #[must_use]
    pub fn with_element(self, uri: &Uri, range: Range, element: LocatedElement) -> Self {
        self.with_candidate(uri, ElementCandidate::element(range, element))
    }

    /// Declares an import declaration spanning `range` in `uri`.
    #[must_use]
    pub fn with_import(self, uri: &Uri, range: Range, import: ImportReference) -> Self {
        self.with_candidate(uri, ElementCandidate::import(range, import))
    }

    /// Attaches documentation to `element`.
    #[must_use]
    pub fn with_documentation(mut self, element: LocatedElement, text: impl Into<String>) -> Self {
        self.documentation.insert(element, text.into());
        self
    }

    /// Declares the elements `element` overrides, nearest ancestor first.
    #[must_use]
    pub fn with_supertypes(mut self, element: LocatedElement, chain: Vec<LocatedElement>) -> Self {
        self.supertypes.insert(element, chain);
        self
    }

    fn with_candidate(mut self, uri: &Uri, candidate: ElementCandidate) -> Self {
        self.candidates
            .entry(uri.as_str().to_owned())
            .or_default()
            .push(candidate);
        self
    }
}

impl ElementIndex for InMemoryIndex {
    fn document(&self, uri: &Uri) -> Result<Option<DocumentSummary>, IndexError> {
        Ok(self.documents.get(uri.as_str()).copied())
    }

    fn candidates_at(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Result<Vec<ElementCandidate>, IndexError> {
        Ok(self
            .candidates
            .get(uri.as_str())
            .map(|candidates| {
                candidates
                    .iter()
                    .filter(|candidate| contains(&candidate.range, position))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn supertype_chain(
        &self,
        element: &LocatedElement,
    ) -> Result<Vec<LocatedElement>, IndexError> {
        Ok(self.supertypes.get(element).cloned().unwrap_or_default())
    }
}

impl DocumentationSource for InMemoryIndex {
    fn documentation(&self, element: &LocatedElement) -> Result<Option<String>, IndexError> {
        Ok(self.documentation.get(element).cloned())
    }
}
