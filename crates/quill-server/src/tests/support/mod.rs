//! Shared fixtures and helpers for server tests.

mod recording_transport;
mod sample_index;
mod world;

use lsp_types::{
    HoverParams, Position, TextDocumentIdentifier, TextDocumentPositionParams, Uri,
    WorkDoneProgressParams,
};
use mockall::mock;
use serde_json::{Value, json};

use crate::element::LocatedElement;
use crate::index::{DocumentSummary, ElementCandidate, ElementIndex, IndexError};

pub use recording_transport::{RecordingTransport, TransportCall};
pub use sample_index::{bar_uri, e_uri, foo_uri, package_info_uri, sample_index, unknown_uri};
pub use world::TestWorld;

mock! {
    pub Index {}
    impl ElementIndex for Index {
        fn document(&self, uri: &Uri) -> Result<Option<DocumentSummary>, IndexError>;
        fn candidates_at(
            &self,
            uri: &Uri,
            position: Position,
        ) -> Result<Vec<ElementCandidate>, IndexError>;
        fn supertype_chain(
            &self,
            element: &LocatedElement,
        ) -> Result<Vec<LocatedElement>, IndexError>;
    }
}

/// Builds a hover request for `uri` at the given coordinates.
#[must_use]
pub fn hover_params(uri: Uri, line: u32, character: u32) -> HoverParams {
    HoverParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri },
            position: Position::new(line, character),
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
    }
}

/// Configuration payload setting every toggle to `enabled`.
#[must_use]
pub fn all_toggles(enabled: bool) -> Value {
    json!({
        "java": {
            "referencesCodeLens": { "enabled": enabled },
            "format": { "enabled": enabled },
            "signatureHelp": { "enabled": enabled },
            "executeCommand": { "enabled": enabled },
        }
    })
}

/// Methods registered by the configured kinds when every toggle is on.
pub const CONFIGURED_METHODS: [&str; 5] = [
    "textDocument/codeLens",
    "textDocument/formatting",
    "textDocument/rangeFormatting",
    "textDocument/signatureHelp",
    "workspace/executeCommand",
];

/// Methods registered unconditionally after `initialized`.
pub const ALWAYS_ON_METHODS: [&str; 7] = [
    "workspace/symbol",
    "textDocument/documentSymbol",
    "textDocument/codeAction",
    "textDocument/definition",
    "textDocument/hover",
    "textDocument/references",
    "textDocument/documentHighlight",
];
