//! Capability modelling for dynamic registration.

use std::collections::BTreeMap;
use std::fmt;

use lsp_types::{ClientCapabilities, Registration, Unregistration};
use quill_config::FeatureToggle;
use serde_json::{Value, json};

/// Commands advertised with the `workspace/executeCommand` registration.
pub const SUPPORTED_COMMANDS: &[&str] = &["java.apply.workspaceEdit"];

/// Characters that re-trigger signature help while typing arguments.
pub const SIGNATURE_HELP_TRIGGERS: &[&str] = &["(", ","];

/// LSP feature that can be registered with the client at runtime.
///
/// Variants are listed in declaration order; negotiation always walks kinds
/// in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    /// `textDocument/codeLens`.
    CodeLens,
    /// `textDocument/formatting`.
    Formatting,
    /// `textDocument/rangeFormatting`.
    RangeFormatting,
    /// `textDocument/signatureHelp`.
    SignatureHelp,
    /// `workspace/executeCommand`.
    ExecuteCommand,
    /// `workspace/symbol`.
    WorkspaceSymbol,
    /// `textDocument/documentSymbol`.
    DocumentSymbol,
    /// `textDocument/codeAction`.
    CodeAction,
    /// `textDocument/definition`.
    Definition,
    /// `textDocument/hover`.
    Hover,
    /// `textDocument/references`.
    References,
    /// `textDocument/documentHighlight`.
    DocumentHighlight,
}

impl CapabilityKind {
    /// Every kind in declaration order.
    pub const ALL: [Self; 12] = [
        Self::CodeLens,
        Self::Formatting,
        Self::RangeFormatting,
        Self::SignatureHelp,
        Self::ExecuteCommand,
        Self::WorkspaceSymbol,
        Self::DocumentSymbol,
        Self::CodeAction,
        Self::Definition,
        Self::Hover,
        Self::References,
        Self::DocumentHighlight,
    ];

    /// LSP method the registration covers.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::CodeLens => "textDocument/codeLens",
            Self::Formatting => "textDocument/formatting",
            Self::RangeFormatting => "textDocument/rangeFormatting",
            Self::SignatureHelp => "textDocument/signatureHelp",
            Self::ExecuteCommand => "workspace/executeCommand",
            Self::WorkspaceSymbol => "workspace/symbol",
            Self::DocumentSymbol => "textDocument/documentSymbol",
            Self::CodeAction => "textDocument/codeAction",
            Self::Definition => "textDocument/definition",
            Self::Hover => "textDocument/hover",
            Self::References => "textDocument/references",
            Self::DocumentHighlight => "textDocument/documentHighlight",
        }
    }

    /// Stable identifier used to register and later unregister the kind.
    #[must_use]
    pub const fn registration_id(self) -> &'static str {
        match self {
            Self::CodeLens => "quill.codeLens",
            Self::Formatting => "quill.formatting",
            Self::RangeFormatting => "quill.rangeFormatting",
            Self::SignatureHelp => "quill.signatureHelp",
            Self::ExecuteCommand => "quill.executeCommand",
            Self::WorkspaceSymbol => "quill.workspaceSymbol",
            Self::DocumentSymbol => "quill.documentSymbol",
            Self::CodeAction => "quill.codeAction",
            Self::Definition => "quill.definition",
            Self::Hover => "quill.hover",
            Self::References => "quill.references",
            Self::DocumentHighlight => "quill.documentHighlight",
        }
    }

    /// Toggle that drives the kind, or `None` for always-on kinds.
    #[must_use]
    pub const fn toggle(self) -> Option<FeatureToggle> {
        match self {
            Self::CodeLens => Some(FeatureToggle::ReferencesCodeLens),
            Self::Formatting | Self::RangeFormatting => Some(FeatureToggle::Format),
            Self::SignatureHelp => Some(FeatureToggle::SignatureHelp),
            Self::ExecuteCommand => Some(FeatureToggle::ExecuteCommand),
            Self::WorkspaceSymbol
            | Self::DocumentSymbol
            | Self::CodeAction
            | Self::Definition
            | Self::Hover
            | Self::References
            | Self::DocumentHighlight => None,
        }
    }

    /// Options attached to the registration, if the method takes any.
    #[must_use]
    pub fn registration_options(self, language: &str) -> Option<Value> {
        match self {
            Self::CodeLens => Some(json!({ "resolveProvider": true })),
            Self::Formatting | Self::RangeFormatting => Some(json!({
                "documentSelector": [{ "language": language }],
            })),
            Self::SignatureHelp => Some(json!({ "triggerCharacters": SIGNATURE_HELP_TRIGGERS })),
            Self::ExecuteCommand => Some(json!({ "commands": SUPPORTED_COMMANDS })),
            Self::WorkspaceSymbol
            | Self::DocumentSymbol
            | Self::CodeAction
            | Self::Definition
            | Self::Hover
            | Self::References
            | Self::DocumentHighlight => None,
        }
    }

    /// Registration message for this kind.
    #[must_use]
    pub fn registration(self, language: &str) -> Registration {
        Registration {
            id: self.registration_id().to_owned(),
            method: self.method().to_owned(),
            register_options: self.registration_options(language),
        }
    }

    /// Unregistration message for this kind.
    #[must_use]
    pub fn unregistration(self) -> Unregistration {
        Unregistration {
            id: self.registration_id().to_owned(),
            method: self.method().to_owned(),
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.method())
    }
}

/// Per-kind dynamic-registration support declared by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDeclaredSupport {
    kinds: BTreeMap<CapabilityKind, bool>,
}

impl ClientDeclaredSupport {
    /// Support with every kind set to `supported`.
    #[must_use]
    pub fn all(supported: bool) -> Self {
        Self {
            kinds: CapabilityKind::ALL
                .into_iter()
                .map(|kind| (kind, supported))
                .collect(),
        }
    }

    /// Returns the support with `kind` set to `supported`.
    #[must_use]
    pub fn with(mut self, kind: CapabilityKind, supported: bool) -> Self {
        self.kinds.insert(kind, supported);
        self
    }

    /// Whether the client accepts dynamic registration for `kind`.
    #[must_use]
    pub fn supports(&self, kind: CapabilityKind) -> bool {
        self.kinds.get(&kind).copied().unwrap_or(false)
    }

    /// Whether the client accepts dynamic registration for any kind.
    #[must_use]
    pub fn any(&self) -> bool {
        self.kinds.values().any(|supported| *supported)
    }

    /// Reads `dynamicRegistration` flags from the client's capabilities.
    #[must_use]
    pub fn from_client_capabilities(capabilities: &ClientCapabilities) -> Self {
        let text = capabilities.text_document.as_ref();
        let workspace = capabilities.workspace.as_ref();
        let flag = |declared: Option<Option<bool>>| declared.flatten().unwrap_or(false);

        let mut support = Self::all(false);
        for kind in CapabilityKind::ALL {
            let declared = match kind {
                CapabilityKind::CodeLens => {
                    text.and_then(|t| t.code_lens.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::Formatting => {
                    text.and_then(|t| t.formatting.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::RangeFormatting => text
                    .and_then(|t| t.range_formatting.as_ref())
                    .map(|c| c.dynamic_registration),
                CapabilityKind::SignatureHelp => text
                    .and_then(|t| t.signature_help.as_ref())
                    .map(|c| c.dynamic_registration),
                CapabilityKind::ExecuteCommand => workspace
                    .and_then(|w| w.execute_command.as_ref())
                    .map(|c| c.dynamic_registration),
                CapabilityKind::WorkspaceSymbol => {
                    workspace.and_then(|w| w.symbol.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::DocumentSymbol => text
                    .and_then(|t| t.document_symbol.as_ref())
                    .map(|c| c.dynamic_registration),
                CapabilityKind::CodeAction => {
                    text.and_then(|t| t.code_action.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::Definition => {
                    text.and_then(|t| t.definition.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::Hover => {
                    text.and_then(|t| t.hover.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::References => {
                    text.and_then(|t| t.references.as_ref()).map(|c| c.dynamic_registration)
                }
                CapabilityKind::DocumentHighlight => text
                    .and_then(|t| t.document_highlight.as_ref())
                    .map(|c| c.dynamic_registration),
            };
            support.kinds.insert(kind, flag(declared));
        }
        support
    }
}

#[cfg(test)]
mod tests {
    use lsp_types::{
        DynamicRegistrationClientCapabilities, SignatureHelpClientCapabilities,
        TextDocumentClientCapabilities, WorkspaceClientCapabilities,
    };
    use rstest::rstest;

    use super::*;

    fn dynamic(enabled: bool) -> DynamicRegistrationClientCapabilities {
        DynamicRegistrationClientCapabilities {
            dynamic_registration: Some(enabled),
        }
    }

    #[rstest]
    fn declaration_order_matches_all() {
        let mut sorted = CapabilityKind::ALL;
        sorted.sort();
        assert_eq!(sorted, CapabilityKind::ALL);
    }

    #[rstest]
    fn format_toggle_drives_both_formatting_kinds() {
        let driven: Vec<_> = CapabilityKind::ALL
            .into_iter()
            .filter(|kind| kind.toggle() == Some(FeatureToggle::Format))
            .collect();
        assert_eq!(driven, vec![
            CapabilityKind::Formatting,
            CapabilityKind::RangeFormatting
        ]);
    }

    #[rstest]
    #[case(CapabilityKind::Formatting, json!({ "documentSelector": [{ "language": "java" }] }))]
    #[case(CapabilityKind::SignatureHelp, json!({ "triggerCharacters": ["(", ","] }))]
    #[case(CapabilityKind::ExecuteCommand, json!({ "commands": ["java.apply.workspaceEdit"] }))]
    #[case(CapabilityKind::CodeLens, json!({ "resolveProvider": true }))]
    fn registration_carries_kind_options(#[case] kind: CapabilityKind, #[case] expected: Value) {
        let registration = kind.registration("java");
        assert_eq!(registration.method, kind.method());
        assert_eq!(registration.id, kind.registration_id());
        assert_eq!(registration.register_options, Some(expected));
    }

    #[rstest]
    fn always_on_kinds_register_without_options() {
        assert_eq!(CapabilityKind::Hover.registration("java").register_options, None);
    }

    #[rstest]
    fn empty_client_capabilities_support_nothing() {
        let support = ClientDeclaredSupport::from_client_capabilities(&ClientCapabilities::default());
        assert!(!support.any());
    }

    #[rstest]
    fn reads_dynamic_registration_flags() {
        let capabilities = ClientCapabilities {
            text_document: Some(TextDocumentClientCapabilities {
                formatting: Some(dynamic(true)),
                range_formatting: Some(dynamic(false)),
                signature_help: Some(SignatureHelpClientCapabilities {
                    dynamic_registration: Some(true),
                    ..SignatureHelpClientCapabilities::default()
                }),
                ..TextDocumentClientCapabilities::default()
            }),
            workspace: Some(WorkspaceClientCapabilities {
                execute_command: Some(dynamic(true)),
                ..WorkspaceClientCapabilities::default()
            }),
            ..ClientCapabilities::default()
        };

        let support = ClientDeclaredSupport::from_client_capabilities(&capabilities);

        assert!(support.supports(CapabilityKind::Formatting));
        assert!(!support.supports(CapabilityKind::RangeFormatting));
        assert!(support.supports(CapabilityKind::SignatureHelp));
        assert!(support.supports(CapabilityKind::ExecuteCommand));
        assert!(!support.supports(CapabilityKind::CodeLens));
    }
}
