//! Recognised feature toggles carried by configuration-change payloads.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Feature flag that controls whether a dynamically registered capability
/// should be active.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FeatureToggle {
    /// Reference counts rendered as code lenses.
    ReferencesCodeLens,
    /// Whole-document and range formatting.
    Format,
    /// Signature help while typing call arguments.
    SignatureHelp,
    /// Workspace command execution.
    ExecuteCommand,
}

impl FeatureToggle {
    /// Returns the dotted settings key the client uses for this toggle.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ReferencesCodeLens => "java.referencesCodeLens.enabled",
            Self::Format => "java.format.enabled",
            Self::SignatureHelp => "java.signatureHelp.enabled",
            Self::ExecuteCommand => "java.executeCommand.enabled",
        }
    }

    /// Value assumed before the client has sent any configuration.
    #[must_use]
    pub const fn default_enabled(self) -> bool {
        match self {
            Self::ReferencesCodeLens | Self::Format | Self::ExecuteCommand => true,
            Self::SignatureHelp => false,
        }
    }

    /// Looks a toggle up by its dotted settings key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let trimmed = key.trim();
        Self::iter().find(|toggle| toggle.key() == trimmed)
    }
}
