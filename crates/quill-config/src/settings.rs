//! Validated configuration snapshots and partial updates.
//!
//! Clients send `workspace/didChangeConfiguration` payloads as loosely typed
//! JSON. [`ConfigurationUpdate::from_settings`] extracts the recognised
//! [`FeatureToggle`] values from either flat dotted keys
//! (`{"java.format.enabled": true}`) or nested objects
//! (`{"java": {"format": {"enabled": true}}}`). Keys that are absent, or set to
//! `null`, leave the corresponding toggle untouched when the update is applied
//! to a [`ConfigurationSnapshot`]. The two forms may also be mixed at any
//! segment boundary, as in `{"java.format": {"enabled": true}}`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::toggle::FeatureToggle;

/// Errors raised while validating configuration payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A recognised key carried a value that is not a boolean.
    #[error("setting '{key}' must be a boolean, found {found}")]
    InvalidValue {
        /// Dotted settings key.
        key: &'static str,
        /// JSON type that was supplied instead.
        found: &'static str,
    },
    /// The payload itself was not a JSON object.
    #[error("configuration payload must be a JSON object, found {found}")]
    UnexpectedShape {
        /// JSON type that was supplied instead.
        found: &'static str,
    },
    /// `initializationOptions` could not be deserialised.
    #[error("invalid initialisation options: {message}")]
    InitializationOptions {
        /// Deserialiser message.
        message: String,
    },
}

/// Partial configuration carrying only the toggles a payload mentioned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationUpdate {
    values: BTreeMap<FeatureToggle, bool>,
}

impl ConfigurationUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the update with `toggle` set to `enabled`.
    #[must_use]
    pub fn with(mut self, toggle: FeatureToggle, enabled: bool) -> Self {
        self.set(toggle, enabled);
        self
    }

    /// Records a value for `toggle`.
    pub fn set(&mut self, toggle: FeatureToggle, enabled: bool) {
        self.values.insert(toggle, enabled);
    }

    /// Returns the requested value for `toggle`, when the payload carried one.
    #[must_use]
    pub fn get(&self, toggle: FeatureToggle) -> Option<bool> {
        self.values.get(&toggle).copied()
    }

    /// Whether the payload mentioned no recognised toggle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the toggles present in the update in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureToggle, bool)> + '_ {
        self.values.iter().map(|(toggle, enabled)| (*toggle, *enabled))
    }

    /// Extracts recognised toggles from a configuration-change payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnexpectedShape`] when `settings` is
    /// neither an object nor `null`, and [`ConfigurationError::InvalidValue`]
    /// when a recognised key holds a non-boolean value.
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigurationError> {
        let object = match settings {
            Value::Null => return Ok(Self::new()),
            Value::Object(object) => object,
            other => {
                return Err(ConfigurationError::UnexpectedShape {
                    found: json_type(other),
                });
            }
        };

        let mut update = Self::new();
        for toggle in FeatureToggle::iter() {
            match lookup(object, toggle.key()) {
                None | Some(Value::Null) => {}
                Some(Value::Bool(enabled)) => update.set(toggle, *enabled),
                Some(other) => {
                    return Err(ConfigurationError::InvalidValue {
                        key: toggle.key(),
                        found: json_type(other),
                    });
                }
            }
        }
        Ok(update)
    }
}

/// Complete, validated value of every recognised toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationSnapshot {
    /// Whether reference code lenses are enabled.
    pub references_code_lens_enabled: bool,
    /// Whether formatting is enabled.
    pub format_enabled: bool,
    /// Whether signature help is enabled.
    pub signature_help_enabled: bool,
    /// Whether command execution is enabled.
    pub execute_command_enabled: bool,
}

impl Default for ConfigurationSnapshot {
    fn default() -> Self {
        Self {
            references_code_lens_enabled: FeatureToggle::ReferencesCodeLens.default_enabled(),
            format_enabled: FeatureToggle::Format.default_enabled(),
            signature_help_enabled: FeatureToggle::SignatureHelp.default_enabled(),
            execute_command_enabled: FeatureToggle::ExecuteCommand.default_enabled(),
        }
    }
}

impl ConfigurationSnapshot {
    /// Builds a snapshot from a settings payload overlaid on the defaults.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ConfigurationUpdate::from_settings`].
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigurationError> {
        let update = ConfigurationUpdate::from_settings(settings)?;
        let mut snapshot = Self::default();
        snapshot.apply(&update);
        Ok(snapshot)
    }

    /// Returns the current value of `toggle`.
    #[must_use]
    pub const fn is_enabled(&self, toggle: FeatureToggle) -> bool {
        match toggle {
            FeatureToggle::ReferencesCodeLens => self.references_code_lens_enabled,
            FeatureToggle::Format => self.format_enabled,
            FeatureToggle::SignatureHelp => self.signature_help_enabled,
            FeatureToggle::ExecuteCommand => self.execute_command_enabled,
        }
    }

    /// Overwrites the value of `toggle`.
    pub const fn set(&mut self, toggle: FeatureToggle, enabled: bool) {
        let slot = match toggle {
            FeatureToggle::ReferencesCodeLens => &mut self.references_code_lens_enabled,
            FeatureToggle::Format => &mut self.format_enabled,
            FeatureToggle::SignatureHelp => &mut self.signature_help_enabled,
            FeatureToggle::ExecuteCommand => &mut self.execute_command_enabled,
        };
        *slot = enabled;
    }

    /// Overlays the toggles present in `update` and returns those whose value
    /// actually changed.
    pub fn apply(&mut self, update: &ConfigurationUpdate) -> Vec<FeatureToggle> {
        let mut changed = Vec::new();
        for (toggle, enabled) in update.iter() {
            if self.is_enabled(toggle) != enabled {
                self.set(toggle, enabled);
                changed.push(toggle);
            }
        }
        changed
    }
}

/// Finds `key` as a flat entry or under any split of its dotted segments
/// into nested objects. Longer flat prefixes are tried first.
fn lookup<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = object.get(key) {
        return Some(value);
    }

    let segments: Vec<&str> = key.split('.').collect();
    (1..segments.len()).rev().find_map(|split| {
        let head = segments.get(..split)?.join(".");
        let tail = segments.get(split..)?.join(".");
        lookup(object.get(&head)?.as_object()?, &tail)
    })
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
