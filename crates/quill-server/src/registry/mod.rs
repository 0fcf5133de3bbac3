//! Per-session registration state for dynamically registered capabilities.

use std::collections::BTreeSet;
use std::fmt;

use lsp_types::{RegistrationParams, UnregistrationParams};
use thiserror::Error;
use tracing::{debug, error};

use crate::capability::{CapabilityKind, ClientDeclaredSupport};
use crate::transport::{ClientTransport, TransportError};

const REGISTRY_TARGET: &str = "quill_server::registry";

/// Outcome of a [`CapabilityRegistry::set_registered`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Desired state already held; nothing was sent.
    Unchanged,
    /// The kind was registered with the client.
    Registered,
    /// The kind was unregistered from the client.
    Unregistered,
}

/// Direction of an attempted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Registering a kind.
    Register,
    /// Unregistering a kind.
    Unregister,
}

impl fmt::Display for TransitionDirection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Register => "registration",
            Self::Unregister => "unregistration",
        };
        formatter.write_str(label)
    }
}

/// Errors returned by [`CapabilityRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The client never declared dynamic support for the kind.
    #[error("client does not support dynamic registration of {kind}")]
    Unsupported {
        /// Kind that was requested.
        kind: CapabilityKind,
    },

    /// The transport rejected the message; the state was left untouched.
    #[error("{direction} of {kind} failed: {source}")]
    Transport {
        /// Kind being transitioned.
        kind: CapabilityKind,
        /// Direction of the failed transition.
        direction: TransitionDirection,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
}

/// Tracks which kinds are registered with one client and keeps the client in
/// step with the desired state.
#[derive(Debug)]
pub struct CapabilityRegistry {
    support: ClientDeclaredSupport,
    transport: Box<dyn ClientTransport>,
    language: String,
    registered: BTreeSet<CapabilityKind>,
}

impl CapabilityRegistry {
    /// Creates a registry with nothing registered.
    #[must_use]
    pub fn new(
        support: ClientDeclaredSupport,
        transport: Box<dyn ClientTransport>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            support,
            transport,
            language: language.into(),
            registered: BTreeSet::new(),
        }
    }

    /// Dynamic-registration support the client declared.
    #[must_use]
    pub const fn support(&self) -> &ClientDeclaredSupport {
        &self.support
    }

    /// Whether `kind` is currently registered.
    #[must_use]
    pub fn is_registered(&self, kind: CapabilityKind) -> bool {
        self.registered.contains(&kind)
    }

    /// Kinds currently registered, in declaration order.
    pub fn registered(&self) -> impl Iterator<Item = CapabilityKind> + '_ {
        self.registered.iter().copied()
    }

    /// Drives `kind` towards `desired`, sending at most one message.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unsupported`] when the client did not declare
    /// dynamic support for `kind`, and [`RegistryError::Transport`] when the
    /// message could not be delivered. Neither error changes the state.
    pub fn set_registered(
        &mut self,
        kind: CapabilityKind,
        desired: bool,
    ) -> Result<Transition, RegistryError> {
        if !self.support.supports(kind) {
            error!(
                target: REGISTRY_TARGET,
                capability = %kind,
                desired,
                "refusing to change registration of an unsupported capability"
            );
            return Err(RegistryError::Unsupported { kind });
        }

        if self.is_registered(kind) == desired {
            return Ok(Transition::Unchanged);
        }

        if desired {
            self.register(kind)
        } else {
            self.unregister(kind)
        }
    }

    /// Forgets every registration without notifying the client.
    pub fn reset(&mut self) {
        debug!(
            target: REGISTRY_TARGET,
            registered = self.registered.len(),
            "resetting capability registrations"
        );
        self.registered.clear();
    }

    fn register(&mut self, kind: CapabilityKind) -> Result<Transition, RegistryError> {
        let params = RegistrationParams {
            registrations: vec![kind.registration(&self.language)],
        };
        self.transport
            .register_capability(params)
            .map_err(|source| RegistryError::Transport {
                kind,
                direction: TransitionDirection::Register,
                source,
            })?;
        self.registered.insert(kind);
        debug!(target: REGISTRY_TARGET, capability = %kind, "registered capability");
        Ok(Transition::Registered)
    }

    fn unregister(&mut self, kind: CapabilityKind) -> Result<Transition, RegistryError> {
        let params = UnregistrationParams {
            unregisterations: vec![kind.unregistration()],
        };
        self.transport
            .unregister_capability(params)
            .map_err(|source| RegistryError::Transport {
                kind,
                direction: TransitionDirection::Unregister,
                source,
            })?;
        self.registered.remove(&kind);
        debug!(target: REGISTRY_TARGET, capability = %kind, "unregistered capability");
        Ok(Transition::Unregistered)
    }
}
