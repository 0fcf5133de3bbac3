//! Converges client registrations on the configured state.
//!
//! The negotiator decides *what* each kind should be; the registry alone
//! decides whether a message is needed. Kinds the client cannot register
//! dynamically are skipped outright, whatever their toggle says.

use quill_config::ConfigurationSnapshot;
use tracing::{debug, warn};

use crate::capability::CapabilityKind;
use crate::registry::{CapabilityRegistry, RegistryError, Transition};

const NEGOTIATOR_TARGET: &str = "quill_server::negotiator";

/// Transition applied to one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindOutcome {
    /// Kind that was driven.
    pub kind: CapabilityKind,
    /// What the registry did.
    pub transition: Transition,
}

/// Failure recorded for one kind.
#[derive(Debug)]
pub struct KindFailure {
    /// Kind that failed.
    pub kind: CapabilityKind,
    /// Registry error.
    pub error: RegistryError,
}

/// Result of one negotiation pass.
#[derive(Debug, Default)]
pub struct NegotiationReport {
    outcomes: Vec<KindOutcome>,
    failures: Vec<KindFailure>,
}

impl NegotiationReport {
    /// Outcomes in the order kinds were driven.
    #[must_use]
    pub fn outcomes(&self) -> &[KindOutcome] {
        &self.outcomes
    }

    /// Kinds whose transition failed.
    #[must_use]
    pub fn failures(&self) -> &[KindFailure] {
        &self.failures
    }

    /// Whether every driven kind succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Outcomes that actually sent a message.
    pub fn changes(&self) -> impl Iterator<Item = KindOutcome> + '_ {
        self.outcomes
            .iter()
            .copied()
            .filter(|outcome| outcome.transition != Transition::Unchanged)
    }

    fn record(&mut self, kind: CapabilityKind, result: Result<Transition, RegistryError>) {
        match result {
            Ok(transition) => self.outcomes.push(KindOutcome { kind, transition }),
            Err(error) => {
                warn!(
                    target: NEGOTIATOR_TARGET,
                    capability = %kind,
                    error = %error,
                    "capability transition failed"
                );
                self.failures.push(KindFailure { kind, error });
            }
        }
    }
}

/// Maps configuration snapshots onto registry transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityNegotiator;

impl CapabilityNegotiator {
    /// Creates a negotiator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Drives every configured kind towards its toggle value.
    ///
    /// Failures for one kind never stop later kinds.
    #[must_use]
    pub fn on_configuration_changed(
        &self,
        registry: &mut CapabilityRegistry,
        snapshot: &ConfigurationSnapshot,
    ) -> NegotiationReport {
        let mut report = NegotiationReport::default();
        Self::drive_configured(registry, snapshot, &mut report);
        report
    }

    /// Registers always-on kinds, then drives configured kinds.
    #[must_use]
    pub fn on_initialized(
        &self,
        registry: &mut CapabilityRegistry,
        snapshot: &ConfigurationSnapshot,
    ) -> NegotiationReport {
        let mut report = NegotiationReport::default();
        for kind in CapabilityKind::ALL {
            if kind.toggle().is_none() && registry.support().supports(kind) {
                report.record(kind, registry.set_registered(kind, true));
            }
        }
        Self::drive_configured(registry, snapshot, &mut report);
        report
    }

    fn drive_configured(
        registry: &mut CapabilityRegistry,
        snapshot: &ConfigurationSnapshot,
        report: &mut NegotiationReport,
    ) {
        for kind in CapabilityKind::ALL {
            let Some(toggle) = kind.toggle() else {
                continue;
            };
            if !registry.support().supports(kind) {
                debug!(
                    target: NEGOTIATOR_TARGET,
                    capability = %kind,
                    "skipping capability without dynamic registration support"
                );
                continue;
            }
            report.record(kind, registry.set_registered(kind, snapshot.is_enabled(toggle)));
        }
    }
}
