//! Server facade tying hover resolution to the client session.

use std::sync::Arc;

use lsp_types::{ClientCapabilities, DidChangeConfigurationParams, Hover, HoverParams, Uri};
use quill_config::{ConfigurationSnapshot, ConfigurationUpdate, ServerConfig};
use tracing::{debug, info};

use crate::capability::ClientDeclaredSupport;
use crate::element::DocumentPosition;
use crate::errors::ServerError;
use crate::hover::{HoverResolver, HoverResult};
use crate::index::{DocumentationSource, ElementIndex};
use crate::negotiator::{CapabilityNegotiator, NegotiationReport};
use crate::registry::CapabilityRegistry;
use crate::transport::ClientTransport;

const SERVER_TARGET: &str = "quill_server::server";

/// Language server core for one client at a time.
///
/// Mutating operations take `&mut self`; hosts that share the server across
/// tasks wrap it in a mutex so configuration changes stay serialised.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    resolver: HoverResolver,
    negotiator: CapabilityNegotiator,
    snapshot: ConfigurationSnapshot,
    session: Option<CapabilityRegistry>,
}

impl Server {
    /// Builds a server with no connected client.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        index: Arc<dyn ElementIndex>,
        docs: Arc<dyn DocumentationSource>,
    ) -> Self {
        let resolver = HoverResolver::new(index, docs, config.signature_language.as_str());
        let snapshot = config.settings;
        Self {
            config,
            resolver,
            negotiator: CapabilityNegotiator::new(),
            snapshot,
            session: None,
        }
    }

    /// Configuration the server was built with.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Toggle values currently in force.
    #[must_use]
    pub const fn snapshot(&self) -> &ConfigurationSnapshot {
        &self.snapshot
    }

    /// Registry of the connected client, if any.
    #[must_use]
    pub const fn registry(&self) -> Option<&CapabilityRegistry> {
        self.session.as_ref()
    }

    /// Whether a client is connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a session using the client's declared capabilities.
    pub fn connect_client(
        &mut self,
        capabilities: &ClientCapabilities,
        transport: Box<dyn ClientTransport>,
    ) {
        let support = ClientDeclaredSupport::from_client_capabilities(capabilities);
        self.connect_with_support(support, transport);
    }

    /// Starts a session with explicit dynamic-registration support.
    ///
    /// Any previous session is dropped without notifying its client.
    pub fn connect_with_support(
        &mut self,
        support: ClientDeclaredSupport,
        transport: Box<dyn ClientTransport>,
    ) {
        info!(
            target: SERVER_TARGET,
            dynamic_registration = support.any(),
            replaced = self.session.is_some(),
            "client connected"
        );
        self.session = Some(CapabilityRegistry::new(
            support,
            transport,
            self.config.signature_language.as_str(),
        ));
    }

    /// Handles the client's `initialized` notification.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::ClientNotConnected`] when no session exists.
    pub fn initialized(&mut self) -> Result<NegotiationReport, ServerError> {
        let registry = self.session.as_mut().ok_or(ServerError::ClientNotConnected)?;
        Ok(self.negotiator.on_initialized(registry, &self.snapshot))
    }

    /// Ends the session. Registrations are forgotten, not unregistered.
    pub fn disconnect_client(&mut self) {
        if let Some(mut registry) = self.session.take() {
            registry.reset();
            info!(target: SERVER_TARGET, "client disconnected");
        }
    }

    /// Handles `textDocument/hover`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Hover`] when resolution fails. Positions with
    /// nothing under them yield a hover with empty contents.
    pub fn hover(&self, params: &HoverParams) -> Result<Hover, ServerError> {
        let position = DocumentPosition::from(&params.text_document_position_params);
        let result = self.resolver.hover(&position)?;
        Ok(result.into())
    }

    /// Resolves a hover from raw, possibly negative, coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Hover`] for invalid coordinates or failed
    /// resolution.
    pub fn hover_at(
        &self,
        uri: Uri,
        line: i64,
        character: i64,
    ) -> Result<HoverResult, ServerError> {
        let position = DocumentPosition::from_raw(uri, line, character)?;
        Ok(self.resolver.hover(&position)?)
    }

    /// Handles `workspace/didChangeConfiguration`.
    ///
    /// Toggles absent from the payload keep their value. The snapshot is
    /// updated even without a connected client; registrations are only
    /// negotiated when one is connected.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Configuration`] for malformed payloads, leaving
    /// the snapshot untouched.
    pub fn did_change_configuration(
        &mut self,
        params: &DidChangeConfigurationParams,
    ) -> Result<NegotiationReport, ServerError> {
        let update = ConfigurationUpdate::from_settings(&params.settings)?;
        let changed = self.snapshot.apply(&update);
        debug!(
            target: SERVER_TARGET,
            changed = ?changed,
            "configuration updated"
        );

        let Some(registry) = self.session.as_mut() else {
            return Ok(NegotiationReport::default());
        };
        Ok(self
            .negotiator
            .on_configuration_changed(registry, &self.snapshot))
    }
}
