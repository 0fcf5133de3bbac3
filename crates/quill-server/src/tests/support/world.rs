//! BDD test world encapsulating the server, sample workspace and client.

use std::sync::Arc;

use lsp_types::{DidChangeConfigurationParams, Uri};
use quill_config::ServerConfig;
use serde_json::Value;

use crate::capability::ClientDeclaredSupport;
use crate::errors::ServerError;
use crate::host::Server;
use crate::hover::HoverResult;
use crate::negotiator::NegotiationReport;

use super::recording_transport::{RecordingTransport, RecordingTransportHandle, TransportCall};
use super::sample_index::sample_index;

/// Shared state exercised by BDD step implementations.
pub struct TestWorld {
    /// Server under test.
    pub server: Server,
    transport: Option<RecordingTransportHandle>,
    /// Last hover result observed.
    pub last_hover: Option<HoverResult>,
    /// Last negotiation report observed.
    pub last_report: Option<NegotiationReport>,
    /// Last error observed while exercising the server.
    pub last_error: Option<ServerError>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Builds a world over the sample workspace with default configuration.
    #[must_use]
    pub fn new() -> Self {
        let index = Arc::new(sample_index());
        Self {
            server: Server::new(ServerConfig::default(), index.clone(), index),
            transport: None,
            last_hover: None,
            last_report: None,
            last_error: None,
        }
    }

    /// Connects a recording client with the supplied support.
    pub fn connect(&mut self, support: ClientDeclaredSupport) {
        let transport = RecordingTransport::new();
        self.transport = Some(transport.handle());
        self.server.connect_with_support(support, Box::new(transport));
    }

    /// Returns the calls the current client received.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.transport
            .as_ref()
            .map(RecordingTransportHandle::calls)
            .unwrap_or_default()
    }

    /// Forgets the calls received so far.
    pub fn clear_calls(&self) {
        if let Some(handle) = &self.transport {
            handle.clear();
        }
    }

    /// Makes the next `count` deliveries to the client fail.
    pub fn fail_next_deliveries(&self, count: usize) {
        if let Some(handle) = &self.transport {
            handle.fail_next(count);
        }
    }

    /// Resolves a hover and stores the outcome.
    pub fn hover(&mut self, uri: Uri, line: i64, character: i64) {
        self.last_hover = None;
        self.last_error = None;
        match self.server.hover_at(uri, line, character) {
            Ok(result) => self.last_hover = Some(result),
            Err(error) => self.last_error = Some(error),
        }
    }

    /// Sends `initialized` and stores the outcome.
    pub fn initialized(&mut self) {
        self.last_report = None;
        self.last_error = None;
        match self.server.initialized() {
            Ok(report) => self.last_report = Some(report),
            Err(error) => self.last_error = Some(error),
        }
    }

    /// Sends a configuration change and stores the outcome.
    pub fn change_configuration(&mut self, settings: Value) {
        self.last_report = None;
        self.last_error = None;
        let params = DidChangeConfigurationParams { settings };
        match self.server.did_change_configuration(&params) {
            Ok(report) => self.last_report = Some(report),
            Err(error) => self.last_error = Some(error),
        }
    }

    /// Returns the last hover result, failing the test when none exists.
    pub fn hover_result(&self) -> &HoverResult {
        self.last_hover.as_ref().unwrap_or_else(|| {
            panic!("expected a hover result, found error {:?}", self.last_error)
        })
    }
}
