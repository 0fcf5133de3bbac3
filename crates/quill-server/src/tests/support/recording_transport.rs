//! Recording client transport used in tests.

use std::sync::{Arc, Mutex};

use lsp_types::{RegistrationParams, UnregistrationParams};

use crate::transport::{ClientTransport, TransportError};

/// Message observed by the recording transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `client/registerCapability` carrying these methods.
    Register(Vec<String>),
    /// `client/unregisterCapability` carrying these methods.
    Unregister(Vec<String>),
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<TransportCall>,
    failures_remaining: usize,
}

/// Test double that records every message handed to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    shared: Arc<Mutex<RecordingState>>,
}

impl RecordingTransport {
    /// Creates a transport that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that can be used to assert recorded calls.
    pub fn handle(&self) -> RecordingTransportHandle {
        RecordingTransportHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    fn deliver(&self, call: TransportCall) -> Result<(), TransportError> {
        with_state(&self.shared, |state| {
            if state.failures_remaining > 0 {
                state.failures_remaining -= 1;
                return Err(TransportError::new("client connection refused the message"));
            }
            state.calls.push(call);
            Ok(())
        })
    }
}

impl ClientTransport for RecordingTransport {
    fn register_capability(&mut self, params: RegistrationParams) -> Result<(), TransportError> {
        let methods = params
            .registrations
            .into_iter()
            .map(|registration| registration.method)
            .collect();
        self.deliver(TransportCall::Register(methods))
    }

    fn unregister_capability(
        &mut self,
        params: UnregistrationParams,
    ) -> Result<(), TransportError> {
        let methods = params
            .unregisterations
            .into_iter()
            .map(|unregistration| unregistration.method)
            .collect();
        self.deliver(TransportCall::Unregister(methods))
    }
}

/// Handle for asserting what a [`RecordingTransport`] delivered.
#[derive(Debug, Clone)]
pub struct RecordingTransportHandle {
    shared: Arc<Mutex<RecordingState>>,
}

impl RecordingTransportHandle {
    /// Returns the ordered list of delivered calls.
    pub fn calls(&self) -> Vec<TransportCall> {
        with_state(&self.shared, |state| state.calls.clone())
    }

    /// Forgets every delivered call.
    pub fn clear(&self) {
        with_state(&self.shared, |state| state.calls.clear());
    }

    /// Makes the next `count` deliveries fail.
    pub fn fail_next(&self, count: usize) {
        with_state(&self.shared, |state| state.failures_remaining = count);
    }
}

fn with_state<R, F>(shared: &Arc<Mutex<RecordingState>>, action: F) -> R
where
    F: FnOnce(&mut RecordingState) -> R,
{
    let mut guard = shared.lock().unwrap_or_else(|poison| poison.into_inner());
    action(&mut guard)
}
