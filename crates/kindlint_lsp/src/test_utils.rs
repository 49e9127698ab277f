//! Test helpers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::Notify;
use tower_lsp::lsp_types::{Diagnostic, Url, WorkspaceEdit};

use crate::client::{HostClient, StatusParams};

/// A host client that records everything sent to it.
#[derive(Default)]
pub struct RecordingClient {
    publications: Mutex<Vec<(Url, Vec<Diagnostic>)>>,
    statuses: Mutex<Vec<StatusParams>>,
    edits: Mutex<Vec<WorkspaceEdit>>,
    configuration: Mutex<Option<serde_json::Value>>,
    configuration_requests: AtomicUsize,
    reject_edits: AtomicBool,
}

impl RecordingClient {
    pub fn with_configuration(value: serde_json::Value) -> Self {
        let client = Self::default();
        *client.configuration.lock() = Some(value);
        client
    }

    pub fn publications(&self) -> Vec<(Url, Vec<Diagnostic>)> {
        self.publications.lock().clone()
    }

    /// The most recent diagnostics published for `uri`.
    pub fn last_published(&self, uri: &Url) -> Option<Vec<Diagnostic>> {
        self.publications
            .lock()
            .iter()
            .rev()
            .find(|(u, _)| u == uri)
            .map(|(_, diagnostics)| diagnostics.clone())
    }

    pub fn statuses(&self) -> Vec<StatusParams> {
        self.statuses.lock().clone()
    }

    pub fn edits(&self) -> Vec<WorkspaceEdit> {
        self.edits.lock().clone()
    }

    pub fn configuration_requests(&self) -> usize {
        self.configuration_requests.load(Ordering::SeqCst)
    }

    pub fn reject_edits(&self) {
        self.reject_edits.store(true, Ordering::SeqCst);
    }
}

#[tower_lsp::async_trait]
impl HostClient for RecordingClient {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.publications.lock().push((uri, diagnostics));
    }

    async fn send_status(&self, params: StatusParams) {
        self.statuses.lock().push(params);
    }

    async fn configuration(&self, _uri: &Url) -> Option<serde_json::Value> {
        self.configuration_requests.fetch_add(1, Ordering::SeqCst);
        self.configuration.lock().clone()
    }

    async fn apply_edit(&self, edit: WorkspaceEdit) -> bool {
        if self.reject_edits.load(Ordering::SeqCst) {
            return false;
        }
        self.edits.lock().push(edit);
        true
    }
}

/// A recording client that holds the first status notification until
/// [`GatedClient::release`] is called, parking the lint pass that sent it.
pub struct GatedClient {
    pub inner: RecordingClient,
    armed: AtomicBool,
    held: Notify,
    released: Notify,
}

impl Default for GatedClient {
    fn default() -> Self {
        Self {
            inner: RecordingClient::default(),
            armed: AtomicBool::new(true),
            held: Notify::new(),
            released: Notify::new(),
        }
    }
}

impl GatedClient {
    /// Waits until a pass is parked on its first status.
    pub async fn wait_until_held(&self) {
        self.held.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[tower_lsp::async_trait]
impl HostClient for GatedClient {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.inner.publish_diagnostics(uri, diagnostics).await;
    }

    async fn send_status(&self, params: StatusParams) {
        let hold = self.armed.swap(false, Ordering::SeqCst);
        self.inner.send_status(params).await;
        if hold {
            self.held.notify_one();
            self.released.notified().await;
        }
    }

    async fn configuration(&self, uri: &Url) -> Option<serde_json::Value> {
        self.inner.configuration(uri).await
    }

    async fn apply_edit(&self, edit: WorkspaceEdit) -> bool {
        self.inner.apply_edit(edit).await
    }
}
