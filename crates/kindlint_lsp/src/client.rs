//! Outbound traffic to the editor.

use serde::{Deserialize, Serialize};
use tower_lsp::Client;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{ConfigurationItem, Diagnostic, Url, WorkspaceEdit};
use tracing::{debug, warn};

/// Configuration section requested from the editor.
pub const CONFIG_SECTION: &str = "kindlint";

/// Lifecycle phase reported by a status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPhase {
    #[serde(rename = "lint.start")]
    Start,
    #[serde(rename = "lint.start.fix")]
    StartFix,
    #[serde(rename = "lint.start.format")]
    StartFormat,
    #[serde(rename = "lint.error")]
    Error,
    #[serde(rename = "lint.end")]
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDocument {
    pub document_uri: Url,
}

/// Parameters of the `kindlint/status` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusParams {
    pub id: u64,
    pub state: TaskPhase,
    pub documents: Vec<StatusDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_lint_time_ms: Option<u64>,
}

/// The `kindlint/status` notification.
pub enum StatusNotification {}

impl Notification for StatusNotification {
    type Params = StatusParams;
    const METHOD: &'static str = "kindlint/status";
}

/// Everything the server sends to the editor.
#[tower_lsp::async_trait]
pub trait HostClient: Send + Sync + 'static {
    /// Replaces the diagnostics shown for `uri`.
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>);

    /// Sends a status notification. Nothing is expected back.
    async fn send_status(&self, params: StatusParams);

    /// Fetches the `kindlint` configuration section scoped to `uri`.
    /// Returns `None` when the editor cannot answer.
    async fn configuration(&self, uri: &Url) -> Option<serde_json::Value>;

    /// Asks the editor to apply `edit`. Returns whether it was applied.
    async fn apply_edit(&self, edit: WorkspaceEdit) -> bool;
}

#[tower_lsp::async_trait]
impl HostClient for Client {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        Client::publish_diagnostics(self, uri, diagnostics, None).await;
    }

    async fn send_status(&self, params: StatusParams) {
        self.send_notification::<StatusNotification>(params).await;
    }

    async fn configuration(&self, uri: &Url) -> Option<serde_json::Value> {
        let items = vec![ConfigurationItem {
            scope_uri: Some(uri.clone()),
            section: Some(CONFIG_SECTION.to_string()),
        }];

        match Client::configuration(self, items).await {
            Ok(values) => values.into_iter().next(),
            Err(e) => {
                debug!("Configuration request failed for {}: {}", uri, e);
                None
            }
        }
    }

    async fn apply_edit(&self, edit: WorkspaceEdit) -> bool {
        match Client::apply_edit(self, edit).await {
            Ok(response) => response.applied,
            Err(e) => {
                warn!("workspace/applyEdit failed: {}", e);
                false
            }
        }
    }
}
