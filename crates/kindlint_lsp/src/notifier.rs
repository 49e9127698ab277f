//! Task ids and status notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tower_lsp::lsp_types::Url;
use tracing::debug;

use crate::client::{HostClient, StatusDocument, StatusParams, TaskPhase};
use crate::scheduler::LintOptions;

impl TaskPhase {
    /// The start phase matching a request's options.
    pub fn start(options: LintOptions) -> Self {
        if options.fix {
            Self::StartFix
        } else if options.format {
            Self::StartFormat
        } else {
            Self::Start
        }
    }
}

/// Hands out task ids and reports lint lifecycle events to the editor.
pub struct TaskNotifier {
    client: Arc<dyn HostClient>,
    last_id: AtomicU64,
}

impl TaskNotifier {
    pub fn new(client: Arc<dyn HostClient>) -> Self {
        Self {
            client,
            last_id: AtomicU64::new(0),
        }
    }

    /// Returns a new task id. Ids start at 1 and never repeat.
    pub fn next_task_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Sends a status event for `uri`.
    pub async fn emit(
        &self,
        task_id: u64,
        phase: TaskPhase,
        uri: &Url,
        file_name: &str,
        elapsed: Option<Duration>,
    ) {
        debug!("Task {} {:?}: {}", task_id, phase, uri);

        self.client
            .send_status(StatusParams {
                id: task_id,
                state: phase,
                documents: vec![StatusDocument {
                    document_uri: uri.clone(),
                }],
                last_file_name: Some(file_name.to_string()),
                last_lint_time_ms: elapsed.map(|d| d.as_millis() as u64),
            })
            .await;
    }
}

/// Base name of the document, used in status events.
pub fn file_name(uri: &Url) -> String {
    uri.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uri.to_string())
}
