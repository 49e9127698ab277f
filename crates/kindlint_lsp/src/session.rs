//! Server session: open documents, settings and the lint pipeline.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tokio::sync::OnceCell;
use tower_lsp::lsp_types::{TextEdit, Url, WorkspaceEdit};
use tracing::{debug, error, info, warn};

use kindlint_core::{Filetype, Settings};

use crate::LintError;
use crate::client::{HostClient, TaskPhase};
use crate::invoker::LintInvoker;
use crate::notifier::{TaskNotifier, file_name};
use crate::scheduler::{LintOptions, LintRequest, LintScheduler};
use crate::store::DiagnosticStore;

/// An open text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub version: i32,
    pub filetype: Filetype,
}

/// Shared server state.
pub struct Session {
    pub(crate) client: Arc<dyn HostClient>,
    pub(crate) documents: RwLock<HashMap<Url, Document>>,
    /// Settings per document. The cell is shared so concurrent first reads
    /// wait on a single configuration request.
    pub(crate) settings: Mutex<HashMap<Url, Arc<OnceCell<Settings>>>>,
    /// Settings loaded from the workspace settings file.
    pub(crate) workspace_settings: RwLock<Option<Settings>>,
    pub(crate) workspace_root: RwLock<Option<PathBuf>>,
    /// Last opened or edited document.
    pub(crate) current_uri: RwLock<Option<Url>>,
    pub(crate) scheduler: LintScheduler,
    pub(crate) store: DiagnosticStore,
    pub(crate) notifier: TaskNotifier,
    pub(crate) invoker: LintInvoker,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("documents", &self.documents.read().len())
            .field("workspace_root", &self.workspace_root.read())
            .field("current_uri", &self.current_uri.read())
            .finish()
    }
}

impl Session {
    pub fn new(client: Arc<dyn HostClient>) -> Self {
        Self {
            store: DiagnosticStore::new(client.clone()),
            notifier: TaskNotifier::new(client.clone()),
            client,
            documents: RwLock::new(HashMap::new()),
            settings: Mutex::new(HashMap::new()),
            workspace_settings: RwLock::new(None),
            workspace_root: RwLock::new(None),
            current_uri: RwLock::new(None),
            scheduler: LintScheduler::new(),
            invoker: LintInvoker::new(),
        }
    }

    /// Registers a newly opened document.
    pub fn open(&self, uri: Url, language_id: &str, text: String, version: i32) {
        let document = Document {
            text,
            version,
            filetype: Filetype::from_language_id(language_id),
        };
        self.documents.write().insert(uri.clone(), document);
        *self.current_uri.write() = Some(uri);
    }

    /// Replaces the text of an open document.
    ///
    /// Returns `false`, leaving the registry untouched, when `uri` was never
    /// opened or has already been closed.
    pub fn change(&self, uri: Url, text: String, version: i32) -> bool {
        {
            let mut documents = self.documents.write();
            let Some(document) = documents.get_mut(&uri) else {
                debug!("Ignoring change to unopened document {}", uri);
                return false;
            };
            document.text = text;
            document.version = version;
        }
        *self.current_uri.write() = Some(uri);
        true
    }

    /// Forgets a closed document: queued lints, settings, diagnostics and
    /// quick fixes all go.
    pub async fn close(&self, uri: &Url) {
        self.scheduler.cancel(uri);
        // Unregister before dropping the settings cell; `open_settings` checks
        // registration under the settings lock.
        self.documents.write().remove(uri);
        self.settings.lock().remove(uri);
        {
            let mut current = self.current_uri.write();
            if current.as_ref() == Some(uri) {
                *current = None;
            }
        }
        self.store.purge(uri).await;
    }

    /// The most recent snapshot of a document.
    pub fn document(&self, uri: &Url) -> Option<Document> {
        self.documents.read().get(uri).cloned()
    }

    pub fn current_uri(&self) -> Option<Url> {
        self.current_uri.read().clone()
    }

    pub fn open_uris(&self) -> Vec<Url> {
        self.documents.read().keys().cloned().collect()
    }

    pub fn store(&self) -> &DiagnosticStore {
        &self.store
    }

    pub fn scheduler(&self) -> &LintScheduler {
        &self.scheduler
    }

    /// Settings for a document, fetched from the editor on first use.
    pub async fn settings(&self, uri: &Url) -> Settings {
        let cell = self.settings.lock().entry(uri.clone()).or_default().clone();
        cell.get_or_init(|| self.fetch_settings(uri)).await.clone()
    }

    /// Like `settings`, but only caches for registered documents. Returns
    /// `None` once `uri` has been closed.
    async fn open_settings(&self, uri: &Url) -> Option<Settings> {
        let cell = {
            let mut settings = self.settings.lock();
            if !self.is_open(uri) {
                return None;
            }
            settings.entry(uri.clone()).or_default().clone()
        };
        Some(cell.get_or_init(|| self.fetch_settings(uri)).await.clone())
    }

    fn is_open(&self, uri: &Url) -> bool {
        self.documents.read().contains_key(uri)
    }

    async fn fetch_settings(&self, uri: &Url) -> Settings {
        match self.client.configuration(uri).await {
            Some(value) if !value.is_null() => match Settings::from_value(value) {
                Ok(settings) => return settings,
                Err(e) => warn!("Ignoring editor settings for {}: {}", uri, e),
            },
            _ => warn!("No editor settings for {}, using workspace settings", uri),
        }

        self.workspace_settings.read().clone().unwrap_or_default()
    }

    /// Drops cached settings for one document, or for all of them.
    pub fn invalidate_settings(&self, uri: Option<&Url>) {
        let mut settings = self.settings.lock();
        match uri {
            Some(uri) => {
                settings.remove(uri);
            }
            None => settings.clear(),
        }
    }

    /// Requests a lint of `uri`. Returns the edits of a format pass.
    pub async fn validate(&self, uri: Url, options: LintOptions) -> Vec<TextEdit> {
        self.scheduler
            .validate(LintRequest::new(uri, options), |request| {
                self.execute_lint(request)
            })
            .await
    }

    /// Runs one lint pass. Only the scheduler calls this.
    pub(crate) async fn execute_lint(
        &self,
        request: LintRequest,
    ) -> Result<Vec<TextEdit>, LintError> {
        let LintRequest { uri, options } = request;
        debug!("Running lint pass for {} ({:?})", uri, options);

        let document = self.document(&uri);
        if !options.format && document.is_some() {
            self.store.clear(&uri).await;
        }

        let task_id = self.notifier.next_task_id();
        let file_name = file_name(&uri);
        let started = Instant::now();
        self.notifier
            .emit(task_id, TaskPhase::start(options), &uri, &file_name, None)
            .await;

        let settings = match document {
            Some(_) => match self.open_settings(&uri).await {
                Some(settings) => settings,
                None => {
                    debug!("{} was closed before its settings were read", uri);
                    self.finish_pass(task_id, &uri, &file_name, started).await;
                    return Ok(Vec::new());
                }
            },
            None => Settings::default(),
        };

        let output = match self.invoker.run(&uri, document.as_ref(), &settings).await {
            Ok(output) => output,
            Err(e) => {
                error!("Lint error for {}: {}", uri, e);
                self.notifier
                    .emit(task_id, TaskPhase::Error, &uri, &file_name, None)
                    .await;
                return Err(e);
            }
        };

        let mut edits = Vec::new();
        if self.is_open(&uri) {
            self.store
                .replace_all(&uri, output.diagnostics.clone(), output.quick_fixes.clone())
                .await;
            if !self.is_open(&uri) {
                // Closed while publishing; drop what was just stored.
                self.store.purge(&uri).await;
            } else if options.format {
                edits = output.format_edits();
            } else {
                self.store.set_artifact(&uri, output.artifact.clone()).await;
            }
        } else {
            debug!("{} was closed during the lint pass", uri);
        }

        self.finish_pass(task_id, &uri, &file_name, started).await;
        Ok(edits)
    }

    async fn finish_pass(&self, task_id: u64, uri: &Url, file_name: &str, started: Instant) {
        self.notifier
            .emit(
                task_id,
                TaskPhase::End,
                uri,
                file_name,
                Some(started.elapsed()),
            )
            .await;
    }

    /// Applies a quick fix through the editor and drops the fixed diagnostic.
    ///
    /// Returns whether the editor applied the edit.
    pub async fn apply_quick_fix(&self, uri: &Url, code: &str, value: &str) -> bool {
        let Some(diagnostic) = self.store.find(uri, code).await else {
            warn!("No diagnostic {} in {}", code, uri);
            return false;
        };

        let edit = WorkspaceEdit {
            changes: Some(HashMap::from([(
                uri.clone(),
                vec![TextEdit {
                    range: diagnostic.range,
                    new_text: value.to_string(),
                }],
            )])),
            ..Default::default()
        };

        if !self.client.apply_edit(edit).await {
            info!("Quick fix {} for {} was not applied", code, uri);
            return false;
        }

        self.store.remove(&[diagnostic], uri, false, None).await;
        true
    }
}

/// Type alias for the shared session.
pub type SharedSession = Arc<Session>;
