//! kindlint LSP Server
//!
//! Language Server Protocol implementation for kindlint.
//! Lints documents as they are opened, edited and saved, keeps one lint pass
//! in flight per document, and serves quick fixes for the findings.

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::info;

use kindlint_core::Strategy;

pub mod client;
mod config;
mod conversion;
mod debounce;
mod error;
mod handler;
pub mod invoker;
pub mod notifier;
pub mod scheduler;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{HostClient, StatusNotification, StatusParams, TaskPhase};
pub use error::LintError;
pub use invoker::{LintInvoker, LintOutput, parse_reason};
pub use notifier::TaskNotifier;
pub use scheduler::{LintOptions, LintRequest, LintScheduler};
pub use session::{Document, Session, SharedSession};
pub use store::{DiagnosticStore, LintArtifact, QuickFix};

use crate::debounce::spawn_debounced_validation;

/// The LSP backend for kindlint.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for log messages.
    client: Client,
    /// Shared state
    session: SharedSession,
}

impl Backend {
    /// Creates a new backend with the given client.
    pub fn new(client: Client) -> Self {
        let session = Arc::new(Session::new(Arc::new(client.clone())));
        Self { client, session }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Lints `uri` in the background.
    fn spawn_validation(&self, uri: Url) {
        let session = self.session.clone();
        tokio::spawn(async move {
            session.validate(uri, LintOptions::default()).await;
        });
    }

    fn revalidate_open_documents(&self) {
        for uri in self.session.open_uris() {
            self.spawn_validation(uri);
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.session, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = handler::handle_did_open(&self.session, params);
        self.spawn_validation(uri);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let Some((uri, version)) = handler::handle_did_change(&self.session, params) else {
            return;
        };

        if self.session.settings(&uri).await.strategy == Strategy::OnType {
            spawn_debounced_validation(self.session.clone(), uri, version);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = handler::handle_did_save(params);

        if self.session.settings(&uri).await.strategy == Strategy::OnSave {
            self.spawn_validation(uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handler::handle_did_close(&self.session, params).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handler::handle_did_change_configuration(&self.session, params);
        self.revalidate_open_documents();
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if handler::handle_did_change_watched_files(&self.session, params) {
            self.revalidate_open_documents();
        }
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        handler::handle_code_action(&self.session, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        handler::handle_execute_command(&self.session, params).await
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let edits = self
            .session
            .validate(params.text_document.uri, LintOptions::FORMAT)
            .await;
        Ok(Some(edits))
    }
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("kindlint LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
