//! Initialize and shutdown handlers.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::info;

use crate::config::reload_config;
use crate::handler::{LINT_COMMAND, QUICK_FIX_COMMAND};
use crate::session::Session;

/// Handles the `initialize` LSP request.
pub async fn handle_initialize(
    session: &Session,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("kindlint LSP server initializing...");

    if let Some(path) = params.root_uri.and_then(|u| u.to_file_path().ok()) {
        *session.workspace_root.write() = Some(path);
        reload_config(session);
    }

    Ok(InitializeResult {
        capabilities: capabilities(),
        server_info: Some(ServerInfo {
            name: "kindlint-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

fn capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                    include_text: Some(true),
                })),
                ..Default::default()
            },
        )),
        code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
            code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
            resolve_provider: Some(false),
            work_done_progress_options: Default::default(),
        })),
        document_formatting_provider: Some(OneOf::Left(true)),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![LINT_COMMAND.to_string(), QUICK_FIX_COMMAND.to_string()],
            work_done_progress_options: Default::default(),
        }),
        ..Default::default()
    }
}

/// Handles the `initialized` LSP notification.
pub async fn handle_initialized(client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "kindlint LSP server initialized!")
        .await;
}

/// Handles the `shutdown` LSP request.
pub async fn handle_shutdown() -> Result<()> {
    info!("kindlint LSP server shutting down...");
    Ok(())
}
