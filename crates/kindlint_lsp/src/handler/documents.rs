//! Document lifecycle handlers (open, change, save, close).

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::session::Session;

/// Handles the `textDocument/didOpen` notification.
pub fn handle_did_open(session: &Session, params: DidOpenTextDocumentParams) -> Url {
    debug!("Document opened: {}", params.text_document.uri);

    let TextDocumentItem {
        uri,
        language_id,
        version,
        text,
    } = params.text_document;
    session.open(uri.clone(), &language_id, text, version);
    uri
}

/// Handles the `textDocument/didChange` notification.
///
/// Returns the URI and version for debounced validation, or `None` when the
/// document is not open.
pub fn handle_did_change(
    session: &Session,
    params: DidChangeTextDocumentParams,
) -> Option<(Url, i32)> {
    debug!("Document changed: {}", params.text_document.uri);

    let change = params.content_changes.into_iter().last()?;
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    session
        .change(uri.clone(), change.text, version)
        .then_some((uri, version))
}

/// Handles the `textDocument/didSave` notification.
pub fn handle_did_save(params: DidSaveTextDocumentParams) -> Url {
    debug!("Document saved: {}", params.text_document.uri);
    params.text_document.uri
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(session: &Session, params: DidCloseTextDocumentParams) {
    debug!("Document closed: {}", params.text_document.uri);
    session.close(&params.text_document.uri).await;
}
