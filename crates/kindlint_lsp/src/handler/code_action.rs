//! Code action handler for quick fixes.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::conversion::ranges_overlap;
use crate::handler::{QUICK_FIX_COMMAND, QUICK_FIX_TITLE};
use crate::session::Session;
use crate::store::code_of;

/// Handles the `textDocument/codeAction` request.
///
/// Every stored diagnostic in the requested range yields one action per
/// suggestion. Actions run the quick fix command instead of carrying an edit,
/// so the store can drop the diagnostic once the edit is applied.
pub async fn handle_code_action(
    session: &Session,
    params: CodeActionParams,
) -> Result<Option<CodeActionResponse>> {
    debug!("Code action request: {}", params.text_document.uri);

    if let Some(only) = &params.context.only
        && !only.contains(&CodeActionKind::QUICKFIX)
    {
        return Ok(Some(Vec::new()));
    }

    let uri = &params.text_document.uri;
    let diagnostics = session.store().diagnostics(uri).await;
    let quick_fixes = session.store().quick_fixes(uri).await;

    let mut actions = Vec::new();
    for diagnostic in &diagnostics {
        if !ranges_overlap(diagnostic.range, params.range) {
            continue;
        }
        let Some(code) = code_of(diagnostic) else {
            continue;
        };
        let Some(fixes) = quick_fixes.get(code) else {
            continue;
        };

        for fix in fixes {
            let action = CodeAction {
                title: fix.label.clone(),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![diagnostic.clone()]),
                command: Some(Command {
                    title: QUICK_FIX_TITLE.to_string(),
                    command: QUICK_FIX_COMMAND.to_string(),
                    arguments: Some(vec![
                        serde_json::json!(code),
                        serde_json::json!(uri),
                        serde_json::json!(fix.value),
                    ]),
                }),
                ..Default::default()
            };
            actions.push(CodeActionOrCommand::CodeAction(action));
        }
    }

    Ok(Some(actions))
}
