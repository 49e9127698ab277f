//! `workspace/executeCommand` handler.

use serde_json::Value;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use crate::scheduler::LintOptions;
use crate::session::Session;

/// Lints the current document.
pub const LINT_COMMAND: &str = "kindlint.lint";

/// Applies one suggestion. Arguments: `[code, uri, value]`.
pub const QUICK_FIX_COMMAND: &str = "kindlint.quickFix";
pub const QUICK_FIX_TITLE: &str = "Quick fix";

/// Handles the `workspace/executeCommand` request.
pub async fn handle_execute_command(
    session: &Session,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    debug!("Execute command: {}", params.command);

    match params.command.as_str() {
        LINT_COMMAND => {
            match session.current_uri() {
                Some(uri) => {
                    session.validate(uri, LintOptions::default()).await;
                }
                None => info!("No current document to lint"),
            }
            Ok(None)
        }
        QUICK_FIX_COMMAND => {
            let (code, uri, value): (String, Url, String) =
                serde_json::from_value(Value::Array(params.arguments)).map_err(|e| {
                    Error::invalid_params(format!("Invalid quick fix arguments: {}", e))
                })?;

            let applied = session.apply_quick_fix(&uri, &code, &value).await;
            Ok(Some(Value::Bool(applied)))
        }
        other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
    }
}
