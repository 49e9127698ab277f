//! Lint pass error types.

use thiserror::Error;
use tower_lsp::lsp_types::Url;

use kindlint_core::EngineError;

/// Errors that can end a lint pass.
#[derive(Debug, Error)]
pub enum LintError {
    /// The URI does not name an open text document. This is a caller bug and
    /// is never retried.
    #[error("{0} is not an open text document")]
    InvalidDocument(Url),

    /// The engine rejected the settings or could not read the document.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The blocking lint task panicked or was cancelled.
    #[error("Lint task failed: {0}")]
    Join(String),
}
