//! Settings change handlers.

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use crate::config::{is_config_path, reload_config};
use crate::session::Session;

/// Handles the `workspace/didChangeWatchedFiles` notification.
///
/// Returns whether a settings file changed.
pub fn handle_did_change_watched_files(
    session: &Session,
    params: DidChangeWatchedFilesParams,
) -> bool {
    debug!("Watched files changed: {:?}", params.changes);

    let config_changed = params
        .changes
        .iter()
        .any(|change| is_config_path(change.uri.path()));

    if config_changed {
        info!("Configuration file changed, reloading...");
        reload_config(session);
        session.invalidate_settings(None);
    }
    config_changed
}

/// Handles the `workspace/didChangeConfiguration` notification.
pub fn handle_did_change_configuration(session: &Session, _params: DidChangeConfigurationParams) {
    info!("Editor configuration changed");
    session.invalidate_settings(None);
}
