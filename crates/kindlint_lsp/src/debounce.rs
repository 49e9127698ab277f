//! Debounced validation while typing.

use std::time::Duration;

use tokio::task::JoinHandle;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use crate::scheduler::LintOptions;
use crate::session::{Session, SharedSession};

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Spawns a debounced validation task.
///
/// The task waits for the debounce period and lints the document only if its
/// version has not moved on in the meantime.
pub fn spawn_debounced_validation(
    session: SharedSession,
    uri: Url,
    version: i32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(DEFAULT_DEBOUNCE_MS)).await;

        if check_version(&session, &uri, version) {
            session.validate(uri, LintOptions::default()).await;
        } else {
            debug!("Skipping stale validation of {} (version {})", uri, version);
        }
    })
}

/// Checks if the document version is still current.
fn check_version(session: &Session, uri: &Url, version: i32) -> bool {
    session
        .document(uri)
        .is_some_and(|doc| doc.version == version)
}
