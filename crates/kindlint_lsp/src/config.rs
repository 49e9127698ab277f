//! Workspace settings file handling.

use tracing::{error, info};

use kindlint_core::Settings;

use crate::session::Session;

/// Reloads the settings file from the workspace root.
///
/// A missing file clears the workspace settings. A file that fails to parse
/// leaves the previous settings in place.
pub fn reload_config(session: &Session) {
    let Some(root) = session.workspace_root.read().clone() else {
        return;
    };

    let Some(config_path) = Settings::discover(&root) else {
        *session.workspace_settings.write() = None;
        return;
    };

    info!("Found config file: {}", config_path.display());
    match Settings::from_file(&config_path) {
        Ok(settings) => {
            *session.workspace_settings.write() = Some(settings);
            info!("Loaded configuration from workspace");
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
        }
    }
}

/// Whether `path` names a workspace settings file.
pub fn is_config_path(path: &str) -> bool {
    Settings::CONFIG_FILES
        .iter()
        .any(|name| path.ends_with(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;

    use kindlint_core::ProfanitySureness;

    use crate::test_utils::RecordingClient;

    fn session_in(root: &std::path::Path) -> Session {
        let session = Session::new(Arc::new(RecordingClient::default()));
        *session.workspace_root.write() = Some(root.to_path_buf());
        session
    }

    #[test]
    fn test_reload_reads_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".kindlintrc.jsonc"),
            "{\n  // stricter\n  \"profanitySureness\": \"likely\",\n}\n",
        )
        .unwrap();

        let session = session_in(dir.path());
        reload_config(&session);

        let settings = session.workspace_settings.read().clone().unwrap();
        assert_eq!(settings.profanity_sureness, ProfanitySureness::Likely);
    }

    #[test]
    fn test_reload_keeps_previous_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".kindlintrc.json");
        fs::write(&path, r#"{ "noBinary": true }"#).unwrap();

        let session = session_in(dir.path());
        reload_config(&session);

        fs::write(&path, "{ not json").unwrap();
        reload_config(&session);
        assert!(session.workspace_settings.read().as_ref().unwrap().no_binary);

        fs::remove_file(&path).unwrap();
        reload_config(&session);
        assert!(session.workspace_settings.read().is_none());
    }

    #[test]
    fn test_is_config_path() {
        assert!(is_config_path("/work/.kindlintrc.json"));
        assert!(is_config_path("/work/.kindlintrc.jsonc"));
        assert!(!is_config_path("/work/kindlint.toml"));
    }
}
