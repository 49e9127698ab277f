//! Linter settings.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Minimum sureness a profanity must have before it is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfanitySureness {
    /// Report every profanity, even unlikely ones.
    #[default]
    Unlikely,
    /// Report profanities that are maybe or likely profane.
    Maybe,
    /// Report only words that are likely profane.
    Likely,
}

/// When the language server re-lints a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Lint while typing (debounced).
    #[default]
    #[serde(rename = "onType")]
    OnType,
    /// Lint when the document is saved.
    #[serde(rename = "onSave")]
    OnSave,
}

/// Settings for a lint run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Rule ids that are never reported.
    pub allow: Vec<String>,

    /// When non-empty, only these rule ids are reported.
    pub deny: Vec<String>,

    /// Also flag binary pronouns (`he`, `she`, ...).
    pub no_binary: bool,

    /// Minimum profanity sureness to report.
    pub profanity_sureness: ProfanitySureness,

    /// Re-lint strategy used by the language server.
    pub strategy: Strategy,
}

impl Settings {
    /// Workspace settings file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".kindlintrc.jsonc", ".kindlintrc.json"];

    /// Finds a settings file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads settings from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| EngineError::config(format!("Failed to read settings: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses settings from JSON. Comments and trailing commas are allowed.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| EngineError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Converts a JSON value, as returned by `workspace/configuration`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, EngineError> {
        let settings: Self = serde_json::from_value(value)
            .map_err(|e| EngineError::config(format!("Invalid settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the settings can be used by the engine.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.allow.is_empty() && !self.deny.is_empty() {
            return Err(EngineError::config(
                "`allow` and `deny` cannot both be set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.allow.is_empty());
        assert_eq!(settings.profanity_sureness, ProfanitySureness::Unlikely);
        assert_eq!(settings.strategy, Strategy::OnType);
    }

    #[test]
    fn test_settings_from_json_camel_case() {
        let json = r#"{
            // editor settings
            "allow": ["master"],
            "noBinary": true,
            "profanitySureness": "likely",
            "strategy": "onSave",
        }"#;

        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.allow, vec!["master".to_string()]);
        assert!(settings.no_binary);
        assert_eq!(settings.profanity_sureness, ProfanitySureness::Likely);
        assert_eq!(settings.strategy, Strategy::OnSave);
    }

    #[test]
    fn test_settings_empty_document() {
        assert_eq!(Settings::from_json("").unwrap(), Settings::default());
    }

    #[test]
    fn test_settings_allow_and_deny_conflict() {
        let json = r#"{ "allow": ["master"], "deny": ["slave"] }"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_settings_from_value_rejects_wrong_type() {
        let value = serde_json::json!({ "noBinary": "yes" });
        assert!(Settings::from_value(value).is_err());
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".kindlintrc.json"), "{}").unwrap();
        fs::write(dir.path().join(".kindlintrc.jsonc"), "{}").unwrap();

        let found = Settings::discover(dir.path()).unwrap();
        assert!(found.ends_with(".kindlintrc.jsonc"));
    }

    #[test]
    fn test_discover_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::discover(dir.path()).is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".kindlintrc.json");
        fs::write(&path, r#"{ "deny": ["whitelist"] }"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.deny, vec!["whitelist".to_string()]);
    }
}
