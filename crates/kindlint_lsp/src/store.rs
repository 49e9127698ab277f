//! Per-document diagnostics, quick fixes and the last lint artifact.
//!
//! Every change to a document's diagnostics is published to the editor while
//! the store lock is held, so the editor sees the states in the order they
//! were stored.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::{Diagnostic, NumberOrString, Url};
use tracing::debug;

use kindlint_core::{Filetype, Settings};

use crate::client::HostClient;

/// A replacement offered for one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFix {
    pub label: String,
    pub value: String,
    pub id: String,
}

impl QuickFix {
    /// The `index`-th suggestion of a diagnostic.
    pub fn new(index: usize, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: format!("Change to `{}`", value),
            id: format!("fix-{}", index),
            value,
        }
    }
}

/// What the engine was run with on the last non-format pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LintArtifact {
    pub filetype: Filetype,
    pub settings: Settings,
    pub message_count: usize,
}

#[derive(Debug, Default)]
struct Entry {
    diagnostics: Vec<Diagnostic>,
    quick_fixes: HashMap<String, Vec<QuickFix>>,
    artifact: Option<LintArtifact>,
}

/// Returns the string code of a diagnostic.
pub fn code_of(diagnostic: &Diagnostic) -> Option<&str> {
    match diagnostic.code.as_ref()? {
        NumberOrString::String(code) => Some(code),
        NumberOrString::Number(_) => None,
    }
}

/// The family of a code: everything before the first `-`.
fn family(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Diagnostics and quick fixes per document.
pub struct DiagnosticStore {
    client: Arc<dyn HostClient>,
    entries: Mutex<HashMap<Url, Entry>>,
}

impl DiagnosticStore {
    pub fn new(client: Arc<dyn HostClient>) -> Self {
        Self {
            client,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the diagnostics and quick fixes of `uri` and publishes them.
    pub async fn replace_all(
        &self,
        uri: &Url,
        diagnostics: Vec<Diagnostic>,
        quick_fixes: HashMap<String, Vec<QuickFix>>,
    ) {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(uri.clone()).or_default();
        entry.diagnostics = diagnostics.clone();
        entry.quick_fixes = quick_fixes;

        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri.clone(), diagnostics).await;
    }

    /// Publishes an empty set, forgets the quick fixes and drops the artifact.
    /// Nothing is created for a document that has no entry.
    pub async fn clear(&self, uri: &Url) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(uri) {
            entry.diagnostics.clear();
            entry.quick_fixes.clear();
            entry.artifact = None;
        }

        self.client.publish_diagnostics(uri.clone(), Vec::new()).await;
    }

    /// Removes diagnostics from `uri` and republishes the rest.
    ///
    /// With `remove_all_of_family`, every diagnostic sharing the family of a
    /// removed code goes; otherwise only exact code matches. With
    /// `shift_from_line = Some(n)`, the remaining diagnostics starting on line
    /// `n` or later move down by one line.
    pub async fn remove(
        &self,
        to_remove: &[Diagnostic],
        uri: &Url,
        remove_all_of_family: bool,
        shift_from_line: Option<u32>,
    ) {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(uri.clone()).or_default();

        for removed in to_remove {
            let Some(code) = code_of(removed) else {
                continue;
            };
            entry.diagnostics.retain(|d| {
                let Some(kept) = code_of(d) else {
                    return true;
                };
                if remove_all_of_family {
                    family(kept) != family(code)
                } else {
                    kept != code
                }
            });
        }

        if let Some(line) = shift_from_line {
            for diagnostic in &mut entry.diagnostics {
                if diagnostic.range.start.line >= line {
                    diagnostic.range.start.line += 1;
                    diagnostic.range.end.line += 1;
                }
            }
        }

        let Entry {
            diagnostics,
            quick_fixes,
            ..
        } = entry;
        quick_fixes.retain(|code, _| {
            diagnostics
                .iter()
                .any(|d| code_of(d) == Some(code.as_str()))
        });

        let diagnostics = diagnostics.clone();
        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri.clone(), diagnostics).await;
    }

    /// Forgets everything about `uri` and publishes an empty set.
    pub async fn purge(&self, uri: &Url) {
        let mut entries = self.entries.lock().await;
        entries.remove(uri);
        self.client.publish_diagnostics(uri.clone(), Vec::new()).await;
    }

    pub async fn diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .await
            .get(uri)
            .map(|entry| entry.diagnostics.clone())
            .unwrap_or_default()
    }

    pub async fn quick_fixes(&self, uri: &Url) -> HashMap<String, Vec<QuickFix>> {
        self.entries
            .lock()
            .await
            .get(uri)
            .map(|entry| entry.quick_fixes.clone())
            .unwrap_or_default()
    }

    /// Finds the diagnostic of `uri` with the given code.
    pub async fn find(&self, uri: &Url, code: &str) -> Option<Diagnostic> {
        self.entries
            .lock()
            .await
            .get(uri)?
            .diagnostics
            .iter()
            .find(|d| code_of(d) == Some(code))
            .cloned()
    }

    pub async fn artifact(&self, uri: &Url) -> Option<LintArtifact> {
        self.entries.lock().await.get(uri)?.artifact.clone()
    }

    /// Records the artifact of the last pass. Ignored for documents with no
    /// stored diagnostics entry.
    pub async fn set_artifact(&self, uri: &Url, artifact: LintArtifact) {
        if let Some(entry) = self.entries.lock().await.get_mut(uri) {
            entry.artifact = Some(artifact);
        }
    }

    /// Whether anything is stored for `uri`.
    pub async fn contains(&self, uri: &Url) -> bool {
        self.entries.lock().await.contains_key(uri)
    }
}
