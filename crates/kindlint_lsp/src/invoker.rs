//! Runs the engine on a document and translates its messages.

use std::collections::HashMap;

use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, TextEdit, Url,
};
use tracing::debug;

use kindlint_core::{Engine, Message, Point, Settings};

use crate::LintError;
use crate::session::Document;
use crate::store::{LintArtifact, QuickFix, code_of};

/// Source attached to every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "kindlint";

/// Prefix of diagnostic codes. Codes are `kindlint-1`, `kindlint-2`, ...
pub const CODE_PREFIX: &str = "kindlint";

/// A message reason split into its text and the suggested replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReason {
    pub result: String,
    pub replace: Vec<String>,
}

/// Splits `reason` on `", use"` and keeps the backtick-quoted values after it.
pub fn parse_reason(reason: &str) -> ParsedReason {
    let mut parts = reason.split(", use");
    let result = parts.next().unwrap_or_default().to_string();
    let replace = parts
        .next()
        .map(|rest| {
            rest.split('`')
                .skip(1)
                .step_by(2)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ParsedReason { result, replace }
}

/// Result of one engine run.
#[derive(Debug, Clone)]
pub struct LintOutput {
    pub diagnostics: Vec<Diagnostic>,
    pub quick_fixes: HashMap<String, Vec<QuickFix>>,
    pub artifact: LintArtifact,
}

impl LintOutput {
    /// One edit per diagnostic with exactly one suggestion, last in the
    /// document first.
    pub fn format_edits(&self) -> Vec<TextEdit> {
        let mut edits: Vec<TextEdit> = self
            .diagnostics
            .iter()
            .filter_map(|diagnostic| {
                let fixes = self.quick_fixes.get(code_of(diagnostic)?)?;
                match fixes.as_slice() {
                    [fix] => Some(TextEdit {
                        range: diagnostic.range,
                        new_text: fix.value.clone(),
                    }),
                    _ => None,
                }
            })
            .collect();

        edits.sort_by(|a, b| {
            (b.range.start.line, b.range.start.character)
                .cmp(&(a.range.start.line, a.range.start.character))
        });
        edits
    }
}

/// Runs the engine for documents.
#[derive(Debug, Default)]
pub struct LintInvoker;

impl LintInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Lints `document` with `settings`.
    ///
    /// The engine runs on the blocking pool.
    pub async fn run(
        &self,
        uri: &Url,
        document: Option<&Document>,
        settings: &Settings,
    ) -> Result<LintOutput, LintError> {
        let document = document.ok_or_else(|| LintError::InvalidDocument(uri.clone()))?;
        let filetype = document.filetype;
        let text = document.text.clone();
        let engine_settings = settings.clone();

        let report = tokio::task::spawn_blocking(move || {
            let engine = Engine::new(engine_settings)?;
            engine.check(&text, filetype.profile())
        })
        .await
        .map_err(|e| LintError::Join(e.to_string()))??;

        debug!(
            "{} ({}): {} messages",
            uri,
            filetype,
            report.messages.len()
        );

        let mut diagnostics = Vec::with_capacity(report.messages.len());
        let mut quick_fixes = HashMap::new();
        for (i, message) in report.messages.iter().enumerate() {
            let code = format!("{}-{}", CODE_PREFIX, i + 1);
            let reason = parse_reason(&message.reason);

            if !reason.replace.is_empty() {
                let fixes = reason
                    .replace
                    .iter()
                    .enumerate()
                    .map(|(j, value)| QuickFix::new(j, value.as_str()))
                    .collect();
                quick_fixes.insert(code.clone(), fixes);
            }

            diagnostics.push(to_diagnostic(message, code, reason.result));
        }

        Ok(LintOutput {
            diagnostics,
            quick_fixes,
            artifact: LintArtifact {
                filetype,
                settings: settings.clone(),
                message_count: report.messages.len(),
            },
        })
    }
}

fn to_diagnostic(message: &Message, code: String, text: String) -> Diagnostic {
    let severity = if message.fatal == Some(true) {
        DiagnosticSeverity::ERROR
    } else {
        DiagnosticSeverity::WARNING
    };

    Diagnostic {
        range: Range::new(
            to_position(message.location.start, message),
            to_position(message.location.end, message),
        ),
        severity: Some(severity),
        code: Some(NumberOrString::String(code)),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: text,
        ..Default::default()
    }
}

/// Converts a 1-based point to a 0-based position. Unknown or zero fields
/// fall back to the message's own line and column, then to 1.
fn to_position(point: Point, message: &Message) -> Position {
    let known = |value: Option<u32>| value.filter(|&n| n > 0);
    let line = known(point.line).or(known(message.line)).unwrap_or(1);
    let column = known(point.column).or(known(message.column)).unwrap_or(1);
    Position::new(line - 1, column - 1)
}
