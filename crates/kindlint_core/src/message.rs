//! Messages reported by the engine.

use serde::{Deserialize, Serialize};

/// A 1-based line/column point. Either field may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl Point {
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
        }
    }
}

/// Start and end of a message. The end column is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: Point,
    pub end: Point,
}

/// A single finding.
///
/// Mirrors the shape of a vfile message: the flat `line`/`column` fields
/// duplicate `location.start` and are the fallback when the location is
/// incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Human-readable reason, possibly ending in "use `x`, `y` instead".
    pub reason: String,

    /// The rule that produced this message.
    pub rule_id: String,

    /// `Some(true)` when the message must be treated as an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    #[serde(default)]
    pub location: Location,
}

impl Message {
    /// Creates a message spanning `start..end`.
    pub fn new(
        rule_id: impl Into<String>,
        reason: impl Into<String>,
        start: Point,
        end: Point,
    ) -> Self {
        Self {
            reason: reason.into(),
            rule_id: rule_id.into(),
            fatal: None,
            line: start.line,
            column: start.column,
            location: Location { start, end },
        }
    }

    /// Marks the message as fatal.
    pub fn with_fatal(mut self, fatal: bool) -> Self {
        self.fatal = Some(fatal);
        self
    }
}
