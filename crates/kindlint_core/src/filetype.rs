//! Document filetypes.

use std::fmt;
use std::path::Path;

use crate::Profile;

/// The filetype of a document, as reported by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filetype {
    #[default]
    PlainText,
    Markdown,
    Mdx,
    Html,
    Latex,
    GitCommit,
    BbCode,
}

impl Filetype {
    /// Maps an LSP `languageId`. Unknown ids are treated as plain text.
    pub fn from_language_id(language_id: &str) -> Self {
        match language_id {
            "markdown" => Self::Markdown,
            "mdx" => Self::Mdx,
            "html" => Self::Html,
            "latex" => Self::Latex,
            "git-commit" | "gitcommit" => Self::GitCommit,
            "bbcode" => Self::BbCode,
            _ => Self::PlainText,
        }
    }

    /// Guesses the filetype from a file extension.
    pub fn from_path(path: &Path) -> Self {
        if path.file_name().is_some_and(|name| name == "COMMIT_EDITMSG") {
            return Self::GitCommit;
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "md" | "markdown" | "mdown" | "mkdn" | "mkd" => Self::Markdown,
            "mdx" => Self::Mdx,
            "html" | "htm" => Self::Html,
            "tex" | "latex" => Self::Latex,
            "bbcode" => Self::BbCode,
            _ => Self::PlainText,
        }
    }

    /// Returns the profile the engine uses for this filetype.
    pub fn profile(self) -> Profile {
        match self {
            Self::Markdown => Profile::Markdown,
            Self::Mdx => Profile::Mdx,
            Self::Html => Profile::Html,
            _ => Profile::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plaintext",
            Self::Markdown => "markdown",
            Self::Mdx => "mdx",
            Self::Html => "html",
            Self::Latex => "latex",
            Self::GitCommit => "gitcommit",
            Self::BbCode => "bbcode",
        }
    }
}

impl fmt::Display for Filetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
