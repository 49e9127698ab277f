//! Filetype profiles.
//!
//! A profile decides which parts of a document contain prose. The engine only
//! looks for words inside the returned byte ranges.

use std::ops::Range;

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};

use crate::EngineError;

/// How a document is read before checking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    /// The whole document is prose.
    #[default]
    Text,
    /// GFM Markdown; code blocks, inline code and raw HTML are skipped.
    Markdown,
    /// MDX; like Markdown, plus expressions and JSX are skipped.
    Mdx,
    /// HTML; tags, `<script>` and `<style>` bodies are skipped.
    Html,
}

impl Profile {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Mdx => "mdx",
            Self::Html => "html",
        }
    }

    /// Returns the byte ranges of `source` that should be checked.
    pub fn segments(self, source: &str) -> Result<Vec<Range<usize>>, EngineError> {
        match self {
            Self::Text => Ok(vec![0..source.len()]),
            Self::Markdown => mdast_segments(source, &ParseOptions::gfm()),
            Self::Mdx => mdast_segments(source, &ParseOptions::mdx()),
            Self::Html => Ok(html_segments(source)),
        }
    }
}

fn mdast_segments(source: &str, options: &ParseOptions) -> Result<Vec<Range<usize>>, EngineError> {
    let root = to_mdast(source, options).map_err(|e| EngineError::parse(e.to_string()))?;
    let mut out = Vec::new();
    collect_text(&root, &mut out);
    Ok(out)
}

fn collect_text(node: &Node, out: &mut Vec<Range<usize>>) {
    if let Node::Text(_) = node {
        if let Some(pos) = node.position() {
            out.push(pos.start.offset..pos.end.offset);
        }
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_text(child, out);
        }
    }
}

fn html_segments(source: &str) -> Vec<Range<usize>> {
    let lower = source.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while let Some(rel) = source[pos..].find('<') {
        let tag_start = pos + rel;
        if tag_start > text_start {
            out.push(text_start..tag_start);
        }

        let tag_end = match source[tag_start..].find('>') {
            Some(end) => tag_start + end + 1,
            None => return out,
        };

        let skip_to = ["script", "style"]
            .iter()
            .find(|name| raw_text_open(&lower[tag_start..tag_end], name))
            .and_then(|name| {
                let close = format!("</{}", name);
                lower[tag_end..].find(&close).map(|i| tag_end + i)
            });

        pos = match skip_to {
            Some(close_start) => match source[close_start..].find('>') {
                Some(end) => close_start + end + 1,
                None => return out,
            },
            None => tag_end,
        };
        text_start = pos;
    }

    if text_start < source.len() {
        out.push(text_start..source.len());
    }
    out
}

fn raw_text_open(tag: &str, name: &str) -> bool {
    tag.strip_prefix('<')
        .and_then(|rest| rest.strip_prefix(name))
        .is_some_and(|rest| rest.starts_with(|c: char| c == '>' || c.is_ascii_whitespace()))
}
