//! Byte offset to line/column conversion.

use crate::Point;

/// Line start table for a source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Converts a byte offset to a 1-based point. Columns count UTF-16 code
    /// units so they line up with LSP positions.
    pub fn point(&self, offset: usize) -> Option<Point> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column: usize = self.text[start..offset]
            .chars()
            .filter(|&ch| ch != '\r')
            .map(char::len_utf16)
            .sum();

        Some(Point::new(line as u32 + 1, column as u32 + 1))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
