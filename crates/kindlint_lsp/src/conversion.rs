//! LSP position helpers.

use tower_lsp::lsp_types::{Position, Range};

/// Helper to compare Positions (p1 <= p2)
pub fn positions_le(p1: Position, p2: Position) -> bool {
    p1.line < p2.line || (p1.line == p2.line && p1.character <= p2.character)
}

/// Whether two ranges share at least one position. Touching ranges overlap.
pub fn ranges_overlap(a: Range, b: Range) -> bool {
    positions_le(a.start, b.end) && positions_le(b.start, a.end)
}
