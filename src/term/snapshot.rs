// src/term/snapshot.rs

//! Data structures representing snapshots of terminal state for rendering:
//! grid points, lines, cursor, and selection ranges.

use crate::glyph::Glyph;
use std::ops::Index;
use std::sync::Arc;

/// Represents a 2D point in the terminal grid (column, row), 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// The column (x-coordinate).
    pub x: usize,
    /// The row (y-coordinate).
    pub y: usize,
}

/// Normalized selection bounds: `start` is the top-left endpoint, `end` the
/// bottom-right (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    pub start: Point,
    pub end: Point,
}

/// A snapshot of a single line in the terminal grid.
///
/// Uses `Arc<Vec<Glyph>>` for copy-on-write semantics: cloning a line just
/// bumps the reference count, while the screen mutates rows through
/// `Arc::make_mut`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine {
    pub is_dirty: bool,
    pub cells: Arc<Vec<Glyph>>,
}

impl Index<usize> for SnapshotLine {
    type Output = Glyph;

    fn index(&self, column_index: usize) -> &Self::Output {
        &self.cells[column_index]
    }
}

impl SnapshotLine {
    /// Creates a new `SnapshotLine` from an existing row Arc (cheap clone).
    pub fn from_arc(cells: Arc<Vec<Glyph>>, is_dirty: bool) -> Self {
        Self { is_dirty, cells }
    }
}

/// Cursor shape reported to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Block,
    Underline,
    Bar,
}

/// Information needed by the renderer to draw the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorRenderState {
    /// Physical column of the cell the cursor is on.
    pub x: usize,
    /// Physical row.
    pub y: usize,
    pub shape: CursorShape,
    /// Character in the cell under the cursor (could be space).
    pub cell_char_underneath: char,
}

/// A complete snapshot of the terminal's visible state at a moment in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSnapshot {
    /// (columns, rows).
    pub dimensions: (usize, usize),
    pub lines: Vec<SnapshotLine>,
    /// `None` while the cursor is hidden or scrolled out of view.
    pub cursor_state: Option<CursorRenderState>,
    /// Normalized selection bounds, if a selection is showing.
    pub selection: Option<SelectionRange>,
}

impl TerminalSnapshot {
    /// Gets the glyph at `p` if it lies within the snapshot dimensions.
    pub fn get_glyph(&self, p: Point) -> Option<Glyph> {
        let (term_width, term_height) = self.dimensions;
        if p.x >= term_width || p.y >= term_height {
            return None;
        }
        Some(self.lines[p.y][p.x])
    }
}
