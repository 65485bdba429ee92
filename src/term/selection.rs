// src/term/selection.rs

//! Pointer-driven text selection over the screen grid.
//!
//! The selection is a small state machine: `Idle` until a pointer-down
//! starts it, `Empty` while collapsed on the click cell, `Ready` once it has
//! a non-trivial or snapped extent. Raw endpoints keep pointer order; the
//! normalized range is recomputed on every extension and is what rendering
//! and extraction consume.
//!
//! Normalization of a linear selection spanning rows follows row order, not
//! column magnitude: the earlier row's column becomes the begin column even
//! when numerically larger (backward drags). Rectangular and same-row
//! selections use per-axis min/max.

use crate::glyph::AttrFlags;
use crate::term::screen::Screen;
use crate::term::snapshot::{Point, SelectionRange};
use log::trace;

/// Lifecycle state of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No selection gesture in progress or displayed.
    #[default]
    Idle,
    /// Pointer is down but the selection is still collapsed on one cell.
    Empty,
    /// The selection has a visible extent.
    Ready,
}

/// Shape of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    /// Stream selection following line flow.
    #[default]
    Linear,
    /// Rectangular block selection.
    Rectangular,
}

/// Snap granularity applied to both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    #[default]
    None,
    Word,
    Line,
}

/// The selection state: raw pointer-ordered endpoints plus the derived
/// normalized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub state: SelectionState,
    pub kind: SelectionKind,
    pub snap: SnapMode,
    /// First endpoint, in pointer order.
    pub raw_start: Point,
    /// Latest endpoint, in pointer order.
    pub raw_end: Point,
    /// Normalized (top-left / bottom-right) bounds; `None` until computed.
    pub normalized: Option<SelectionRange>,
    /// True if the selection was made on the alternate buffer.
    pub on_alt_screen: bool,
}

impl Selection {
    /// Resets to the idle state.
    pub fn clear(&mut self) {
        *self = Selection::default();
    }

    /// True while the selection should be highlighted.
    pub fn is_showing(&self) -> bool {
        self.state == SelectionState::Ready && self.normalized.is_some()
    }
}

impl Screen {
    /// Marks the rows covered by the current normalized range dirty, so the
    /// highlight is repainted.
    fn mark_dirty_for_selection(&mut self) {
        if let Some(range) = self.selection.normalized {
            for y in range.start.y..=range.end.y.min(self.height.saturating_sub(1)) {
                self.mark_line_dirty(y);
            }
        }
    }

    fn clamp_point(&self, point: Point) -> Point {
        Point {
            x: point.x.min(self.width.saturating_sub(1)),
            y: point.y.min(self.height.saturating_sub(1)),
        }
    }

    /// Starts a new selection at `point` (pointer down). Any previous
    /// selection is discarded and its rows marked dirty.
    pub fn selection_start(&mut self, point: Point, snap: SnapMode) {
        self.mark_dirty_for_selection();
        let point = self.clamp_point(point);
        self.selection = Selection {
            state: SelectionState::Empty,
            kind: SelectionKind::default(),
            snap,
            raw_start: point,
            raw_end: point,
            normalized: None,
            on_alt_screen: self.alt_screen_active,
        };
        trace!("selection started at ({}, {}), snap {:?}", point.x, point.y, snap);
    }

    /// Extends the selection to `point` (pointer move or release).
    ///
    /// Dragging promotes the selection to `Ready` and recomputes the
    /// normalized bounds. A release (`is_final`) with no movement and no
    /// snap reverts to `Idle`: a bare click selects nothing. With a snap
    /// granularity, a bare click still selects the snapped word or line.
    pub fn selection_extend(&mut self, point: Point, kind: SelectionKind, is_final: bool) {
        if self.selection.state == SelectionState::Idle {
            return;
        }
        let point = self.clamp_point(point);
        self.mark_dirty_for_selection();
        self.selection.kind = kind;
        self.selection.raw_end = point;

        let moved = self.selection.raw_end != self.selection.raw_start;
        if !moved && self.selection.snap == SnapMode::None {
            if is_final {
                self.selection.clear();
            }
            return;
        }

        self.selection.state = SelectionState::Ready;
        self.selection.normalized = Some(self.normalize_selection());
        self.mark_dirty_for_selection();
    }

    /// Clears the selection and marks its rows dirty.
    pub fn selection_clear(&mut self) {
        self.mark_dirty_for_selection();
        self.selection.clear();
    }

    /// Computes normalized bounds from the raw endpoints, then applies the
    /// snap granularity. Idempotent: raw endpoints are never modified.
    fn normalize_selection(&self) -> SelectionRange {
        let sel = &self.selection;
        let (a, b) = (sel.raw_start, sel.raw_end);

        let mut range = match sel.kind {
            SelectionKind::Rectangular => SelectionRange {
                start: Point { x: a.x.min(b.x), y: a.y.min(b.y) },
                end: Point { x: a.x.max(b.x), y: a.y.max(b.y) },
            },
            SelectionKind::Linear => {
                if a.y == b.y {
                    SelectionRange {
                        start: Point { x: a.x.min(b.x), y: a.y },
                        end: Point { x: a.x.max(b.x), y: a.y },
                    }
                } else if a.y < b.y {
                    SelectionRange { start: a, end: b }
                } else {
                    // Backward drag: the earlier row's column is the begin
                    // column even if numerically larger.
                    SelectionRange { start: b, end: a }
                }
            }
        };

        match sel.snap {
            SnapMode::None => {}
            SnapMode::Line => {
                range.start.x = 0;
                range.end.x = self.width.saturating_sub(1);
            }
            SnapMode::Word => {
                range.start = self.snap_word_left(range.start);
                range.end = self.snap_word_right(range.end);
            }
        }
        range
    }

    /// True if `ch` is a word delimiter for snap purposes. Space and empty
    /// cells always are.
    fn is_delimiter(&self, ch: char) -> bool {
        ch == ' ' || ch == '\0' || self.word_delimiters.contains(ch)
    }

    fn cell_char(&self, x: usize, y: usize) -> char {
        self.grid_for(self.selection.on_alt_screen)
            .get(y)
            .and_then(|row| row.get(x))
            .map(|g| g.c)
            .unwrap_or(' ')
    }

    /// Extends `point` leftward across a uniform run of delimiter or
    /// non-delimiter cells, stopping at the row edge.
    fn snap_word_left(&self, point: Point) -> Point {
        let target = self.is_delimiter(self.cell_char(point.x, point.y));
        let mut x = point.x;
        while x > 0 && self.is_delimiter(self.cell_char(x - 1, point.y)) == target {
            x -= 1;
        }
        Point { x, y: point.y }
    }

    /// Extends `point` rightward across a uniform run, stopping at the row
    /// edge.
    fn snap_word_right(&self, point: Point) -> Point {
        let target = self.is_delimiter(self.cell_char(point.x, point.y));
        let last = self.width.saturating_sub(1);
        let mut x = point.x;
        while x < last && self.is_delimiter(self.cell_char(x + 1, point.y)) == target {
            x += 1;
        }
        Point { x, y: point.y }
    }

    /// Whether the cell at `point` is inside the current selection, for
    /// rendering. Only meaningful on the buffer the selection was made on.
    pub fn is_selected(&self, point: Point) -> bool {
        if point.x >= self.width || point.y >= self.height {
            return false;
        }
        if self.selection.on_alt_screen != self.alt_screen_active {
            return false;
        }
        if !self.selection.is_showing() {
            return false;
        }
        let Some(range) = self.selection.normalized else {
            return false;
        };
        if point.y < range.start.y || point.y > range.end.y {
            return false;
        }
        match self.selection.kind {
            SelectionKind::Rectangular => point.x >= range.start.x && point.x <= range.end.x,
            SelectionKind::Linear => {
                if range.start.y == range.end.y {
                    point.x >= range.start.x && point.x <= range.end.x
                } else if point.y == range.start.y {
                    point.x >= range.start.x
                } else if point.y == range.end.y {
                    point.x <= range.end.x
                } else {
                    true
                }
            }
        }
    }

    /// Extracts the selected text.
    ///
    /// Interior rows of a linear selection contribute their full width;
    /// first/last rows are bounded by the normalized columns; rectangular
    /// selections apply both bounds to every row. Trailing spaces are
    /// trimmed per row unless the row soft-wraps (its last cell carries the
    /// wrap flag); soft-wrapped rows also join without a separator. The
    /// whole result is whitespace-trimmed once at the end.
    pub fn selection_text(&self) -> Option<String> {
        if !self.selection.is_showing() {
            return None;
        }
        let range = self.selection.normalized?;
        let on_alt = self.selection.on_alt_screen;
        let grid = self.grid_for(on_alt);
        let rectangular = self.selection.kind == SelectionKind::Rectangular;
        let last_col = self.width.saturating_sub(1);

        let mut out = String::new();
        for y in range.start.y..=range.end.y {
            let Some(row) = grid.get(y) else { break };

            let col_start = if rectangular || y == range.start.y {
                range.start.x
            } else {
                0
            };
            let col_end = if rectangular || y == range.end.y {
                range.end.x
            } else {
                last_col
            };

            let mut line = String::new();
            for x in col_start..=col_end.min(row.len().saturating_sub(1)) {
                let cell = row[x];
                if cell.attr.flags.contains(AttrFlags::WIDE_CONTINUATION) {
                    continue;
                }
                line.push(if cell.c == '\0' { ' ' } else { cell.c });
            }

            let wrapped = !rectangular && self.row_wrapped(y, on_alt);
            if !wrapped {
                while line.ends_with(' ') {
                    line.pop();
                }
            }
            out.push_str(&line);
            if y != range.end.y && !wrapped {
                out.push('\n');
            }
        }

        let trimmed = out.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::glyph::{Attributes, Glyph};

    fn screen_with_lines(lines: &[&str]) -> Screen {
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(1);
        let mut screen = Screen::new(width, lines.len(), &Config::default());
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                screen.set_glyph(x, y, Glyph::new(c, Attributes::default()));
            }
        }
        screen
    }

    fn point(x: usize, y: usize) -> Point {
        Point { x, y }
    }

    #[test]
    fn bare_click_without_snap_selects_nothing() {
        let mut screen = screen_with_lines(&["hello"]);
        screen.selection_start(point(2, 0), SnapMode::None);
        screen.selection_extend(point(2, 0), SelectionKind::Linear, true);
        assert_eq!(screen.selection.state, SelectionState::Idle);
        assert_eq!(screen.selection_text(), None);
    }

    #[test]
    fn drag_selects_span() {
        let mut screen = screen_with_lines(&["hello world"]);
        screen.selection_start(point(0, 0), SnapMode::None);
        screen.selection_extend(point(4, 0), SelectionKind::Linear, true);
        assert_eq!(screen.selection.state, SelectionState::Ready);
        assert_eq!(screen.selection_text(), Some("hello".to_string()));
    }

    #[test]
    fn backward_drag_across_rows_keeps_row_order() {
        let mut screen = screen_with_lines(&["abcde", "fghij"]);
        // Drag from (1, row 1) up to (3, row 0): begin must be (3, 0).
        screen.selection_start(point(1, 1), SnapMode::None);
        screen.selection_extend(point(3, 0), SelectionKind::Linear, true);
        let range = screen.selection.normalized.unwrap();
        assert_eq!(range.start, point(3, 0));
        assert_eq!(range.end, point(1, 1));
        assert_eq!(screen.selection_text(), Some("de\nfg".to_string()));
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut screen = screen_with_lines(&["abcde", "fghij"]);
        screen.selection_start(point(4, 1), SnapMode::Word);
        screen.selection_extend(point(0, 0), SelectionKind::Linear, false);
        let first = screen.selection.normalized;
        // Re-extending to the same point must not change the bounds.
        screen.selection_extend(point(0, 0), SelectionKind::Linear, true);
        assert_eq!(screen.selection.normalized, first);
    }

    #[test]
    fn word_snap_click_selects_word() {
        let mut screen = screen_with_lines(&["foo bar"]);
        // Click on each cell of "bar": snap must yield exactly "bar".
        for x in 4..=6 {
            screen.selection_start(point(x, 0), SnapMode::Word);
            screen.selection_extend(point(x, 0), SelectionKind::Linear, true);
            assert_eq!(
                screen.selection_text(),
                Some("bar".to_string()),
                "click at column {}",
                x
            );
        }
    }

    #[test]
    fn word_snap_on_delimiter_run_selects_the_run() {
        let mut screen = screen_with_lines(&["a   b"]);
        screen.selection_start(point(2, 0), SnapMode::Word);
        screen.selection_extend(point(2, 0), SelectionKind::Linear, true);
        let range = screen.selection.normalized.unwrap();
        assert_eq!(range.start, point(1, 0));
        assert_eq!(range.end, point(3, 0));
    }

    #[test]
    fn line_snap_selects_full_rows() {
        let mut screen = screen_with_lines(&["abc", "def"]);
        screen.selection_start(point(1, 0), SnapMode::Line);
        screen.selection_extend(point(1, 1), SelectionKind::Linear, true);
        assert_eq!(screen.selection_text(), Some("abc\ndef".to_string()));
    }

    #[test]
    fn rectangular_selection_extracts_block() {
        let mut screen = screen_with_lines(&["abcde", "fghij", "klmno"]);
        screen.selection_start(point(3, 2), SnapMode::None);
        screen.selection_extend(point(1, 0), SelectionKind::Rectangular, true);
        assert_eq!(screen.selection_text(), Some("bcd\nghi\nlmn".to_string()));
    }

    #[test]
    fn interior_rows_of_linear_selection_take_full_width() {
        let mut screen = screen_with_lines(&["abc", "def", "ghi"]);
        screen.selection_start(point(2, 0), SnapMode::None);
        screen.selection_extend(point(0, 2), SelectionKind::Linear, true);
        assert_eq!(screen.selection_text(), Some("c\ndef\ng".to_string()));
    }

    #[test]
    fn trailing_spaces_trimmed_except_on_wrapped_rows() {
        let mut screen = screen_with_lines(&["ab   ", "cd   "]);
        screen.selection_start(point(0, 0), SnapMode::None);
        screen.selection_extend(point(4, 1), SelectionKind::Linear, true);
        assert_eq!(screen.selection_text(), Some("ab\ncd".to_string()));

        // Mark row 0 as soft-wrapped: its trailing spaces are content and
        // no separator is inserted.
        screen.set_row_wrapped(0);
        screen.selection_start(point(0, 0), SnapMode::None);
        screen.selection_extend(point(1, 1), SelectionKind::Linear, true);
        assert_eq!(screen.selection_text(), Some("ab   cd".to_string()));
    }

    #[test]
    fn is_selected_tracks_linear_shape() {
        let mut screen = screen_with_lines(&["abcde", "fghij", "klmno"]);
        screen.selection_start(point(3, 0), SnapMode::None);
        screen.selection_extend(point(1, 2), SelectionKind::Linear, false);
        assert!(screen.is_selected(point(3, 0)));
        assert!(screen.is_selected(point(4, 0)));
        assert!(!screen.is_selected(point(2, 0)));
        assert!(screen.is_selected(point(0, 1)));
        assert!(screen.is_selected(point(4, 1)));
        assert!(screen.is_selected(point(1, 2)));
        assert!(!screen.is_selected(point(2, 2)));
    }

    #[test]
    fn selection_does_not_show_on_other_buffer() {
        let mut screen = screen_with_lines(&["abcde"]);
        screen.selection_start(point(0, 0), SnapMode::None);
        screen.selection_extend(point(3, 0), SelectionKind::Linear, true);
        assert!(screen.is_selected(point(1, 0)));
        screen.enter_alt_screen(true, false);
        assert!(!screen.is_selected(point(1, 0)));
        screen.exit_alt_screen(false);
        assert!(screen.is_selected(point(1, 0)));
    }

    #[test]
    fn out_of_bounds_points_clamp_and_never_panic() {
        let mut screen = screen_with_lines(&["abc", "de"]);
        screen.selection_start(point(100, 100), SnapMode::None);
        screen.selection_extend(point(0, 0), SelectionKind::Linear, true);
        assert!(screen.selection_text().is_some());
        assert!(!screen.is_selected(point(50, 0)));
    }

    #[test]
    fn wide_continuation_cells_are_skipped_in_extraction() {
        let mut screen = screen_with_lines(&["a\u{0}b"]);
        // Fake a wide pair: mark cell 0 wide and cell 1 as continuation.
        let mut wide = Glyph::new('世', Attributes::default());
        wide.attr.flags.insert(AttrFlags::WIDE);
        screen.set_glyph(0, 0, wide);
        let mut spacer = Glyph::new('\0', Attributes::default());
        spacer.attr.flags.insert(AttrFlags::WIDE_CONTINUATION);
        screen.set_glyph(1, 0, spacer);

        screen.selection_start(point(0, 0), SnapMode::None);
        screen.selection_extend(point(2, 0), SelectionKind::Linear, true);
        assert_eq!(screen.selection_text(), Some("世b".to_string()));
    }
}
