// src/term/screen.rs

//! Represents the state of the terminal screen: display grids, scrollback,
//! scrolling region, tab stops, and dirty-row tracking.
//!
//! `Screen` manages the visual state only. Cursor position and attributes
//! are handled by `term::cursor::CursorController`; clearing operations use
//! the `default_attributes` field, which the emulator keeps in sync with the
//! current SGR state. Rows are `Arc`-shared for copy-on-write snapshots:
//! cloning a row is a reference-count bump, mutation goes through
//! `Arc::make_mut`.

use std::cmp::min;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::Config;
use crate::glyph::{AttrFlags, Attributes, Glyph};
use crate::term::selection::Selection;
use log::{trace, warn};

/// A single row of the grid, shared copy-on-write.
pub type Row = Arc<Vec<Glyph>>;
/// A grid of rows (primary or alternate screen).
pub type Grid = VecDeque<Row>;

/// Defines the modes for clearing tab stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClearMode {
    /// Clear the tab stop at the current cursor column.
    CurrentColumn,
    /// Clear all tab stops.
    All,
    /// Unsupported or unknown mode.
    Unsupported,
}

impl From<u16> for TabClearMode {
    fn from(value: u16) -> Self {
        match value {
            0 => TabClearMode::CurrentColumn,
            2 | 3 | 5 => TabClearMode::All,
            _ => {
                warn!("unsupported tab clear mode value: {}", value);
                TabClearMode::Unsupported
            }
        }
    }
}

/// The terminal screen state: primary and alternate grids, scrollback,
/// scrolling region, tab stops and dirty flags.
#[derive(Debug, Clone)]
pub(crate) struct Screen {
    /// The primary screen grid.
    pub grid: Grid,
    /// The alternate screen grid, used by full-screen applications.
    pub alt_grid: Grid,
    /// Scrollback ring; rows that have scrolled off the primary screen,
    /// oldest first.
    pub scrollback: VecDeque<Row>,
    /// Maximum number of rows retained in the scrollback ring.
    scrollback_limit: usize,
    /// True if the alternate screen is currently active.
    pub alt_screen_active: bool,
    /// Screen width in columns.
    pub width: usize,
    /// Screen height in rows.
    pub height: usize,
    /// Top margin of the scrolling region (0-based, inclusive).
    scroll_top: usize,
    /// Bottom margin of the scrolling region (0-based, inclusive).
    scroll_bot: usize,
    /// Tab stops; `tabs[i]` is true if column `i` is a tab stop.
    tabs: Vec<bool>,
    /// Interval used when regenerating default tab stops.
    tabspaces: usize,
    /// Dirty flags, one per row.
    pub dirty: Vec<bool>,
    /// Attributes used for new or cleared glyphs; kept in sync with the
    /// cursor's SGR state by the emulator.
    pub default_attributes: Attributes,
    /// Current selection state; methods live in `term::selection`.
    pub selection: Selection,
    /// Word-delimiter characters for snap selection (from `Config`).
    pub(super) word_delimiters: String,
}

impl Screen {
    /// Creates a new `Screen` sized `width` x `height` (each clamped to at
    /// least 1), with all rows initially dirty.
    pub fn new(width: usize, height: usize, config: &Config) -> Self {
        let w = width.max(1);
        let h = height.max(1);
        let default_attributes = Attributes::default();
        let fill = Glyph::blank(default_attributes);

        trace!(
            "creating screen {}x{}, scrollback {}",
            w,
            h,
            config.scrollback_lines
        );

        let grid: Grid = (0..h).map(|_| Arc::new(vec![fill; w])).collect();
        let alt_grid: Grid = (0..h).map(|_| Arc::new(vec![fill; w])).collect();

        let mut screen = Screen {
            grid,
            alt_grid,
            scrollback: VecDeque::new(),
            scrollback_limit: config.scrollback_lines,
            alt_screen_active: false,
            width: w,
            height: h,
            scroll_top: 0,
            scroll_bot: h.saturating_sub(1),
            tabs: vec![false; w],
            tabspaces: config.tabspaces.max(1),
            dirty: vec![true; h],
            default_attributes,
            selection: Selection::default(),
            word_delimiters: config.word_delimiters.clone(),
        };
        screen.init_tabstops();
        screen
    }

    fn init_tabstops(&mut self) {
        self.tabs.iter_mut().for_each(|t| *t = false);
        for i in (self.tabspaces..self.width).step_by(self.tabspaces) {
            self.tabs[i] = true;
        }
    }

    /// Returns a mutable reference to the currently active grid.
    pub fn active_grid_mut(&mut self) -> &mut Grid {
        if self.alt_screen_active {
            &mut self.alt_grid
        } else {
            &mut self.grid
        }
    }

    /// Returns the currently active grid.
    pub fn active_grid(&self) -> &Grid {
        if self.alt_screen_active {
            &self.alt_grid
        } else {
            &self.grid
        }
    }

    /// Returns the grid for the given buffer (`true` = alternate).
    pub fn grid_for(&self, alt: bool) -> &Grid {
        if alt {
            &self.alt_grid
        } else {
            &self.grid
        }
    }

    /// 0-based top row of the scrolling region.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// 0-based bottom row of the scrolling region.
    pub fn scroll_bot(&self) -> usize {
        self.scroll_bot
    }

    /// The glyph used for filling cleared areas.
    fn default_fill_glyph(&self) -> Glyph {
        Glyph::blank(self.default_attributes)
    }

    /// Fills `[x_start, x_end)` of row `y` with `fill_glyph`.
    pub fn fill_region_with_glyph(
        &mut self,
        y: usize,
        x_start: usize,
        x_end: usize,
        fill_glyph: Glyph,
    ) {
        if y >= self.height {
            warn!(
                "fill_region_with_glyph: row {} out of bounds (height {})",
                y, self.height
            );
            return;
        }
        let width = self.width;
        let start = min(x_start, width);
        let end = min(x_end, width);
        if start < end {
            if let Some(row_arc) = self.active_grid_mut().get_mut(y) {
                let row = Arc::make_mut(row_arc);
                for cell in row[start..end].iter_mut() {
                    *cell = fill_glyph;
                }
            }
        }
        self.mark_line_dirty(y);
    }

    /// Clears `[x_start, x_end)` of row `y` with the current background.
    pub fn clear_line_segment(&mut self, y: usize, x_start: usize, x_end: usize) {
        let fill = self.default_fill_glyph();
        self.fill_region_with_glyph(y, x_start, x_end, fill);
    }

    /// Fills the whole screen with `c` (DECALN alignment pattern).
    pub fn fill_screen_with(&mut self, c: char) {
        let glyph = Glyph::new(c, self.default_attributes);
        for y in 0..self.height {
            self.fill_region_with_glyph(y, 0, self.width, glyph);
        }
    }

    /// Scrolls the region up by `n` rows. Rows leaving the region bottom
    /// are discarded; rows leaving the true top of the primary screen are
    /// pushed into scrollback (oldest evicted at capacity) when
    /// `save_to_history` is set. The alternate screen never feeds
    /// scrollback.
    pub fn scroll_up(&mut self, n: usize, save_to_history: bool) {
        if self.scroll_top > self.scroll_bot || self.scroll_bot >= self.height {
            warn!(
                "scroll_up: invalid scroll region top={}, bot={}, height={}",
                self.scroll_top, self.scroll_bot, self.height
            );
            return;
        }
        let n_val = n.min(self.scroll_bot - self.scroll_top + 1);
        if n_val == 0 {
            return;
        }
        trace!(
            "scrolling up {} rows in region ({}, {})",
            n_val,
            self.scroll_top,
            self.scroll_bot
        );

        let fill = self.default_fill_glyph();
        let width = self.width;
        let scroll_top = self.scroll_top;
        let scroll_bot = self.scroll_bot;
        let capture = save_to_history
            && scroll_top == 0
            && !self.alt_screen_active
            && self.scrollback_limit > 0;

        let active_grid = if self.alt_screen_active {
            &mut self.alt_grid
        } else {
            &mut self.grid
        };

        for _ in 0..n_val {
            // When the region top is row 0 this is pop_front, O(1).
            if let Some(row) = active_grid.remove(scroll_top) {
                if capture {
                    self.scrollback.push_back(row);
                    if self.scrollback.len() > self.scrollback_limit {
                        self.scrollback.pop_front();
                    }
                }
            }
        }

        let insert_idx = scroll_bot + 1 - n_val;
        for _ in 0..n_val {
            active_grid.insert(insert_idx, Arc::new(vec![fill; width]));
        }

        for y in scroll_top..=scroll_bot {
            self.dirty[y] = true;
        }
    }

    /// Scrolls the region down by `n` rows; new rows at the region top are
    /// cleared with the current background.
    pub fn scroll_down(&mut self, n: usize) {
        if self.scroll_top > self.scroll_bot || self.scroll_bot >= self.height {
            warn!(
                "scroll_down: invalid scroll region top={}, bot={}, height={}",
                self.scroll_top, self.scroll_bot, self.height
            );
            return;
        }
        let n_val = n.min(self.scroll_bot - self.scroll_top + 1);
        if n_val == 0 {
            return;
        }

        let fill = self.default_fill_glyph();
        let width = self.width;
        let scroll_top = self.scroll_top;
        let scroll_bot = self.scroll_bot;

        let active_grid = if self.alt_screen_active {
            &mut self.alt_grid
        } else {
            &mut self.grid
        };

        for _ in 0..n_val {
            active_grid.remove(scroll_bot);
            active_grid.insert(scroll_top, Arc::new(vec![fill; width]));
        }

        for y in scroll_top..=scroll_bot {
            self.dirty[y] = true;
        }
    }

    /// Inserts `n` blank cells at `(x, y)`, shifting the row tail right
    /// (ICH and insert-mode printing).
    pub fn insert_blank_chars_in_line(&mut self, y: usize, x: usize, n: usize) {
        if y >= self.height {
            warn!(
                "insert_blank_chars_in_line: row {} out of bounds (height {})",
                y, self.height
            );
            return;
        }
        let width = self.width;
        if x >= width || n == 0 {
            return;
        }
        let count = n.min(width - x);
        let fill = self.default_fill_glyph();

        if let Some(row_arc) = self.active_grid_mut().get_mut(y) {
            let row = Arc::make_mut(row_arc);
            row[x..].rotate_right(count);
            for cell in row[x..x + count].iter_mut() {
                *cell = fill;
            }
        }
        self.mark_line_dirty(y);
    }

    /// Deletes `n` cells at `(x, y)`, shifting the row tail left and
    /// back-filling with the current background (DCH).
    pub fn delete_chars_in_line(&mut self, y: usize, x: usize, n: usize) {
        if y >= self.height {
            warn!(
                "delete_chars_in_line: row {} out of bounds (height {})",
                y, self.height
            );
            return;
        }
        let width = self.width;
        if x >= width || n == 0 {
            return;
        }
        let count = n.min(width - x);
        let fill = self.default_fill_glyph();

        if let Some(row_arc) = self.active_grid_mut().get_mut(y) {
            let row = Arc::make_mut(row_arc);
            row[x..].rotate_left(count);
            for cell in row[width - count..].iter_mut() {
                *cell = fill;
            }
        }
        self.mark_line_dirty(y);
    }

    /// Resizes both grids, anchored top-left: truncates or pads rows and
    /// columns, resets the scrolling region, regenerates tab stops, and
    /// marks the whole screen dirty. Scrollback rows keep their content but
    /// are width-adjusted.
    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        let nw = new_width.max(1);
        let nh = new_height.max(1);
        if nw == self.width && nh == self.height {
            return;
        }

        self.selection.clear();
        let fill = self.default_fill_glyph();
        let old_height = self.height;

        if nw != self.width {
            for row_arc in self.scrollback.iter_mut() {
                Arc::make_mut(row_arc).resize(nw, fill);
            }
        }

        let resize_grid = |old: &Grid| -> Grid {
            let mut new_grid: Grid = (0..nh).map(|_| Arc::new(vec![fill; nw])).collect();
            for (y, slot) in new_grid.iter_mut().enumerate().take(min(old_height, nh)) {
                if let Some(old_row) = old.get(y) {
                    let mut row = vec![fill; nw];
                    let copy_len = min(old_row.len(), nw);
                    row[..copy_len].copy_from_slice(&old_row[..copy_len]);
                    *slot = Arc::new(row);
                }
            }
            new_grid
        };

        self.grid = resize_grid(&self.grid);
        self.alt_grid = resize_grid(&self.alt_grid);
        self.width = nw;
        self.height = nh;
        self.scroll_top = 0;
        self.scroll_bot = nh.saturating_sub(1);
        self.tabs = vec![false; nw];
        self.init_tabstops();
        self.dirty = vec![true; nh];

        trace!("screen resized to {}x{}, all rows dirty", nw, nh);
    }

    pub fn mark_all_clean(&mut self) {
        self.dirty.fill(false);
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    pub fn mark_line_dirty(&mut self, y: usize) {
        if y < self.dirty.len() {
            self.dirty[y] = true;
        } else {
            warn!(
                "mark_line_dirty: row {} out of bounds (height {})",
                y, self.height
            );
        }
    }

    /// Dirty flag of row `y` (render interface).
    pub fn is_dirty(&self, y: usize) -> bool {
        self.dirty.get(y).copied().unwrap_or(false)
    }

    /// Clears the dirty flag of row `y` (render interface).
    pub fn clear_dirty(&mut self, y: usize) {
        if y < self.dirty.len() {
            self.dirty[y] = false;
        }
    }

    /// Switches to the alternate screen, optionally clearing it.
    pub fn enter_alt_screen(&mut self, clear_alt_screen: bool, clear_selection: bool) {
        if self.alt_screen_active {
            return;
        }
        if clear_selection {
            self.selection.clear();
        }
        self.alt_screen_active = true;
        if clear_alt_screen {
            let fill = self.default_fill_glyph();
            for y in 0..self.height {
                self.fill_region_with_glyph(y, 0, self.width, fill);
            }
        }
        self.mark_all_dirty();
        trace!("entered alt screen");
    }

    /// Switches back to the primary screen.
    pub fn exit_alt_screen(&mut self, clear_selection: bool) {
        if !self.alt_screen_active {
            return;
        }
        if clear_selection {
            self.selection.clear();
        }
        self.alt_screen_active = false;
        self.mark_all_dirty();
        trace!("exited alt screen");
    }

    /// Sets the scrolling region from 1-based inclusive bounds; invalid
    /// regions reset to the full screen.
    pub fn set_scrolling_region(&mut self, top_1_based: usize, bottom_1_based: usize) {
        let t = top_1_based.saturating_sub(1);
        let b = bottom_1_based.saturating_sub(1);
        if t < b && b < self.height {
            self.scroll_top = t;
            self.scroll_bot = b;
        } else {
            self.scroll_top = 0;
            self.scroll_bot = self.height.saturating_sub(1);
            warn!(
                "invalid scrolling region ({}, {}), reset to full screen",
                top_1_based, bottom_1_based
            );
        }
    }

    /// Writes one glyph at `(x, y)` and marks the row dirty.
    pub fn set_glyph(&mut self, x: usize, y: usize, glyph: Glyph) {
        if y >= self.height || x >= self.width {
            warn!(
                "set_glyph: ({},{}) out of screen bounds ({}x{})",
                x, y, self.width, self.height
            );
            return;
        }
        if let Some(row_arc) = self.active_grid_mut().get_mut(y) {
            let row = Arc::make_mut(row_arc);
            row[x] = glyph;
        }
        self.mark_line_dirty(y);
    }

    /// Reads the glyph at `(x, y)` on the active grid.
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<Glyph> {
        self.active_grid().get(y).and_then(|row| row.get(x)).copied()
    }

    /// Sets the WRAP flag on the last cell of row `y`, recording that the
    /// line soft-wraps into the next row.
    pub fn set_row_wrapped(&mut self, y: usize) {
        if y >= self.height || self.width == 0 {
            return;
        }
        let last = self.width - 1;
        if let Some(row_arc) = self.active_grid_mut().get_mut(y) {
            let row = Arc::make_mut(row_arc);
            row[last].attr.flags.insert(AttrFlags::WRAP);
        }
    }

    /// True if row `y` of the given buffer soft-wraps into the next row.
    pub fn row_wrapped(&self, y: usize, alt: bool) -> bool {
        self.grid_for(alt)
            .get(y)
            .and_then(|row| row.last())
            .map(|cell| cell.attr.flags.contains(AttrFlags::WRAP))
            .unwrap_or(false)
    }

    // --- Tab stop methods ---

    /// Sets a tab stop at column `x`.
    pub fn set_tabstop(&mut self, x: usize) {
        if x < self.tabs.len() {
            self.tabs[x] = true;
        }
    }

    /// Clears tab stops per `mode`.
    pub fn clear_tabstops(&mut self, current_cursor_x: usize, mode: TabClearMode) {
        match mode {
            TabClearMode::CurrentColumn => {
                if current_cursor_x < self.tabs.len() {
                    self.tabs[current_cursor_x] = false;
                }
            }
            TabClearMode::All => self.tabs.fill(false),
            TabClearMode::Unsupported => warn!("unsupported tab clear mode"),
        }
    }

    /// Next tab stop strictly after column `x`, if any.
    pub fn get_next_tabstop(&self, x: usize) -> Option<usize> {
        self.tabs
            .iter()
            .enumerate()
            .skip(x.saturating_add(1))
            .find(|(_, &set)| set)
            .map(|(idx, _)| idx)
    }

    /// Previous tab stop strictly before column `x`, if any.
    pub fn get_prev_tabstop(&self, x: usize) -> Option<usize> {
        self.tabs[..min(x, self.tabs.len())]
            .iter()
            .rposition(|&set| set)
    }
}
