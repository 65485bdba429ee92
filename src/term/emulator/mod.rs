// src/term/emulator/mod.rs

//! Core terminal emulation logic and state management.
//!
//! `TerminalEmulator` is the single writer over the screen model: it applies
//! parsed `AnsiCommand`s, manages the cursor, character sets, modes, the
//! palette and hyperlink registry, and exposes the read-only render and
//! selection interfaces. Processing is strictly synchronous; commands that
//! require a reply (status reports, OSC queries) surface as
//! `EmulatorAction`s for the embedder to deliver.

use crate::{
    ansi::commands::AnsiCommand,
    color::Palette,
    config::Config,
    glyph::{Attributes, Glyph},
    term::{
        action::EmulatorAction,
        charset::CharacterSet,
        cursor::{CursorController, SavedCursor, ScreenContext},
        hyperlink::HyperlinkRegistry,
        modes::ModeFlags,
        screen::Screen,
        selection::{SelectionKind, SnapMode},
        snapshot::{CursorRenderState, CursorShape, Point, SnapshotLine, TerminalSnapshot},
    },
};

use log::debug;
use std::sync::Arc;

mod ansi_handler;
mod char_processor;
mod cursor_handler;
mod methods;
mod mode_handler;
mod osc_handler;
mod screen_ops;

/// The core terminal emulator.
#[derive(Debug, Clone)]
pub struct TerminalEmulator {
    pub(super) screen: Screen,
    pub(super) cursor_controller: CursorController,
    pub(super) modes: ModeFlags,
    pub(super) palette: Palette,
    pub(super) hyperlinks: HyperlinkRegistry,
    pub(super) active_charsets: [CharacterSet; 4],
    pub(super) active_charset_g_level: usize,
    /// G-slot to use for exactly the next printed character (SS2/SS3).
    pub(super) pending_single_shift: Option<usize>,
    /// DECSC snapshots, one slot per buffer: [primary, alternate].
    pub(super) saved_cursors: [Option<SavedCursor>; 2],
    /// The previous print filled the last column; the next one wraps first.
    pub(super) cursor_wrap_next: bool,
    pub(super) config: Config,
    /// Viewport offset for scrollback navigation; 0 is the live screen.
    viewport_offset: usize,
}

impl TerminalEmulator {
    /// Creates a new `TerminalEmulator` sized and tuned by `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let initial_attributes = Attributes::default();
        let mut screen = Screen::new(config.columns, config.rows, &config);
        screen.default_attributes = initial_attributes;

        TerminalEmulator {
            screen,
            cursor_controller: CursorController::new(initial_attributes),
            modes: ModeFlags::default(),
            palette: Palette::new(),
            hyperlinks: HyperlinkRegistry::new(),
            active_charsets: [CharacterSet::Ascii; 4],
            active_charset_g_level: 0,
            pending_single_shift: None,
            saved_cursors: [None, None],
            cursor_wrap_next: false,
            config,
            viewport_offset: 0,
        }
    }

    /// Helper to create the current `ScreenContext` for `CursorController`.
    pub(super) fn current_screen_context(&self) -> ScreenContext {
        ScreenContext {
            width: self.screen.width,
            height: self.screen.height,
            scroll_top: self.screen.scroll_top(),
            scroll_bot: self.screen.scroll_bot(),
            origin_mode_active: self.modes.origin_mode,
        }
    }

    /// Current grid size as `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.screen.width, self.screen.height)
    }

    /// Index into `saved_cursors` for the active buffer.
    pub(super) fn saved_cursor_slot(&self) -> usize {
        usize::from(self.screen.alt_screen_active)
    }

    /// Resizes the terminal display grid, clamping the cursor and marking
    /// the whole screen dirty.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cursor_wrap_next = false;
        self.screen.resize(cols, rows);
        let (log_x, log_y) = self.cursor_controller.logical_pos();
        self.cursor_controller
            .move_to_logical(log_x, log_y, &self.current_screen_context());
        debug!("terminal resized to {}x{}", cols, rows);
    }

    /// Applies one parsed ANSI command. Returns an action when the command
    /// requires external handling (a reply, a title change, ...).
    pub fn handle_command(&mut self, command: AnsiCommand) -> Option<EmulatorAction> {
        // New output snaps the viewport back to the live screen.
        self.viewport_offset = 0;
        ansi_handler::process_ansi_command(self, command)
    }

    // --- Render interface ---

    /// Cells of visible row `y` on the active buffer (live screen).
    pub fn visible_row(&self, y: usize) -> Option<&[Glyph]> {
        self.screen.active_grid().get(y).map(|row| row.as_slice())
    }

    /// Dirty flag of row `y`.
    pub fn dirty(&self, y: usize) -> bool {
        self.screen.is_dirty(y)
    }

    /// Clears the dirty flag of row `y` after it has been redrawn.
    pub fn clear_dirty(&mut self, y: usize) {
        self.screen.clear_dirty(y);
    }

    /// Physical cursor position, shape, and visibility.
    pub fn cursor_position(&self) -> (usize, usize, CursorShape, bool) {
        let (x, y) = self
            .cursor_controller
            .physical_screen_pos(&self.current_screen_context());
        let shape = map_cursor_shape(self.cursor_controller.shape());
        let visible = self.modes.cursor_visible && self.cursor_controller.is_visible();
        (x, y, shape, visible)
    }

    /// Whether the cell at `(x, y)` is inside the current selection.
    pub fn is_selected(&self, x: usize, y: usize) -> bool {
        self.screen.is_selected(Point { x, y })
    }

    /// Read-only mode flags.
    pub fn modes(&self) -> &ModeFlags {
        &self.modes
    }

    /// Read-only color palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// URI associated with a cell's hyperlink id, if any.
    pub fn hyperlink_uri(&self, link_id: u16) -> Option<&str> {
        self.hyperlinks.uri(link_id)
    }

    /// Creates a fresh snapshot of the terminal's visible state, or `None`
    /// while synchronized updates are suspending rendering.
    ///
    /// Rows are shared copy-on-write: the snapshot holds `Arc` clones of
    /// the current rows and the emulator keeps mutating through
    /// `Arc::make_mut`. When the viewport is scrolled back, the top rows
    /// come from scrollback.
    pub fn get_render_snapshot(&mut self) -> Option<TerminalSnapshot> {
        if self.modes.synchronized_update {
            return None;
        }

        let (width, height) = (self.screen.width, self.screen.height);
        let scrollback_len = self.screen.scrollback.len();
        let effective_offset = self.viewport_offset.min(scrollback_len);

        let lines: Vec<SnapshotLine> = (0..height)
            .map(|y| {
                if y < effective_offset {
                    // Scrollback is ordered oldest first; index from the end.
                    let idx = scrollback_len - effective_offset + y;
                    SnapshotLine::from_arc(self.screen.scrollback[idx].clone(), true)
                } else {
                    let grid_y = y - effective_offset;
                    match self.screen.active_grid().get(grid_y) {
                        Some(row) => {
                            SnapshotLine::from_arc(row.clone(), self.screen.is_dirty(grid_y))
                        }
                        None => SnapshotLine::from_arc(
                            Arc::new(vec![Glyph::default(); width]),
                            true,
                        ),
                    }
                }
            })
            .collect();

        // The cursor only shows on the live screen.
        let cursor_state = if self.modes.cursor_visible
            && self.cursor_controller.is_visible()
            && effective_offset == 0
        {
            let (cursor_x, cursor_y) = self
                .cursor_controller
                .physical_screen_pos(&self.current_screen_context());
            let cell_char = self
                .screen
                .glyph_at(cursor_x, cursor_y)
                .map_or(' ', |g| g.c);
            Some(CursorRenderState {
                x: cursor_x,
                y: cursor_y,
                shape: map_cursor_shape(self.cursor_controller.shape()),
                cell_char_underneath: cell_char,
            })
        } else {
            None
        };

        let selection = self
            .screen
            .selection
            .is_showing()
            .then(|| self.screen.selection.normalized)
            .flatten();

        self.screen.mark_all_clean();

        Some(TerminalSnapshot {
            dimensions: (width, height),
            lines,
            cursor_state,
            selection,
        })
    }

    /// Records a window focus change. When focus reporting (mode 1004) is
    /// active, returns the CSI I / CSI O report to deliver to the child.
    pub fn set_focus(&mut self, focused: bool) -> Option<EmulatorAction> {
        self.modes.window_focused = focused;
        if self.modes.focus_event {
            let report = if focused { b"\x1b[I" } else { b"\x1b[O" };
            return Some(EmulatorAction::WritePty(report.to_vec()));
        }
        None
    }

    /// Prepares externally pasted text for delivery to the child process,
    /// wrapping it in bracketed-paste markers when that mode is active.
    #[must_use]
    pub fn paste_bytes(&self, text: &str) -> Vec<u8> {
        if self.modes.bracketed_paste {
            let mut out = Vec::with_capacity(text.len() + 12);
            out.extend_from_slice(b"\x1b[200~");
            out.extend_from_slice(text.as_bytes());
            out.extend_from_slice(b"\x1b[201~");
            out
        } else {
            text.as_bytes().to_vec()
        }
    }

    // --- Scrollback navigation ---

    /// Scrolls the viewport by `lines`: positive into history, negative
    /// toward the live screen. Returns true if the viewport moved.
    pub fn scroll_viewport(&mut self, lines: i32) -> bool {
        let old_offset = self.viewport_offset;
        let max_offset = self.screen.scrollback.len();
        if lines > 0 {
            self.viewport_offset = (self.viewport_offset + lines as usize).min(max_offset);
        } else {
            self.viewport_offset = self.viewport_offset.saturating_sub((-lines) as usize);
        }
        if self.viewport_offset != old_offset {
            self.screen.mark_all_dirty();
            true
        } else {
            false
        }
    }

    /// Resets the viewport to the live screen.
    pub fn reset_viewport(&mut self) -> bool {
        if self.viewport_offset > 0 {
            self.viewport_offset = 0;
            self.screen.mark_all_dirty();
            true
        } else {
            false
        }
    }

    /// Number of rows currently held in scrollback.
    pub fn scrollback_len(&self) -> usize {
        self.screen.scrollback.len()
    }

    // --- Selection interface ---

    /// Starts a selection gesture at cell `(col, row)`.
    pub fn selection_start(&mut self, col: usize, row: usize, snap: SnapMode) {
        self.screen.selection_start(Point { x: col, y: row }, snap);
    }

    /// Extends the selection gesture to cell `(col, row)`.
    pub fn selection_extend(
        &mut self,
        col: usize,
        row: usize,
        kind: SelectionKind,
        is_final: bool,
    ) {
        self.screen
            .selection_extend(Point { x: col, y: row }, kind, is_final);
    }

    /// Clears any selection.
    pub fn selection_clear(&mut self) {
        self.screen.selection_clear();
    }

    /// Extracted text of the current selection.
    #[must_use]
    pub fn selection_text(&self) -> Option<String> {
        self.screen.selection_text()
    }
}

fn map_cursor_shape(shape: crate::term::cursor::CursorShape) -> CursorShape {
    use crate::term::cursor::CursorShape as Dec;
    match shape {
        Dec::BlinkingBlock | Dec::SteadyBlock => CursorShape::Block,
        Dec::BlinkingUnderline | Dec::SteadyUnderline => CursorShape::Underline,
        Dec::BlinkingBar | Dec::SteadyBar => CursorShape::Bar,
    }
}
