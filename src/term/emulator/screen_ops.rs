// src/term/emulator/screen_ops.rs

//! Erase, insert/delete, and scroll operations: the emulator-side wrappers
//! that resolve the cursor position and delegate to `Screen` primitives.

use super::TerminalEmulator;
use crate::term::modes::EraseMode;
use log::warn;
use std::cmp::min;

impl TerminalEmulator {
    /// ED: erase in display. Mode 3 clears the scrollback ring instead of
    /// the visible screen.
    pub(super) fn erase_in_display(&mut self, mode: EraseMode) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (cx, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();

        match mode {
            EraseMode::ToEnd => {
                self.screen.clear_line_segment(cy, cx, screen_ctx.width);
                for y in (cy + 1)..screen_ctx.height {
                    self.screen.clear_line_segment(y, 0, screen_ctx.width);
                }
            }
            EraseMode::ToStart => {
                for y in 0..cy {
                    self.screen.clear_line_segment(y, 0, screen_ctx.width);
                }
                self.screen.clear_line_segment(cy, 0, cx + 1);
            }
            EraseMode::All => {
                for y in 0..screen_ctx.height {
                    self.screen.clear_line_segment(y, 0, screen_ctx.width);
                }
            }
            EraseMode::Scrollback => {
                self.screen.scrollback.clear();
            }
            EraseMode::Unknown => warn!("unknown ED mode"),
        }
    }

    /// EL: erase in line.
    pub(super) fn erase_in_line(&mut self, mode: EraseMode) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (cx, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();

        match mode {
            EraseMode::ToEnd => self.screen.clear_line_segment(cy, cx, screen_ctx.width),
            EraseMode::ToStart => self.screen.clear_line_segment(cy, 0, cx + 1),
            EraseMode::All => self.screen.clear_line_segment(cy, 0, screen_ctx.width),
            EraseMode::Scrollback => warn!("EL has no scrollback mode"),
            EraseMode::Unknown => warn!("unknown EL mode"),
        }
    }

    /// ECH: erase `n` characters from the cursor without shifting.
    pub(super) fn erase_chars(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (cx, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();
        self.screen
            .clear_line_segment(cy, cx, min(cx + n, screen_ctx.width));
    }

    /// ICH: insert `n` blanks at the cursor, shifting the tail right.
    pub(super) fn insert_blank_chars(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (cx, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();
        self.screen.insert_blank_chars_in_line(cy, cx, n);
    }

    /// DCH: delete `n` characters at the cursor, shifting the tail left.
    pub(super) fn delete_chars(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (cx, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();
        self.screen.delete_chars_in_line(cy, cx, n);
    }

    /// IL: insert `n` lines at the cursor row by scrolling the tail of the
    /// region down. Only acts while the cursor is inside the region.
    pub(super) fn insert_lines(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (_, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();

        if cy >= screen_ctx.scroll_top && cy <= screen_ctx.scroll_bot {
            let original_top = self.screen.scroll_top();
            let original_bottom = self.screen.scroll_bot();
            if cy == original_bottom {
                // One-row region: inserting a line just blanks it.
                self.screen.clear_line_segment(cy, 0, screen_ctx.width);
                return;
            }
            // Narrow the region to [cursor, bottom] so the scroll shifts
            // exactly the affected rows, then restore it.
            self.screen.set_scrolling_region(cy + 1, original_bottom + 1);
            self.screen.scroll_down(n);
            self.screen
                .set_scrolling_region(original_top + 1, original_bottom + 1);
        }
    }

    /// DL: delete `n` lines at the cursor row by scrolling the tail of the
    /// region up.
    pub(super) fn delete_lines(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (_, cy) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        self.screen.default_attributes = self.cursor_controller.attributes();

        if cy >= screen_ctx.scroll_top && cy <= screen_ctx.scroll_bot {
            let original_top = self.screen.scroll_top();
            let original_bottom = self.screen.scroll_bot();
            if cy == original_bottom {
                self.screen.clear_line_segment(cy, 0, screen_ctx.width);
                return;
            }
            self.screen.set_scrolling_region(cy + 1, original_bottom + 1);
            self.screen.scroll_up(n, false);
            self.screen
                .set_scrolling_region(original_top + 1, original_bottom + 1);
        }
    }

    /// SU: scroll the region up `n` rows (content moves up).
    pub(super) fn scroll_up(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        self.screen.default_attributes = self.cursor_controller.attributes();
        self.screen.scroll_up(n, true);
    }

    /// SD: scroll the region down `n` rows.
    pub(super) fn scroll_down(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        self.screen.default_attributes = self.cursor_controller.attributes();
        self.screen.scroll_down(n);
    }
}
