// src/term/emulator/methods.rs

use super::TerminalEmulator;
use crate::{
    glyph::Attributes,
    term::{
        action::EmulatorAction,
        charset::CharacterSet,
        cursor::SavedCursor,
        modes::{EraseMode, ModeFlags},
        screen::TabClearMode,
    },
};
use log::{trace, warn};

impl TerminalEmulator {
    pub(super) fn carriage_return(&mut self) {
        self.cursor_wrap_next = false;
        self.cursor_controller.carriage_return();
    }

    /// LF/VT/FF: move down one line (scrolling at the region bottom); in
    /// linefeed/newline mode LF also performs a carriage return.
    pub(super) fn line_feed(&mut self) {
        self.move_down_one_line_and_dirty();
        if self.modes.linefeed_newline {
            self.carriage_return();
        }
    }

    /// Moves the cursor down one row, scrolling the region when the cursor
    /// sits on its bottom margin. Marks the rows involved dirty.
    pub(super) fn move_down_one_line_and_dirty(&mut self) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (_, current_physical_y) = self.cursor_controller.physical_screen_pos(&screen_ctx);

        if current_physical_y == screen_ctx.scroll_bot {
            self.screen.scroll_up(1, true);
        } else if current_physical_y < screen_ctx.height.saturating_sub(1) {
            self.cursor_controller.move_down(1, &screen_ctx);
        }

        self.screen.mark_line_dirty(current_physical_y);
        let (_, new_physical_y) = self
            .cursor_controller
            .physical_screen_pos(&self.current_screen_context());
        if new_physical_y != current_physical_y {
            self.screen.mark_line_dirty(new_physical_y);
        }
    }

    /// IND: like line feed but never adds a carriage return.
    pub(super) fn index(&mut self) {
        self.move_down_one_line_and_dirty();
    }

    /// RI: moves the cursor up one row, scrolling the region down when the
    /// cursor sits on its top margin.
    pub(super) fn reverse_index(&mut self) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (_, current_physical_y) = self.cursor_controller.physical_screen_pos(&screen_ctx);

        if current_physical_y == screen_ctx.scroll_top {
            self.screen.scroll_down(1);
        } else if current_physical_y > 0 {
            self.cursor_controller.move_up(1);
        }

        self.screen.mark_line_dirty(current_physical_y);
        let (_, new_physical_y) = self
            .cursor_controller
            .physical_screen_pos(&self.current_screen_context());
        if new_physical_y != current_physical_y {
            self.screen.mark_line_dirty(new_physical_y);
        }
    }

    /// DECSC: snapshot the cursor, charset table, and active G-level into
    /// the active buffer's slot.
    pub(super) fn save_cursor(&mut self) {
        let slot = self.saved_cursor_slot();
        self.saved_cursors[slot] = Some(SavedCursor {
            cursor: self.cursor_controller.cursor,
            charsets: self.active_charsets,
            g_level: self.active_charset_g_level,
        });
        trace!("cursor saved to slot {}", slot);
    }

    /// DECRC: restore the active buffer's snapshot; without one, reset to
    /// the defaults.
    pub(super) fn restore_cursor(&mut self) {
        self.cursor_wrap_next = false;
        let slot = self.saved_cursor_slot();
        let context = self.current_screen_context();
        match self.saved_cursors[slot] {
            Some(saved) => {
                self.cursor_controller.restore(saved.cursor, &context);
                self.active_charsets = saved.charsets;
                self.active_charset_g_level = saved.g_level;
            }
            None => {
                trace!("no saved cursor in slot {}, restoring defaults", slot);
                self.cursor_controller.reset();
            }
        }
        self.screen.default_attributes = self.cursor_controller.attributes();
    }

    /// DECALN: fill the screen with 'E' and home the cursor.
    pub(super) fn alignment_test(&mut self) {
        self.screen.default_attributes = Attributes::default();
        self.screen.fill_screen_with('E');
        self.cursor_controller
            .move_to_logical(0, 0, &self.current_screen_context());
    }

    pub(super) fn set_g_level(&mut self, g_level: usize) {
        if g_level < self.active_charsets.len() {
            self.active_charset_g_level = g_level;
            trace!("switched to G{} character set mapping", g_level);
        } else {
            warn!("attempted to set invalid G-level: {}", g_level);
        }
    }

    pub(super) fn designate_character_set(&mut self, g_set_index: usize, charset: CharacterSet) {
        if g_set_index < self.active_charsets.len() {
            self.active_charsets[g_set_index] = charset;
            trace!("designated G{} to {:?}", g_set_index, charset);
        } else {
            warn!("invalid G-set index for designate charset: {}", g_set_index);
        }
    }

    /// RIS: full reset to the initial state.
    pub(super) fn reset(&mut self) -> Option<EmulatorAction> {
        if self.screen.alt_screen_active {
            self.screen.exit_alt_screen(true);
        }
        self.cursor_controller.reset();
        self.screen.default_attributes = Attributes::default();
        self.erase_in_display(EraseMode::All);
        self.modes = ModeFlags::default();
        let (_, h) = self.dimensions();
        self.screen.set_scrolling_region(1, h);
        self.active_charsets = [CharacterSet::Ascii; 4];
        self.active_charset_g_level = 0;
        self.pending_single_shift = None;
        self.saved_cursors = [None, None];
        self.cursor_wrap_next = false;
        self.screen.clear_tabstops(0, TabClearMode::All);
        let (w, _) = self.dimensions();
        for i in (self.config.tabspaces..w).step_by(self.config.tabspaces.max(1)) {
            self.screen.set_tabstop(i);
        }
        self.screen.selection_clear();
        self.hyperlinks.clear();
        self.screen.mark_all_dirty();
        Some(EmulatorAction::RequestRedraw)
    }

    /// DECSTR: soft reset. Restores the modes and cursor state an
    /// application is likely to have disturbed without touching screen
    /// content.
    pub(super) fn soft_reset(&mut self) {
        self.cursor_wrap_next = false;
        self.modes.origin_mode = false;
        self.modes.insert = false;
        self.modes.autowrap = true;
        self.modes.cursor_visible = true;
        self.modes.app_keypad = false;
        self.modes.cursor_keys_app = false;
        self.modes.keyboard_locked = false;
        let (_, h) = self.dimensions();
        self.screen.set_scrolling_region(1, h);
        self.cursor_controller.set_attributes(Attributes::default());
        self.screen.default_attributes = Attributes::default();
        let slot = self.saved_cursor_slot();
        self.saved_cursors[slot] = None;
    }
}
