// src/term/emulator/char_processor.rs

use super::TerminalEmulator;
use crate::{
    glyph::{AttrFlags, Glyph, WIDE_CHAR_PLACEHOLDER},
    term::unicode::char_display_width,
};
use log::trace;

impl TerminalEmulator {
    /// Maps a character through the active (or single-shifted) character
    /// set. Returns the mapped character and whether it came from the
    /// line-drawing set.
    #[inline]
    fn map_char_to_active_charset(&mut self, ch: char) -> (char, bool) {
        let g_level = self
            .pending_single_shift
            .take()
            .unwrap_or(self.active_charset_g_level);
        self.active_charsets[g_level].map(ch)
    }

    /// Prints a single character at the cursor, handling character width,
    /// insert mode, pending wrap, and wide-glyph pairing.
    pub(super) fn print_char(&mut self, ch: char) {
        let (ch_to_print, box_drawing) = self.map_char_to_active_charset(ch);
        let char_width = char_display_width(ch_to_print);

        // Zero-width characters do not advance the cursor. Combining marks
        // would need renderer support to compose; they are skipped.
        if char_width == 0 {
            trace!("skipping zero-width char {:?}", ch_to_print);
            return;
        }

        let mut screen_ctx = self.current_screen_context();

        // A previous print filled the last column: wrap before placing.
        // The row left behind is flagged as soft-wrapped so selection
        // extraction can re-join it.
        if self.cursor_wrap_next && self.modes.autowrap {
            let (_, wrapped_y) = self.cursor_controller.physical_screen_pos(&screen_ctx);
            self.screen.set_row_wrapped(wrapped_y);
            self.carriage_return();
            self.move_down_one_line_and_dirty();
            screen_ctx = self.current_screen_context();
        }
        self.cursor_wrap_next = false;

        let (mut physical_x, mut physical_y) =
            self.cursor_controller.physical_screen_pos(&screen_ctx);

        // A wide glyph with one column remaining cannot fit: pad the last
        // cell and re-place the character at column 0 of the next row.
        if char_width == 2 && physical_x + 2 > screen_ctx.width {
            let mut pad = Glyph::blank(self.cursor_controller.attributes());
            pad.attr.flags.insert(AttrFlags::WRAP);
            self.screen.set_glyph(physical_x, physical_y, pad);
            self.carriage_return();
            self.move_down_one_line_and_dirty();
            screen_ctx = self.current_screen_context();
            (physical_x, physical_y) = self.cursor_controller.physical_screen_pos(&screen_ctx);
        }

        if self.modes.insert {
            self.screen
                .insert_blank_chars_in_line(physical_y, physical_x, char_width);
        }

        self.heal_wide_pair(physical_x, physical_y);

        let mut attrs = self.cursor_controller.attributes();
        if box_drawing {
            attrs.flags.insert(AttrFlags::BOX_DRAWING);
        }

        if char_width == 2 {
            let mut primary = attrs;
            primary.flags.insert(AttrFlags::WIDE);
            self.screen
                .set_glyph(physical_x, physical_y, Glyph::new(ch_to_print, primary));
            if physical_x + 1 < screen_ctx.width {
                self.heal_wide_pair(physical_x + 1, physical_y);
                let mut spacer = attrs;
                spacer.flags.insert(AttrFlags::WIDE_CONTINUATION);
                self.screen.set_glyph(
                    physical_x + 1,
                    physical_y,
                    Glyph::new(WIDE_CHAR_PLACEHOLDER, spacer),
                );
            }
        } else {
            self.screen
                .set_glyph(physical_x, physical_y, Glyph::new(ch_to_print, attrs));
        }

        // Advance; logical_x may come to rest at the width to signal that
        // the next character wraps.
        self.cursor_controller.move_right(char_width, &screen_ctx);
        let (final_logical_x, _) = self.cursor_controller.logical_pos();
        self.cursor_wrap_next = final_logical_x >= screen_ctx.width && self.modes.autowrap;
    }

    /// Overwriting half of a wide pair leaves the other half dangling;
    /// clear it to a blank cell.
    fn heal_wide_pair(&mut self, x: usize, y: usize) {
        let Some(old) = self.screen.glyph_at(x, y) else {
            return;
        };
        if old.is_wide() && x + 1 < self.screen.width {
            if let Some(spacer) = self.screen.glyph_at(x + 1, y) {
                if spacer.is_wide_continuation() {
                    self.screen
                        .set_glyph(x + 1, y, Glyph::blank(self.screen.default_attributes));
                }
            }
        } else if old.is_wide_continuation() && x > 0 {
            if let Some(primary) = self.screen.glyph_at(x - 1, y) {
                if primary.is_wide() {
                    self.screen
                        .set_glyph(x - 1, y, Glyph::blank(self.screen.default_attributes));
                }
            }
        }
    }
}
