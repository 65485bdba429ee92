// src/term/emulator/cursor_handler.rs

use super::TerminalEmulator;
use crate::term::action::EmulatorAction;
use log::warn;

const XTWINOPS_REPORT_TEXT_AREA_SIZE_CHARS: u16 = 18;

impl TerminalEmulator {
    pub(super) fn backspace(&mut self) {
        self.cursor_wrap_next = false;
        self.cursor_controller.move_left(1);
    }

    pub(super) fn horizontal_tab(&mut self) {
        self.tab_forward(1);
    }

    /// CHT: advance `n` tab stops (or the last column).
    pub(super) fn tab_forward(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (mut x, _) = self.cursor_controller.logical_pos();
        for _ in 0..n {
            x = self
                .screen
                .get_next_tabstop(x)
                .unwrap_or(screen_ctx.width.saturating_sub(1).max(x));
        }
        self.cursor_controller.move_to_logical_col(x, &screen_ctx);
    }

    /// CBT: move back `n` tab stops (or column 0).
    pub(super) fn tab_backward(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        let screen_ctx = self.current_screen_context();
        let (mut x, _) = self.cursor_controller.logical_pos();
        for _ in 0..n {
            x = self.screen.get_prev_tabstop(x).unwrap_or(0);
        }
        self.cursor_controller.move_to_logical_col(x, &screen_ctx);
    }

    pub(super) fn cursor_up(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        self.cursor_controller.move_up(n);
    }

    /// CUD moves without scrolling; it stops at the bottom margin.
    pub(super) fn cursor_down(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        self.cursor_controller
            .move_down(n, &self.current_screen_context());
    }

    pub(super) fn cursor_forward(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        self.cursor_controller
            .move_right(n, &self.current_screen_context());
    }

    pub(super) fn cursor_backward(&mut self, n: usize) {
        self.cursor_wrap_next = false;
        self.cursor_controller.move_left(n);
    }

    pub(super) fn cursor_to_column(&mut self, col: usize) {
        self.cursor_wrap_next = false;
        self.cursor_controller
            .move_to_logical_col(col, &self.current_screen_context());
    }

    pub(super) fn cursor_to_pos(&mut self, row_param: usize, col_param: usize) {
        self.cursor_wrap_next = false;
        self.cursor_controller
            .move_to_logical(col_param, row_param, &self.current_screen_context());
    }

    pub(super) fn handle_window_manipulation(
        &mut self,
        ps1: u16,
        ps2: Option<u16>,
        ps3: Option<u16>,
    ) -> Option<EmulatorAction> {
        match ps1 {
            XTWINOPS_REPORT_TEXT_AREA_SIZE_CHARS => {
                let (cols, rows) = self.dimensions();
                let response = format!("\x1b[8;{};{}t", rows, cols);
                Some(EmulatorAction::WritePty(response.into_bytes()))
            }
            _ => {
                warn!(
                    "unhandled window manipulation: ps1={}, ps2={:?}, ps3={:?}",
                    ps1, ps2, ps3
                );
                None
            }
        }
    }
}
