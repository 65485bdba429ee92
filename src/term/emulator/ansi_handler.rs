// src/term/emulator/ansi_handler.rs

use super::TerminalEmulator;
use crate::{
    ansi::commands::{
        AnsiCommand, C0Control, CsiCommand, EscCommand, DA1_RESPONSE, DSR_RESPONSE_OK,
        DSR_REPORT_CURSOR_POSITION, DSR_STATUS,
    },
    term::{
        action::EmulatorAction,
        charset::{CharacterSet, G0, G1, G2, G3},
        cursor::CursorShape,
        modes::{EraseMode, Mode, ModeAction},
        screen::TabClearMode,
    },
};

use log::{debug, warn};
use std::io::Write;

/// Processes a single ANSI command, modifying the emulator state.
///
/// Returns an `EmulatorAction` when the command requires external handling
/// (a synthesized reply, a title change, a bell).
pub(super) fn process_ansi_command(
    emulator: &mut TerminalEmulator,
    command: AnsiCommand,
) -> Option<EmulatorAction> {
    if !matches!(command, AnsiCommand::Print(_)) {
        emulator.cursor_wrap_next = false;
    }

    match command {
        AnsiCommand::C0Control(c0) => match c0 {
            C0Control::BS => {
                emulator.backspace();
                None
            }
            C0Control::HT => {
                emulator.horizontal_tab();
                None
            }
            C0Control::LF | C0Control::VT | C0Control::FF => {
                emulator.line_feed();
                None
            }
            C0Control::CR => {
                emulator.carriage_return();
                None
            }
            C0Control::SO => {
                emulator.set_g_level(G1);
                None
            }
            C0Control::SI => {
                emulator.set_g_level(G0);
                None
            }
            C0Control::BEL => Some(EmulatorAction::RingBell),
            _ => {
                debug!("unhandled C0 control: {:?}", c0);
                None
            }
        },
        AnsiCommand::Esc(esc_cmd) => match esc_cmd {
            EscCommand::SetTabStop => {
                let (cursor_x, _) = emulator.cursor_controller.logical_pos();
                emulator.screen.set_tabstop(cursor_x);
                None
            }
            EscCommand::Index => {
                emulator.index();
                None
            }
            EscCommand::NextLine => {
                emulator.index();
                emulator.carriage_return();
                None
            }
            EscCommand::ReverseIndex => {
                emulator.reverse_index();
                None
            }
            EscCommand::SaveCursor => {
                emulator.save_cursor();
                None
            }
            EscCommand::RestoreCursor => {
                emulator.restore_cursor();
                None
            }
            EscCommand::SelectCharacterSet(intermediate_char, final_char) => {
                let g_idx = match intermediate_char {
                    '(' => G0,
                    ')' => G1,
                    '*' => G2,
                    '+' => G3,
                    _ => {
                        warn!("unsupported G-set designator: {}", intermediate_char);
                        G0
                    }
                };
                emulator.designate_character_set(g_idx, CharacterSet::from_char(final_char));
                None
            }
            EscCommand::SingleShift2 => {
                emulator.pending_single_shift = Some(G2);
                None
            }
            EscCommand::SingleShift3 => {
                emulator.pending_single_shift = Some(G3);
                None
            }
            EscCommand::AlignmentTest => {
                emulator.alignment_test();
                None
            }
            EscCommand::KeypadApplicationMode => {
                emulator.modes.app_keypad = true;
                None
            }
            EscCommand::KeypadNumericMode => {
                emulator.modes.app_keypad = false;
                None
            }
            EscCommand::SelectCharacterEncoding(final_char) => {
                // ESC % G selects UTF-8, ESC % @ returns to the default set.
                emulator.modes.utf8_mode = final_char == 'G';
                None
            }
            EscCommand::ResetToInitialState => emulator.reset(),
        },
        AnsiCommand::Csi(csi) => match csi {
            CsiCommand::CursorUp(n) => {
                emulator.cursor_up(n.max(1) as usize);
                None
            }
            CsiCommand::CursorDown(n) => {
                emulator.cursor_down(n.max(1) as usize);
                None
            }
            CsiCommand::CursorForward(n) => {
                emulator.cursor_forward(n.max(1) as usize);
                None
            }
            CsiCommand::CursorBackward(n) => {
                emulator.cursor_backward(n.max(1) as usize);
                None
            }
            CsiCommand::CursorNextLine(n) => {
                emulator.cursor_down(n.max(1) as usize);
                emulator.carriage_return();
                None
            }
            CsiCommand::CursorPrevLine(n) => {
                emulator.cursor_up(n.max(1) as usize);
                emulator.carriage_return();
                None
            }
            CsiCommand::CursorCharacterAbsolute(n) => {
                emulator.cursor_to_column(n.saturating_sub(1) as usize);
                None
            }
            CsiCommand::CursorLineAbsolute(n) => {
                let (x, _) = emulator.cursor_controller.logical_pos();
                emulator.cursor_to_pos(n.saturating_sub(1) as usize, x);
                None
            }
            CsiCommand::CursorPosition(r, c) => {
                emulator.cursor_to_pos(r.saturating_sub(1) as usize, c.saturating_sub(1) as usize);
                None
            }
            CsiCommand::CursorForwardTab(n) => {
                emulator.tab_forward(n.max(1) as usize);
                None
            }
            CsiCommand::CursorBackwardTab(n) => {
                emulator.tab_backward(n.max(1) as usize);
                None
            }
            CsiCommand::EraseInDisplay(mode_val) => {
                emulator.erase_in_display(EraseMode::from(mode_val));
                None
            }
            CsiCommand::EraseInLine(mode_val) => {
                emulator.erase_in_line(EraseMode::from(mode_val));
                None
            }
            CsiCommand::EraseCharacter(n) => {
                emulator.erase_chars(n.max(1) as usize);
                None
            }
            CsiCommand::InsertCharacter(n) => {
                emulator.insert_blank_chars(n.max(1) as usize);
                None
            }
            CsiCommand::DeleteCharacter(n) => {
                emulator.delete_chars(n.max(1) as usize);
                None
            }
            CsiCommand::InsertLine(n) => {
                emulator.insert_lines(n.max(1) as usize);
                None
            }
            CsiCommand::DeleteLine(n) => {
                emulator.delete_lines(n.max(1) as usize);
                None
            }
            CsiCommand::ScrollUp(n) => {
                emulator.scroll_up(n.max(1) as usize);
                None
            }
            CsiCommand::ScrollDown(n) => {
                emulator.scroll_down(n.max(1) as usize);
                None
            }
            CsiCommand::SetGraphicsRendition(attrs_vec) => {
                emulator.handle_sgr_attributes(attrs_vec);
                None
            }
            CsiCommand::SetMode(mode_num) => {
                emulator.handle_set_mode(Mode::Standard(mode_num), ModeAction::Enable)
            }
            CsiCommand::ResetMode(mode_num) => {
                emulator.handle_set_mode(Mode::Standard(mode_num), ModeAction::Disable)
            }
            CsiCommand::SetModePrivate(mode_num) => {
                emulator.handle_set_mode(Mode::DecPrivate(mode_num), ModeAction::Enable)
            }
            CsiCommand::ResetModePrivate(mode_num) => {
                emulator.handle_set_mode(Mode::DecPrivate(mode_num), ModeAction::Disable)
            }
            CsiCommand::DeviceStatusReport(dsr_param) => match dsr_param {
                DSR_REPORT_CURSOR_POSITION => {
                    // Report relative to the origin when DECOM is active.
                    let (row, col) = if emulator.modes.origin_mode {
                        let (x, y) = emulator.cursor_controller.logical_pos();
                        (y + 1, x + 1)
                    } else {
                        let ctx = emulator.current_screen_context();
                        let (x, y) = emulator.cursor_controller.physical_screen_pos(&ctx);
                        (y + 1, x + 1)
                    };
                    let mut response = Vec::with_capacity(16);
                    let _ = write!(&mut response, "\x1b[{};{}R", row, col);
                    Some(EmulatorAction::WritePty(response))
                }
                DSR_STATUS => Some(EmulatorAction::WritePty(DSR_RESPONSE_OK.to_vec())),
                _ => {
                    warn!("unhandled DSR parameter: {}", dsr_param);
                    None
                }
            },
            CsiCommand::PrimaryDeviceAttributes => {
                Some(EmulatorAction::WritePty(DA1_RESPONSE.to_vec()))
            }
            CsiCommand::MediaCopy { param, private } => {
                // Only the auto-print toggles are modeled; actual printing
                // is an external observer.
                if private {
                    match param {
                        5 => emulator.modes.auto_print = true,
                        4 => emulator.modes.auto_print = false,
                        _ => debug!("unhandled private media copy: {}", param),
                    }
                } else {
                    debug!("unhandled media copy: {}", param);
                }
                None
            }
            CsiCommand::SaveCursor => {
                emulator.save_cursor();
                None
            }
            CsiCommand::RestoreCursor => {
                emulator.restore_cursor();
                None
            }
            CsiCommand::ClearTabStops(mode_val) => {
                let (cursor_x, _) = emulator.cursor_controller.logical_pos();
                emulator
                    .screen
                    .clear_tabstops(cursor_x, TabClearMode::from(mode_val));
                None
            }
            CsiCommand::SetScrollingRegion { top, bottom } => {
                let height = emulator.screen.height;
                let bottom = if bottom == 0 { height as u16 } else { bottom };
                emulator
                    .screen
                    .set_scrolling_region(top as usize, bottom as usize);
                emulator
                    .cursor_controller
                    .move_to_logical(0, 0, &emulator.current_screen_context());
                None
            }
            CsiCommand::SetCursorStyle { shape } => {
                emulator
                    .cursor_controller
                    .set_shape(CursorShape::from_decscusr_code(shape));
                None
            }
            CsiCommand::WindowManipulation { ps1, ps2, ps3 } => {
                emulator.handle_window_manipulation(ps1, ps2, ps3)
            }
            CsiCommand::SoftReset => {
                emulator.soft_reset();
                None
            }
            CsiCommand::Unsupported(intermediates, final_byte_opt) => {
                debug!(
                    "ignoring unsupported CSI sequence: intermediates={:?}, final={:?}",
                    intermediates, final_byte_opt
                );
                None
            }
        },
        AnsiCommand::Osc(data) => emulator.handle_osc(&data),
        AnsiCommand::Print(ch) => {
            emulator.print_char(ch);
            None
        }
        AnsiCommand::Dcs(_) | AnsiCommand::Pm(_) | AnsiCommand::Apc(_) => {
            // Recognized, accumulated, and deliberately dropped: none of
            // these families carries behavior this core implements.
            None
        }
        AnsiCommand::Ignore(byte) => {
            debug!("ignored byte: {:#04x}", byte);
            None
        }
    }
}
