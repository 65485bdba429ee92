// src/term/emulator/mode_handler.rs

use super::TerminalEmulator;
use crate::{
    ansi::commands::Attribute,
    color::Color,
    glyph::{AttrFlags, Attributes, UnderlineStyle},
    term::{
        action::EmulatorAction,
        modes::{DecModeConstant, Mode, ModeAction, StandardModeConstant},
    },
};
use log::{trace, warn};

impl TerminalEmulator {
    /// Applies a sequence of SGR attributes to the cursor template. The
    /// screen's fill attributes follow so erased cells take the current
    /// background.
    pub(super) fn handle_sgr_attributes(&mut self, attributes_vec: Vec<Attribute>) {
        let mut current_attrs = self.cursor_controller.attributes();
        for attr_cmd in attributes_vec {
            match attr_cmd {
                Attribute::Reset => {
                    let had_underline = current_attrs.underline != UnderlineStyle::None
                        || current_attrs.underline_color.is_some();
                    // The OSC 8 hyperlink association is orthogonal to SGR
                    // state and survives a reset.
                    let link_id = current_attrs.link_id;
                    let link_flag = current_attrs.flags & AttrFlags::URL;
                    current_attrs = Attributes::default();
                    current_attrs.link_id = link_id;
                    current_attrs.flags |= link_flag;
                    if had_underline {
                        current_attrs.flags.insert(AttrFlags::UNDERLINE_DIRTY);
                    }
                }
                Attribute::Bold => current_attrs.flags.insert(AttrFlags::BOLD),
                Attribute::Faint => current_attrs.flags.insert(AttrFlags::FAINT),
                Attribute::Italic => current_attrs.flags.insert(AttrFlags::ITALIC),
                Attribute::Blink => current_attrs.flags.insert(AttrFlags::BLINK),
                Attribute::Reverse => current_attrs.flags.insert(AttrFlags::REVERSE),
                Attribute::Conceal => current_attrs.flags.insert(AttrFlags::HIDDEN),
                Attribute::Strikethrough => current_attrs.flags.insert(AttrFlags::STRIKETHROUGH),
                Attribute::Underline(style) => {
                    if current_attrs.underline != style {
                        current_attrs.flags.insert(AttrFlags::UNDERLINE_DIRTY);
                    }
                    current_attrs.underline = style;
                }
                Attribute::NoBold => {
                    current_attrs.flags.remove(AttrFlags::BOLD);
                    current_attrs.flags.remove(AttrFlags::FAINT);
                }
                Attribute::NoItalic => current_attrs.flags.remove(AttrFlags::ITALIC),
                Attribute::NoBlink => current_attrs.flags.remove(AttrFlags::BLINK),
                Attribute::NoReverse => current_attrs.flags.remove(AttrFlags::REVERSE),
                Attribute::NoConceal => current_attrs.flags.remove(AttrFlags::HIDDEN),
                Attribute::NoStrikethrough => {
                    current_attrs.flags.remove(AttrFlags::STRIKETHROUGH)
                }
                Attribute::Foreground(color) => current_attrs.fg = color,
                Attribute::Background(color) => current_attrs.bg = color,
                Attribute::UnderlineColor(color) => {
                    current_attrs.flags.insert(AttrFlags::UNDERLINE_DIRTY);
                    current_attrs.underline_color = match color {
                        Color::Default => None,
                        other => Some(other),
                    };
                }
            }
        }
        self.cursor_controller.set_attributes(current_attrs);
        self.screen.default_attributes = current_attrs;
    }

    /// SM/RM and DECSET/DECRST dispatch.
    pub(super) fn handle_set_mode(
        &mut self,
        mode_type: Mode,
        action: ModeAction,
    ) -> Option<EmulatorAction> {
        self.cursor_wrap_next = false;
        let enable = action == ModeAction::Enable;

        match mode_type {
            Mode::DecPrivate(mode_num) => {
                trace!("setting DEC private mode {} to {:?}", mode_num, action);
                match DecModeConstant::from_u16(mode_num) {
                    Some(DecModeConstant::CursorKeys) => {
                        self.modes.cursor_keys_app = enable;
                    }
                    Some(DecModeConstant::ReverseVideo) => {
                        if self.modes.reverse_video != enable {
                            self.modes.reverse_video = enable;
                            self.screen.mark_all_dirty();
                            return Some(EmulatorAction::RequestRedraw);
                        }
                    }
                    Some(DecModeConstant::Origin) => {
                        self.modes.origin_mode = enable;
                        self.cursor_controller
                            .move_to_logical(0, 0, &self.current_screen_context());
                    }
                    Some(DecModeConstant::AutoWrap) => {
                        self.modes.autowrap = enable;
                        let (logical_x, _) = self.cursor_controller.logical_pos();
                        self.cursor_wrap_next =
                            logical_x >= self.screen.width && self.modes.autowrap;
                    }
                    Some(DecModeConstant::TextCursorEnable) => {
                        self.modes.cursor_visible = enable;
                        self.cursor_controller.set_visible(enable);
                        return Some(EmulatorAction::SetCursorVisibility(enable));
                    }
                    Some(DecModeConstant::CursorBlink) => {
                        self.modes.blink_enabled = enable;
                    }
                    Some(DecModeConstant::NumericKeypad) => {
                        self.modes.numeric_keypad_lock = enable;
                    }
                    Some(DecModeConstant::AltScreenBuffer)
                    | Some(DecModeConstant::AltScreenBufferClear)
                    | Some(DecModeConstant::AltScreenBufferSaveRestore) => {
                        return self.handle_alt_screen_mode(mode_num, enable);
                    }
                    Some(DecModeConstant::SaveRestoreCursor) => {
                        if enable {
                            self.save_cursor();
                        } else {
                            self.restore_cursor();
                        }
                    }
                    Some(DecModeConstant::BracketedPaste) => {
                        self.modes.bracketed_paste = enable;
                    }
                    Some(DecModeConstant::FocusEvent) => self.modes.focus_event = enable,
                    Some(DecModeConstant::MouseX10) => self.modes.mouse_x10 = enable,
                    Some(DecModeConstant::MouseVt200) => self.modes.mouse_vt200 = enable,
                    Some(DecModeConstant::MouseButtonEvent) => {
                        self.modes.mouse_button_event = enable;
                    }
                    Some(DecModeConstant::MouseAnyEvent) => {
                        self.modes.mouse_any_event = enable;
                    }
                    Some(DecModeConstant::MouseUtf8) => self.modes.mouse_utf8 = enable,
                    Some(DecModeConstant::MouseSgr) => self.modes.mouse_sgr = enable,
                    Some(DecModeConstant::MouseUrxvt) => self.modes.mouse_urxvt = enable,
                    Some(DecModeConstant::SynchronizedUpdate) => {
                        self.modes.synchronized_update = enable;
                        if !enable {
                            // Leaving a synchronized update releases a full
                            // repaint of whatever accumulated.
                            return Some(EmulatorAction::RequestRedraw);
                        }
                    }
                    None => {
                        warn!("unknown DEC private mode {} set to {}", mode_num, enable);
                    }
                }
            }
            Mode::Standard(mode_num) => match StandardModeConstant::from_u16(mode_num) {
                Some(StandardModeConstant::KeyboardAction) => {
                    self.modes.keyboard_locked = enable;
                }
                Some(StandardModeConstant::Insert) => {
                    self.modes.insert = enable;
                }
                Some(StandardModeConstant::SendReceive) => {
                    // SRM set suppresses local echo.
                    self.modes.local_echo = !enable;
                }
                Some(StandardModeConstant::LinefeedNewline) => {
                    self.modes.linefeed_newline = enable;
                }
                None => {
                    warn!("standard mode {} set to {} not implemented", mode_num, enable);
                }
            },
        }
        None
    }

    /// Alternate-screen entry/exit for modes 47, 1047 and 1049.
    fn handle_alt_screen_mode(&mut self, mode_num: u16, enable: bool) -> Option<EmulatorAction> {
        if !self.modes.allow_alt_screen {
            warn!("alternate screen disabled, ignoring mode {}", mode_num);
            return None;
        }
        let save_restore = mode_num == DecModeConstant::AltScreenBufferSaveRestore as u16;
        let clear_on_enter = mode_num != DecModeConstant::AltScreenBuffer as u16;
        let clear_selection = self.config.clear_selection_on_alt_screen;

        if enable {
            if !self.modes.alt_screen_active {
                if save_restore {
                    self.save_cursor();
                }
                self.screen.default_attributes = self.cursor_controller.attributes();
                self.screen.enter_alt_screen(clear_on_enter, clear_selection);
                self.modes.alt_screen_active = true;
                self.cursor_controller
                    .move_to_logical(0, 0, &self.current_screen_context());
                return Some(EmulatorAction::RequestRedraw);
            }
        } else if self.modes.alt_screen_active {
            self.screen.exit_alt_screen(clear_selection);
            self.modes.alt_screen_active = false;
            if save_restore {
                self.restore_cursor();
            } else {
                self.cursor_controller
                    .move_to_logical(0, 0, &self.current_screen_context());
            }
            self.screen.default_attributes = self.cursor_controller.attributes();
            return Some(EmulatorAction::RequestRedraw);
        }
        None
    }
}
