// src/term/modes.rs

//! Mode-related enums and the terminal's mode-flag set.
//!
//! Covers erase modes (ED/EL), DEC private modes (DECSET/DECRST), standard
//! ANSI modes (SM/RM), and the `ModeFlags` struct holding every independent
//! mode boolean the emulator tracks.

use log::warn;

/// Defines the modes for erase operations (ED - Erase in Display, EL - Erase in Line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Erase from the active position to the end of the screen/line.
    ToEnd,
    /// Erase from the start of the screen/line to the active position.
    ToStart,
    /// Erase the entire screen/line.
    All,
    /// Erase the scrollback buffer (ED only).
    Scrollback,
    /// Unknown or unsupported erase mode.
    Unknown,
}

impl From<u16> for EraseMode {
    fn from(value: u16) -> Self {
        match value {
            0 => EraseMode::ToEnd,
            1 => EraseMode::ToStart,
            2 => EraseMode::All,
            3 => EraseMode::Scrollback,
            _ => {
                warn!("unknown erase mode value: {}", value);
                EraseMode::Unknown
            }
        }
    }
}

/// DEC private mode numbers (CSI ? Pm h / l).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum DecModeConstant {
    /// Application Cursor Keys (DECCKM).
    CursorKeys = 1,
    /// Reverse video for the whole screen (DECSCNM).
    ReverseVideo = 5,
    /// Origin Mode (DECOM): cursor addressing relative to the scroll region.
    Origin = 6,
    /// Autowrap Mode (DECAWM).
    AutoWrap = 7,
    /// X10 mouse reporting.
    MouseX10 = 9,
    /// ATT610 cursor blink.
    CursorBlink = 12,
    /// Text Cursor Enable Mode (DECTCEM).
    TextCursorEnable = 25,
    /// Numeric keypad lock (DECNKM).
    NumericKeypad = 66,
    /// Use alternate screen buffer (xterm 47).
    AltScreenBuffer = 47,
    /// VT200 mouse reporting (button presses).
    MouseVt200 = 1000,
    /// Button-event mouse tracking (motion with a button held).
    MouseButtonEvent = 1002,
    /// Any-event mouse tracking (all motion).
    MouseAnyEvent = 1003,
    /// Focus in/out reporting.
    FocusEvent = 1004,
    /// UTF-8 mouse coordinate encoding.
    MouseUtf8 = 1005,
    /// SGR extended mouse coordinate encoding.
    MouseSgr = 1006,
    /// urxvt extended mouse coordinate encoding.
    MouseUrxvt = 1015,
    /// Alternate screen buffer, cleared on entry (xterm 1047).
    AltScreenBufferClear = 1047,
    /// Save/restore cursor (xterm 1048).
    SaveRestoreCursor = 1048,
    /// Alternate screen + save/restore cursor + clear (xterm 1049).
    AltScreenBufferSaveRestore = 1049,
    /// Bracketed paste.
    BracketedPaste = 2004,
    /// Synchronized output updates.
    SynchronizedUpdate = 2026,
}

impl DecModeConstant {
    /// Converts a mode number to a known constant, or `None`.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(DecModeConstant::CursorKeys),
            5 => Some(DecModeConstant::ReverseVideo),
            6 => Some(DecModeConstant::Origin),
            7 => Some(DecModeConstant::AutoWrap),
            9 => Some(DecModeConstant::MouseX10),
            12 => Some(DecModeConstant::CursorBlink),
            25 => Some(DecModeConstant::TextCursorEnable),
            47 => Some(DecModeConstant::AltScreenBuffer),
            66 => Some(DecModeConstant::NumericKeypad),
            1000 => Some(DecModeConstant::MouseVt200),
            1002 => Some(DecModeConstant::MouseButtonEvent),
            1003 => Some(DecModeConstant::MouseAnyEvent),
            1004 => Some(DecModeConstant::FocusEvent),
            1005 => Some(DecModeConstant::MouseUtf8),
            1006 => Some(DecModeConstant::MouseSgr),
            1015 => Some(DecModeConstant::MouseUrxvt),
            1047 => Some(DecModeConstant::AltScreenBufferClear),
            1048 => Some(DecModeConstant::SaveRestoreCursor),
            1049 => Some(DecModeConstant::AltScreenBufferSaveRestore),
            2004 => Some(DecModeConstant::BracketedPaste),
            2026 => Some(DecModeConstant::SynchronizedUpdate),
            _ => None,
        }
    }
}

/// Standard ANSI mode numbers (CSI Pm h / l).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardModeConstant {
    /// Keyboard Action Mode (KAM): locks the keyboard when set.
    KeyboardAction,
    /// Insert/Replace Mode (IRM).
    Insert,
    /// Send/Receive Mode (SRM): local echo is on when SRM is *reset*.
    SendReceive,
    /// Linefeed/Newline Mode (LNM): LF implies CR when set.
    LinefeedNewline,
}

impl StandardModeConstant {
    /// Converts a mode number to a known constant, or `None`.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            2 => Some(StandardModeConstant::KeyboardAction),
            4 => Some(StandardModeConstant::Insert),
            12 => Some(StandardModeConstant::SendReceive),
            20 => Some(StandardModeConstant::LinefeedNewline),
            _ => None,
        }
    }
}

/// Whether a mode is being set or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    Enable,
    Disable,
}

/// Represents the type of mode being set or reset by SM/RM sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A DEC private mode (parameter introduced by `?`).
    DecPrivate(u16),
    /// A standard ANSI mode.
    Standard(u16),
}

/// The independent mode booleans the emulator tracks.
///
/// Each corresponds to a DECSET/DECRST or SM/RM toggle (or, for
/// `app_keypad`/`auto_print`/`window_focused`, to the ESC/MC/focus paths
/// that flip them). Accessible read-only through the external interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    /// Autowrap (DECAWM, ?7).
    pub autowrap: bool,
    /// Insert mode (IRM, 4): printing shifts the row tail right.
    pub insert: bool,
    /// The alternate screen buffer is active (?47/?1047/?1049).
    pub alt_screen_active: bool,
    /// Linefeed/newline mode (LNM, 20): LF performs CR too.
    pub linefeed_newline: bool,
    /// Local echo: on when SRM (12) is reset.
    pub local_echo: bool,
    /// Auto-print mode (MC ?5i / ?4i).
    pub auto_print: bool,
    /// UTF-8 input decoding selected (ESC % G).
    pub utf8_mode: bool,
    /// Application cursor keys (DECCKM, ?1).
    pub cursor_keys_app: bool,
    /// Application keypad (DECPAM / DECPNM).
    pub app_keypad: bool,
    /// Text cursor visible (DECTCEM, ?25).
    pub cursor_visible: bool,
    /// Whole-screen reverse video (DECSCNM, ?5).
    pub reverse_video: bool,
    /// Keyboard locked (KAM, 2).
    pub keyboard_locked: bool,
    /// X10 mouse reporting (?9).
    pub mouse_x10: bool,
    /// VT200 mouse reporting (?1000).
    pub mouse_vt200: bool,
    /// Button-motion mouse tracking (?1002).
    pub mouse_button_event: bool,
    /// Any-motion mouse tracking (?1003).
    pub mouse_any_event: bool,
    /// SGR mouse coordinate format (?1006).
    pub mouse_sgr: bool,
    /// UTF-8 mouse coordinate format (?1005).
    pub mouse_utf8: bool,
    /// urxvt mouse coordinate format (?1015).
    pub mouse_urxvt: bool,
    /// Focus event reporting (?1004).
    pub focus_event: bool,
    /// Bracketed paste (?2004).
    pub bracketed_paste: bool,
    /// Numeric keypad lock (DECNKM, ?66).
    pub numeric_keypad_lock: bool,
    /// Cursor blink enabled (ATT610, ?12).
    pub blink_enabled: bool,
    /// The hosting window currently has focus.
    pub window_focused: bool,
    /// Synchronized output updates (?2026): snapshots are withheld.
    pub synchronized_update: bool,
    /// Origin mode (DECOM, ?6).
    pub origin_mode: bool,
    /// Whether the alternate screen is permitted at all.
    pub allow_alt_screen: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        ModeFlags {
            autowrap: true,
            insert: false,
            alt_screen_active: false,
            linefeed_newline: false,
            local_echo: false,
            auto_print: false,
            utf8_mode: true,
            cursor_keys_app: false,
            app_keypad: false,
            cursor_visible: true,
            reverse_video: false,
            keyboard_locked: false,
            mouse_x10: false,
            mouse_vt200: false,
            mouse_button_event: false,
            mouse_any_event: false,
            mouse_sgr: false,
            mouse_utf8: false,
            mouse_urxvt: false,
            focus_event: false,
            bracketed_paste: false,
            numeric_keypad_lock: false,
            blink_enabled: true,
            window_focused: true,
            synchronized_update: false,
            origin_mode: false,
            allow_alt_screen: true,
        }
    }
}
