// src/ansi/commands.rs

//! Defines the `AnsiCommand` enum representing parsed ANSI escape sequences
//! and related helper enums/structs.

use crate::color::{Color, NamedColor};
use crate::glyph::UnderlineStyle;
use log::warn;
use std::fmt;

// --- SGR Parameter Constants ---
// Numeric parameters of Select Graphic Rendition (SGR) sequences.

pub const SGR_RESET: u16 = 0;
pub const SGR_BOLD: u16 = 1;
pub const SGR_FAINT: u16 = 2;
pub const SGR_ITALIC: u16 = 3;
pub const SGR_UNDERLINE: u16 = 4;
pub const SGR_BLINK_SLOW: u16 = 5;
pub const SGR_BLINK_RAPID: u16 = 6;
pub const SGR_REVERSE: u16 = 7;
pub const SGR_CONCEAL: u16 = 8;
pub const SGR_STRIKETHROUGH: u16 = 9;

pub const SGR_UNDERLINE_DOUBLE: u16 = 21;
pub const SGR_NORMAL_INTENSITY: u16 = 22;
pub const SGR_NO_ITALIC: u16 = 23;
pub const SGR_NO_UNDERLINE: u16 = 24;
pub const SGR_NO_BLINK: u16 = 25;
pub const SGR_NO_REVERSE: u16 = 27;
pub const SGR_NO_CONCEAL: u16 = 28;
pub const SGR_NO_STRIKETHROUGH: u16 = 29;

pub const SGR_FG_BLACK: u16 = 30;
pub const SGR_FG_WHITE: u16 = 37;
pub const SGR_EXTENDED_COLOR_FG: u16 = 38;
pub const SGR_FG_DEFAULT: u16 = 39;
pub const SGR_BG_BLACK: u16 = 40;
pub const SGR_BG_WHITE: u16 = 47;
pub const SGR_EXTENDED_COLOR_BG: u16 = 48;
pub const SGR_BG_DEFAULT: u16 = 49;

pub const SGR_UNDERLINE_COLOR_SET: u16 = 58;
pub const SGR_UNDERLINE_COLOR_DEFAULT: u16 = 59;

pub const SGR_FG_BRIGHT_BLACK: u16 = 90;
pub const SGR_FG_BRIGHT_WHITE: u16 = 97;
pub const SGR_BG_BRIGHT_BLACK: u16 = 100;
pub const SGR_BG_BRIGHT_WHITE: u16 = 107;

/// SGR sub-parameter: next parameter is a 256-color palette index.
pub const SGR_EXT_MODE_256_INDEX: u16 = 5;
/// SGR sub-parameter: next three parameters are R, G, B true color values.
pub const SGR_EXT_MODE_RGB_TRUECOLOR: u16 = 2;

// --- DSR / DA parameters and canned responses ---

/// DSR 5: operating status query.
pub const DSR_STATUS: u16 = 5;
/// DSR 6: cursor position report query.
pub const DSR_REPORT_CURSOR_POSITION: u16 = 6;
/// Response to DSR 5: terminal OK.
pub const DSR_RESPONSE_OK: &[u8] = b"\x1b[0n";
/// Primary device attributes response: VT102.
pub const DA1_RESPONSE: &[u8] = b"\x1b[?6c";

/// Represents the intensity of a basic ANSI color (normal or bright).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorIntensity {
    Normal,
    Bright,
}

// --- SGR Attributes ---
/// Represents a single Select Graphic Rendition (SGR) attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Reset all attributes to default.
    Reset,
    /// Bold text.
    Bold,
    /// Faint (dim) text.
    Faint,
    /// Italic text.
    Italic,
    /// Select an underline style; `UnderlineStyle::None` turns it off.
    Underline(UnderlineStyle),
    /// Blinking text (slow and rapid collapse to one flag).
    Blink,
    /// Inverse video.
    Reverse,
    /// Hidden text.
    Conceal,
    /// Strikethrough text.
    Strikethrough,
    /// Turn off bold/faint (normal intensity).
    NoBold,
    /// Turn off italic.
    NoItalic,
    /// Turn off blink.
    NoBlink,
    /// Turn off inverse video.
    NoReverse,
    /// Turn off hidden text.
    NoConceal,
    /// Turn off strikethrough.
    NoStrikethrough,
    /// Set foreground color.
    Foreground(Color),
    /// Set background color.
    Background(Color),
    /// Set underline color; `Color::Default` clears the override.
    UnderlineColor(Color),
}

// --- C0 Control Enum ---
/// Represents C0 control characters (0x00-0x1F and 0x7F).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum C0Control {
    NUL = 0x00,
    SOH = 0x01,
    STX = 0x02,
    ETX = 0x03,
    EOT = 0x04,
    ENQ = 0x05,
    ACK = 0x06,
    BEL = 0x07,
    BS = 0x08,
    HT = 0x09,
    LF = 0x0A,
    VT = 0x0B,
    FF = 0x0C,
    CR = 0x0D,
    SO = 0x0E,
    SI = 0x0F,
    DLE = 0x10,
    DC1 = 0x11,
    DC2 = 0x12,
    DC3 = 0x13,
    DC4 = 0x14,
    NAK = 0x15,
    SYN = 0x16,
    ETB = 0x17,
    CAN = 0x18,
    EM = 0x19,
    SUB = 0x1A,
    ESC = 0x1B,
    FS = 0x1C,
    GS = 0x1D,
    RS = 0x1E,
    US = 0x1F,
    DEL = 0x7F,
}

impl C0Control {
    /// Creates a `C0Control` from a byte if it's a valid C0 code.
    /// ESC is excluded; the parser state machine owns it.
    pub fn from_byte(byte: u8) -> Option<Self> {
        if (byte <= 0x1F && byte != 0x1B) || byte == 0x7F {
            Some(unsafe { std::mem::transmute::<u8, C0Control>(byte) })
        } else {
            None
        }
    }
}

impl fmt::Display for C0Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// --- CSI Command Enum ---
/// Represents Control Sequence Introducer (CSI) commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsiCommand {
    /// Clear tab stops (TBC).
    ClearTabStops(u16),
    /// Move cursor backward by `n` (CUB).
    CursorBackward(u16),
    /// Move cursor backward by `n` tab stops (CBT).
    CursorBackwardTab(u16),
    /// Move cursor to column `n` (CHA / HPA). 1-based.
    CursorCharacterAbsolute(u16),
    /// Move cursor down by `n` (CUD).
    CursorDown(u16),
    /// Move cursor forward by `n` (CUF).
    CursorForward(u16),
    /// Move cursor forward by `n` tab stops (CHT).
    CursorForwardTab(u16),
    /// Move cursor to beginning of line `n` lines down (CNL).
    CursorNextLine(u16),
    /// Move cursor to `(row, col)` (CUP / HVP). Parameters are 1-based.
    CursorPosition(u16, u16),
    /// Move cursor to beginning of line `n` lines up (CPL).
    CursorPrevLine(u16),
    /// Move cursor up by `n` (CUU).
    CursorUp(u16),
    /// Move cursor to row `n` (VPA). 1-based, column unchanged.
    CursorLineAbsolute(u16),
    /// Delete `n` characters (DCH).
    DeleteCharacter(u16),
    /// Delete `n` lines (DL).
    DeleteLine(u16),
    /// Request device status report (DSR).
    DeviceStatusReport(u16),
    /// Erase `n` characters (ECH).
    EraseCharacter(u16),
    /// Erase in display (ED, mode `n`; 3 clears scrollback).
    EraseInDisplay(u16),
    /// Erase in line (EL, mode `n`).
    EraseInLine(u16),
    /// Insert `n` blank characters (ICH).
    InsertCharacter(u16),
    /// Insert `n` lines (IL).
    InsertLine(u16),
    /// Media copy (MC); with the private marker, 4/5 toggle auto-print.
    MediaCopy { param: u16, private: bool },
    /// Request primary device attributes (DA1).
    PrimaryDeviceAttributes,
    /// Reset standard mode `n` (RM).
    ResetMode(u16),
    /// Reset private mode `n` (DECRST).
    ResetModePrivate(u16),
    /// Restore cursor position (ANSI SCORC).
    RestoreCursor,
    /// Save cursor position (ANSI SCOSC).
    SaveCursor,
    /// Scroll down by `n` lines (SD).
    ScrollDown(u16),
    /// Scroll up by `n` lines (SU).
    ScrollUp(u16),
    /// Set graphics rendition (SGR).
    SetGraphicsRendition(Vec<Attribute>),
    /// Set standard mode `n` (SM).
    SetMode(u16),
    /// Set private mode `n` (DECSET).
    SetModePrivate(u16),
    /// Soft terminal reset (DECSTR).
    SoftReset,
    /// Set cursor style (DECSCUSR).
    SetCursorStyle {
        /// Shape parameter.
        shape: u16,
    },
    /// Set scrolling region (DECSTBM).
    SetScrollingRegion {
        /// Top line (1-based).
        top: u16,
        /// Bottom line (1-based; 0 means last line).
        bottom: u16,
    },
    /// Window manipulation (XTWINOPS).
    WindowManipulation {
        ps1: u16,
        ps2: Option<u16>,
        ps3: Option<u16>,
    },
    /// Unsupported CSI sequence: intermediates and final byte.
    Unsupported(Vec<u8>, Option<u8>),
}

// --- ESC Command Enum ---
/// Represents Escape (ESC) sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscCommand {
    /// Set tab stop at current column (HTS).
    SetTabStop,
    /// Index (IND): move cursor down, scrolling at the region bottom.
    Index,
    /// Next line (NEL).
    NextLine,
    /// Reverse index (RI): move cursor up, scrolling at the region top.
    ReverseIndex,
    /// Save cursor state (DECSC).
    SaveCursor,
    /// Restore cursor state (DECRC).
    RestoreCursor,
    /// Full reset (RIS).
    ResetToInitialState,
    /// Select character set: designator intermediate + final char.
    SelectCharacterSet(char, char),
    /// Single Shift 2: next printable uses G2.
    SingleShift2,
    /// Single Shift 3: next printable uses G3.
    SingleShift3,
    /// Screen alignment test (DECALN): fill the screen with 'E'.
    AlignmentTest,
    /// Application keypad (DECPAM).
    KeypadApplicationMode,
    /// Numeric keypad (DECPNM).
    KeypadNumericMode,
    /// Character encoding selection (ESC % G = UTF-8, ESC % @ = default).
    SelectCharacterEncoding(char),
}

/// The four string-payload sequence families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Osc,
    Dcs,
    Pm,
    Apc,
}

// --- Main AnsiCommand Enum ---
/// Represents a parsed ANSI escape command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnsiCommand {
    /// A printable character.
    Print(char),
    /// A C0 control code (e.g., CR, LF).
    C0Control(C0Control),
    /// A CSI command.
    Csi(CsiCommand),
    /// An ESC command.
    Esc(EscCommand),
    /// An Operating System Command (OSC), raw payload bytes.
    Osc(Vec<u8>),
    /// Device Control String (DCS), raw payload bytes.
    Dcs(Vec<u8>),
    /// Privacy Message (PM), raw payload bytes.
    Pm(Vec<u8>),
    /// Application Program Command (APC), raw payload bytes.
    Apc(Vec<u8>),
    /// Ignored byte.
    Ignore(u8),
}

impl AnsiCommand {
    /// Parses a C0 control code.
    pub(crate) fn from_c0(byte: u8) -> Option<Self> {
        C0Control::from_byte(byte).map(AnsiCommand::C0Control)
    }

    /// Parses a generic escape sequence from its final character.
    pub(crate) fn from_esc(final_char: char) -> Option<Self> {
        match final_char {
            'D' => Some(AnsiCommand::Esc(EscCommand::Index)),
            'E' => Some(AnsiCommand::Esc(EscCommand::NextLine)),
            'H' => Some(AnsiCommand::Esc(EscCommand::SetTabStop)),
            'M' => Some(AnsiCommand::Esc(EscCommand::ReverseIndex)),
            '7' => Some(AnsiCommand::Esc(EscCommand::SaveCursor)),
            '8' => Some(AnsiCommand::Esc(EscCommand::RestoreCursor)),
            'c' => Some(AnsiCommand::Esc(EscCommand::ResetToInitialState)),
            'N' => Some(AnsiCommand::Esc(EscCommand::SingleShift2)),
            'O' => Some(AnsiCommand::Esc(EscCommand::SingleShift3)),
            '=' => Some(AnsiCommand::Esc(EscCommand::KeypadApplicationMode)),
            '>' => Some(AnsiCommand::Esc(EscCommand::KeypadNumericMode)),
            _ => None,
        }
    }

    /// Parses an escape sequence with an intermediate character
    /// (charset designation, DECALN, encoding selection).
    pub(crate) fn from_esc_intermediate(intermediate: char, final_char: char) -> Option<Self> {
        match intermediate {
            '(' | ')' | '*' | '+' => {
                if final_char.is_ascii_alphanumeric() || final_char == '%' || final_char == '@' {
                    Some(AnsiCommand::Esc(EscCommand::SelectCharacterSet(
                        intermediate,
                        final_char,
                    )))
                } else {
                    warn!(
                        "unsupported final char '{}' for ESC {} sequence",
                        final_char, intermediate
                    );
                    None
                }
            }
            '#' => (final_char == '8').then_some(AnsiCommand::Esc(EscCommand::AlignmentTest)),
            '%' => Some(AnsiCommand::Esc(EscCommand::SelectCharacterEncoding(
                final_char,
            ))),
            _ => None,
        }
    }

    /// Parses SGR parameters into a list of `Attribute`s.
    ///
    /// Each element of `params` is one top-level parameter with its colon
    /// sub-parameters; `[38, 2, r, g, b]` as five elements (semicolon form)
    /// and `[[38, 2, r, g, b]]` as one element (colon form) produce the same
    /// attributes.
    fn parse_sgr(params: &[Vec<u16>]) -> Vec<Attribute> {
        let mut attrs = Vec::new();
        if params.is_empty() {
            attrs.push(Attribute::Reset);
            return attrs;
        }
        let mut i = 0;
        while i < params.len() {
            let param = params[i][0];
            let subs = &params[i][1..];
            match param {
                SGR_RESET => attrs.push(Attribute::Reset),
                SGR_BOLD => attrs.push(Attribute::Bold),
                SGR_FAINT => attrs.push(Attribute::Faint),
                SGR_ITALIC => attrs.push(Attribute::Italic),
                SGR_UNDERLINE => {
                    let style = match subs.first() {
                        Some(&n) => UnderlineStyle::from_sgr_subparam(n),
                        None => UnderlineStyle::Single,
                    };
                    attrs.push(Attribute::Underline(style));
                }
                SGR_BLINK_SLOW | SGR_BLINK_RAPID => attrs.push(Attribute::Blink),
                SGR_REVERSE => attrs.push(Attribute::Reverse),
                SGR_CONCEAL => attrs.push(Attribute::Conceal),
                SGR_STRIKETHROUGH => attrs.push(Attribute::Strikethrough),
                SGR_UNDERLINE_DOUBLE => {
                    attrs.push(Attribute::Underline(UnderlineStyle::Double))
                }
                SGR_NORMAL_INTENSITY => attrs.push(Attribute::NoBold),
                SGR_NO_ITALIC => attrs.push(Attribute::NoItalic),
                SGR_NO_UNDERLINE => attrs.push(Attribute::Underline(UnderlineStyle::None)),
                SGR_NO_BLINK => attrs.push(Attribute::NoBlink),
                SGR_NO_REVERSE => attrs.push(Attribute::NoReverse),
                SGR_NO_CONCEAL => attrs.push(Attribute::NoConceal),
                SGR_NO_STRIKETHROUGH => attrs.push(Attribute::NoStrikethrough),
                SGR_FG_BLACK..=SGR_FG_WHITE => attrs.push(Attribute::Foreground(
                    Self::map_basic_code_to_color(param - SGR_FG_BLACK, ColorIntensity::Normal),
                )),
                SGR_FG_DEFAULT => attrs.push(Attribute::Foreground(Color::Default)),
                SGR_BG_BLACK..=SGR_BG_WHITE => attrs.push(Attribute::Background(
                    Self::map_basic_code_to_color(param - SGR_BG_BLACK, ColorIntensity::Normal),
                )),
                SGR_BG_DEFAULT => attrs.push(Attribute::Background(Color::Default)),
                SGR_UNDERLINE_COLOR_DEFAULT => {
                    attrs.push(Attribute::UnderlineColor(Color::Default))
                }
                SGR_FG_BRIGHT_BLACK..=SGR_FG_BRIGHT_WHITE => {
                    attrs.push(Attribute::Foreground(Self::map_basic_code_to_color(
                        param - SGR_FG_BRIGHT_BLACK,
                        ColorIntensity::Bright,
                    )))
                }
                SGR_BG_BRIGHT_BLACK..=SGR_BG_BRIGHT_WHITE => {
                    attrs.push(Attribute::Background(Self::map_basic_code_to_color(
                        param - SGR_BG_BRIGHT_BLACK,
                        ColorIntensity::Bright,
                    )))
                }
                SGR_EXTENDED_COLOR_FG | SGR_EXTENDED_COLOR_BG | SGR_UNDERLINE_COLOR_SET => {
                    let color = if subs.is_empty() {
                        // Semicolon form: the specifier and channels follow as
                        // their own top-level parameters.
                        Self::parse_extended_color_params(params, &mut i)
                    } else {
                        Self::parse_extended_color_subs(subs)
                    };
                    if let Some(color) = color {
                        attrs.push(match param {
                            SGR_EXTENDED_COLOR_FG => Attribute::Foreground(color),
                            SGR_EXTENDED_COLOR_BG => Attribute::Background(color),
                            _ => Attribute::UnderlineColor(color),
                        });
                    }
                }
                _ => {
                    warn!("unknown SGR parameter: {}", param);
                }
            }
            i += 1;
        }
        if attrs.is_empty() {
            attrs.push(Attribute::Reset);
        }
        attrs
    }

    /// Maps a basic color code (0-7) and intensity to `Color`.
    fn map_basic_code_to_color(code: u16, intensity: ColorIntensity) -> Color {
        let named_color = match (intensity, code) {
            (ColorIntensity::Normal, 0) => NamedColor::Black,
            (ColorIntensity::Normal, 1) => NamedColor::Red,
            (ColorIntensity::Normal, 2) => NamedColor::Green,
            (ColorIntensity::Normal, 3) => NamedColor::Yellow,
            (ColorIntensity::Normal, 4) => NamedColor::Blue,
            (ColorIntensity::Normal, 5) => NamedColor::Magenta,
            (ColorIntensity::Normal, 6) => NamedColor::Cyan,
            (ColorIntensity::Normal, 7) => NamedColor::White,
            (ColorIntensity::Bright, 0) => NamedColor::BrightBlack,
            (ColorIntensity::Bright, 1) => NamedColor::BrightRed,
            (ColorIntensity::Bright, 2) => NamedColor::BrightGreen,
            (ColorIntensity::Bright, 3) => NamedColor::BrightYellow,
            (ColorIntensity::Bright, 4) => NamedColor::BrightBlue,
            (ColorIntensity::Bright, 5) => NamedColor::BrightMagenta,
            (ColorIntensity::Bright, 6) => NamedColor::BrightCyan,
            (ColorIntensity::Bright, 7) => NamedColor::BrightWhite,
            _ => {
                warn!("invalid basic color code: {}", code);
                return Color::Default;
            }
        };
        Color::Named(named_color)
    }

    /// Parses an extended color from the colon-delimited sub-parameters of a
    /// single 38/48/58 parameter (e.g. `38:2::10:20:30` or `38:5:196`).
    fn parse_extended_color_subs(subs: &[u16]) -> Option<Color> {
        match subs.first() {
            Some(&SGR_EXT_MODE_256_INDEX) => {
                let idx = *subs.get(1)?;
                (idx <= u8::MAX as u16).then_some(Color::Indexed(idx as u8))
            }
            Some(&SGR_EXT_MODE_RGB_TRUECOLOR) => {
                // An optional colorspace id may precede the channels
                // (`38:2:<id>:r:g:b`); take the last three values.
                let channels: &[u16] = match subs.len() {
                    0..=3 => {
                        warn!("incomplete RGB color sub-parameters");
                        return None;
                    }
                    4 => &subs[1..4],
                    _ => &subs[subs.len() - 3..],
                };
                Some(Color::Rgb(
                    channels[0].min(255) as u8,
                    channels[1].min(255) as u8,
                    channels[2].min(255) as u8,
                ))
            }
            other => {
                warn!("unsupported extended color specifier: {:?}", other);
                None
            }
        }
    }

    /// Parses an extended color from subsequent top-level parameters
    /// (semicolon form `38;5;idx` / `38;2;r;g;b`), advancing the index.
    fn parse_extended_color_params(params: &[Vec<u16>], i: &mut usize) -> Option<Color> {
        let specifier = params.get(*i + 1).map(|p| p[0]);
        match specifier {
            Some(SGR_EXT_MODE_256_INDEX) => {
                let idx = params.get(*i + 2).map(|p| p[0])?;
                *i += 2;
                (idx <= u8::MAX as u16).then_some(Color::Indexed(idx as u8))
            }
            Some(SGR_EXT_MODE_RGB_TRUECOLOR) => {
                if *i + 4 >= params.len() {
                    warn!("incomplete RGB color parameters");
                    // Consume what remains so later parameters are not
                    // misread as channels.
                    *i = params.len();
                    return None;
                }
                let r = params[*i + 2][0].min(255) as u8;
                let g = params[*i + 3][0].min(255) as u8;
                let b = params[*i + 4][0].min(255) as u8;
                *i += 4;
                Some(Color::Rgb(r, g, b))
            }
            other => {
                warn!("unsupported extended color specifier: {:?}", other);
                None
            }
        }
    }

    /// Constructs a CSI command from the accumulated sequence.
    pub(crate) fn from_csi(
        params: &[Vec<u16>],
        intermediates: &[u8],
        private: Option<char>,
        final_byte: u8,
    ) -> Option<Self> {
        let param_or = |idx: usize, default: u16| {
            params.get(idx).map(|p| p[0]).unwrap_or(default)
        };
        let param_or_1 = |idx: usize| param_or(idx, 1).max(1);
        let is_private = private.is_some();

        let command = match (is_private, intermediates, final_byte) {
            (false, b" ", b'q') => CsiCommand::SetCursorStyle {
                shape: param_or(0, 0),
            },
            (false, b"!", b'p') => CsiCommand::SoftReset,
            (false, b"", b't') => CsiCommand::WindowManipulation {
                ps1: param_or(0, 0),
                ps2: params.get(1).map(|p| p[0]),
                ps3: params.get(2).map(|p| p[0]),
            },
            (true, b"", b'h') => CsiCommand::SetModePrivate(param_or(0, 0)),
            (false, b"", b'h') => CsiCommand::SetMode(param_or(0, 0)),
            (true, b"", b'l') => CsiCommand::ResetModePrivate(param_or(0, 0)),
            (false, b"", b'l') => CsiCommand::ResetMode(param_or(0, 0)),
            (false, b"", b'A') => CsiCommand::CursorUp(param_or_1(0)),
            (false, b"", b'B') => CsiCommand::CursorDown(param_or_1(0)),
            (false, b"", b'C') => CsiCommand::CursorForward(param_or_1(0)),
            (false, b"", b'D') => CsiCommand::CursorBackward(param_or_1(0)),
            (false, b"", b'E') => CsiCommand::CursorNextLine(param_or_1(0)),
            (false, b"", b'F') => CsiCommand::CursorPrevLine(param_or_1(0)),
            (false, b"", b'G') | (false, b"", b'`') => {
                CsiCommand::CursorCharacterAbsolute(param_or_1(0))
            }
            (false, b"", b'H') | (false, b"", b'f') => {
                CsiCommand::CursorPosition(param_or_1(0), param_or_1(1))
            }
            (false, b"", b'd') => CsiCommand::CursorLineAbsolute(param_or_1(0)),
            (false, b"", b'I') => CsiCommand::CursorForwardTab(param_or_1(0)),
            (false, b"", b'Z') => CsiCommand::CursorBackwardTab(param_or_1(0)),
            (false, b"", b'J') => CsiCommand::EraseInDisplay(param_or(0, 0)),
            (false, b"", b'K') => CsiCommand::EraseInLine(param_or(0, 0)),
            (false, b"", b'X') => CsiCommand::EraseCharacter(param_or_1(0)),
            (false, b"", b'@') => CsiCommand::InsertCharacter(param_or_1(0)),
            (false, b"", b'L') => CsiCommand::InsertLine(param_or_1(0)),
            (false, b"", b'P') => CsiCommand::DeleteCharacter(param_or_1(0)),
            (false, b"", b'M') => CsiCommand::DeleteLine(param_or_1(0)),
            (false, b"", b'S') => CsiCommand::ScrollUp(param_or_1(0)),
            (false, b"", b'T') => CsiCommand::ScrollDown(param_or_1(0)),
            (false, b"", b'g') => CsiCommand::ClearTabStops(param_or(0, 0)),
            (false, b"", b'm') => CsiCommand::SetGraphicsRendition(Self::parse_sgr(params)),
            (false, b"", b'n') => CsiCommand::DeviceStatusReport(param_or(0, 0)),
            (false, b"", b'c') => CsiCommand::PrimaryDeviceAttributes,
            (_, b"", b'i') => CsiCommand::MediaCopy {
                param: param_or(0, 0),
                private: is_private,
            },
            (false, b"", b's') => CsiCommand::SaveCursor,
            (false, b"", b'u') => CsiCommand::RestoreCursor,
            (false, b"", b'r') => CsiCommand::SetScrollingRegion {
                top: param_or(0, 1),
                bottom: param_or(1, 0),
            },
            _ => {
                warn!(
                    "unsupported CSI sequence: private={:?}, intermediates={:?}, final='{}'",
                    private, intermediates, final_byte as char
                );
                CsiCommand::Unsupported(intermediates.to_vec(), Some(final_byte))
            }
        };
        Some(AnsiCommand::Csi(command))
    }
}
