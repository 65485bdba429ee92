// src/color.rs

//! Color types and the 256-entry indexed palette.
//!
//! `Color` is what cells and SGR attributes carry: the terminal default, one
//! of the 16 named ANSI colors, a 256-palette index, or a direct RGB value.
//! Direct RGB values bypass the palette entirely; everything else is resolved
//! through `Palette` by the render layer.

use serde::{Deserialize, Serialize};

/// The 16 standard ANSI colors (8 normal + 8 bright).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    /// Palette index (0-15) of this named color.
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A cell or attribute color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    /// Terminal default (SGR 39 / SGR 49).
    #[default]
    Default,
    /// One of the 16 standard ANSI colors.
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit true color; bypasses the palette.
    Rgb(u8, u8, u8),
}

/// A concrete RGB triple, as stored in the palette.
pub type Rgb = (u8, u8, u8);

const DEFAULT_FOREGROUND: Rgb = (0xd8, 0xd8, 0xd8);
const DEFAULT_BACKGROUND: Rgb = (0x18, 0x18, 0x18);

/// The 16 base ANSI colors as RGB, matching the common xterm defaults.
const ANSI_BASE: [Rgb; 16] = [
    (0x00, 0x00, 0x00),
    (0xcd, 0x00, 0x00),
    (0x00, 0xcd, 0x00),
    (0xcd, 0xcd, 0x00),
    (0x00, 0x00, 0xee),
    (0xcd, 0x00, 0xcd),
    (0x00, 0xcd, 0xcd),
    (0xe5, 0xe5, 0xe5),
    (0x7f, 0x7f, 0x7f),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x5c, 0x5c, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

/// The 256-entry indexed palette plus the named default colors.
///
/// Entries 0-15 are the ANSI colors, 16-231 the 6x6x6 color cube, and
/// 232-255 the grayscale ramp. OSC 4 mutates individual entries; OSC 104
/// restores them. The special foreground/background/cursor slots are set by
/// OSC 10/11/12 and restored by OSC 110/111/112.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 256],
    pub foreground: Rgb,
    pub background: Rgb,
    pub cursor: Rgb,
    pub cursor_reverse: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Builds the default xterm-style palette.
    #[must_use]
    pub fn new() -> Self {
        let mut colors = [(0, 0, 0); 256];
        colors[..16].copy_from_slice(&ANSI_BASE);
        for idx in 16..232 {
            colors[idx] = Self::cube_entry(idx);
        }
        for idx in 232..256 {
            let level = (8 + (idx - 232) * 10) as u8;
            colors[idx] = (level, level, level);
        }
        Palette {
            colors,
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            cursor: DEFAULT_FOREGROUND,
            cursor_reverse: DEFAULT_BACKGROUND,
        }
    }

    /// Computes a 6x6x6 color-cube entry for indices 16-231.
    fn cube_entry(idx: usize) -> Rgb {
        let idx = idx - 16;
        let channel = |v: usize| -> u8 {
            if v == 0 {
                0
            } else {
                (55 + v * 40) as u8
            }
        };
        (
            channel(idx / 36),
            channel((idx / 6) % 6),
            channel(idx % 6),
        )
    }

    /// Returns the RGB value of an indexed entry.
    #[must_use]
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Overwrites an indexed entry (OSC 4).
    pub fn set(&mut self, index: u8, rgb: Rgb) {
        self.colors[index as usize] = rgb;
    }

    /// Restores an indexed entry to its built-in default (OSC 104).
    pub fn reset(&mut self, index: u8) {
        let idx = index as usize;
        self.colors[idx] = if idx < 16 {
            ANSI_BASE[idx]
        } else if idx < 232 {
            Self::cube_entry(idx)
        } else {
            let level = (8 + (idx - 232) * 10) as u8;
            (level, level, level)
        };
    }

    /// Restores the foreground/background/cursor specials (OSC 110/111/112).
    pub fn reset_specials(&mut self) {
        self.foreground = DEFAULT_FOREGROUND;
        self.background = DEFAULT_BACKGROUND;
        self.cursor = DEFAULT_FOREGROUND;
        self.cursor_reverse = DEFAULT_BACKGROUND;
    }

    /// Restores the default foreground (OSC 110).
    pub fn reset_foreground(&mut self) {
        self.foreground = DEFAULT_FOREGROUND;
    }

    /// Restores the default background (OSC 111).
    pub fn reset_background(&mut self) {
        self.background = DEFAULT_BACKGROUND;
    }

    /// Restores the default cursor color (OSC 112).
    pub fn reset_cursor(&mut self) {
        self.cursor = DEFAULT_FOREGROUND;
        self.cursor_reverse = DEFAULT_BACKGROUND;
    }

    /// Resolves a `Color` to a concrete RGB value against this palette.
    #[must_use]
    pub fn resolve(&self, color: Color) -> Rgb {
        match color {
            Color::Default => self.foreground,
            Color::Named(named) => self.colors[named.index() as usize],
            Color::Indexed(idx) => self.colors[idx as usize],
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }
}

/// Parses an X11-style color specification as used by OSC 4/10/11/12.
///
/// Accepted forms: `#rgb`, `#rrggbb`, and `rgb:rr/gg/bb` (1-4 hex digits per
/// channel, scaled to 8 bits from the most significant digits).
#[must_use]
pub fn parse_color_spec(spec: &str) -> Option<Rgb> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let chan = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v * 0x11);
                Some((chan(&hex[0..1])?, chan(&hex[1..2])?, chan(&hex[2..3])?))
            }
            6 => {
                let chan = |s: &str| u8::from_str_radix(s, 16).ok();
                Some((chan(&hex[0..2])?, chan(&hex[2..4])?, chan(&hex[4..6])?))
            }
            _ => None,
        };
    }
    if let Some(body) = spec.strip_prefix("rgb:") {
        let mut parts = body.split('/');
        let mut chan = || -> Option<u8> {
            let digits = parts.next()?;
            if digits.is_empty() || digits.len() > 4 {
                return None;
            }
            let value = u16::from_str_radix(digits, 16).ok()?;
            // Scale to 8 bits from however many digits were given.
            let max = (16u32.pow(digits.len() as u32) - 1) as u16;
            Some(((value as u32 * 255) / max as u32) as u8)
        };
        let rgb = (chan()?, chan()?, chan()?);
        if parts.next().is_some() {
            return None;
        }
        return Some(rgb);
    }
    None
}

/// Formats an RGB triple as the `rgb:rrrr/gggg/bbbb` form used in OSC query
/// replies.
#[must_use]
pub fn format_color_spec(rgb: Rgb) -> String {
    let scale = |v: u8| -> u16 { (v as u16) << 8 | v as u16 };
    format!(
        "rgb:{:04x}/{:04x}/{:04x}",
        scale(rgb.0),
        scale(rgb.1),
        scale(rgb.2)
    )
}
