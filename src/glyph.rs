// src/glyph.rs

//! Defines the `Glyph` type, its visual attributes (`AttrFlags`, `Attributes`),
//! and related constants.
//!
//! A `Glyph` represents a single character cell on the terminal screen,
//! encapsulating the character itself and all its styling information.
//! Color definitions (`Color`, `NamedColor`) are found in the `crate::color`
//! module.

use bitflags::bitflags;
use std::fmt;

use crate::color::Color;

bitflags! {
    /// Text attribute and cell-structure flags.
    ///
    /// The low bits correspond to common ANSI SGR (Select Graphic Rendition)
    /// parameters; the high bits describe properties of the cell itself
    /// (wide-character pairing, soft wrap, line-drawing origin, hyperlinks).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u16 {
        const BOLD              = 1 << 0;
        const FAINT             = 1 << 1;
        const ITALIC            = 1 << 2;
        const BLINK             = 1 << 3;
        const REVERSE           = 1 << 4;
        const HIDDEN            = 1 << 5;
        const STRIKETHROUGH     = 1 << 6;

        /// Last cell of a soft-wrapped row; the next row continues this line.
        const WRAP              = 1 << 8;
        /// Leading (left) cell of a wide, two-column character.
        const WIDE              = 1 << 9;
        /// Trailing (right) cell of a wide character; carries no glyph.
        const WIDE_CONTINUATION = 1 << 10;
        /// Glyph was produced by the DEC line-drawing character set.
        const BOX_DRAWING       = 1 << 11;
        /// Cell belongs to an OSC 8 hyperlink (see `Attributes::link_id`).
        const URL               = 1 << 12;
        /// Underline state changed since the last redraw.
        const UNDERLINE_DIRTY   = 1 << 13;
    }
}

/// Underline rendition selected by SGR 4, `4:n`, 21 and 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
}

impl UnderlineStyle {
    /// Maps an SGR `4:n` sub-parameter to a style. Unknown values fall back
    /// to a single underline, matching xterm.
    #[must_use]
    pub fn from_sgr_subparam(value: u16) -> Self {
        match value {
            0 => UnderlineStyle::None,
            2 => UnderlineStyle::Double,
            3 => UnderlineStyle::Curly,
            _ => UnderlineStyle::Single,
        }
    }
}

/// Represents the visual attributes of a glyph: colors, flags, underline
/// style, the optional underline color override, and the hyperlink id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attributes {
    /// Foreground color of the glyph.
    pub fg: Color,
    /// Background color of the glyph.
    pub bg: Color,
    /// Styling flags (bold, italic, wide, etc.).
    pub flags: AttrFlags,
    /// Underline style; `None` means not underlined.
    pub underline: UnderlineStyle,
    /// Underline color override (SGR 58); `None` uses the foreground.
    pub underline_color: Option<Color>,
    /// OSC 8 hyperlink id; 0 means no link.
    pub link_id: u16,
}

/// Represents a single character cell on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// The character displayed in the cell. `'\0'` signifies either an empty
    /// cell or the continuation half of a wide character.
    pub c: char,
    /// The visual attributes of the character.
    pub attr: Attributes,
}

/// Placeholder character stored in wide-continuation cells.
pub const WIDE_CHAR_PLACEHOLDER: char = '\0';

/// Default glyph: a space character with default SGR attributes.
/// This is used for initializing new cells or clearing existing ones.
pub const DEFAULT_GLYPH: Glyph = Glyph {
    c: ' ',
    attr: Attributes {
        fg: Color::Default,
        bg: Color::Default,
        flags: AttrFlags::empty(),
        underline: UnderlineStyle::None,
        underline_color: None,
        link_id: 0,
    },
};

impl Default for Glyph {
    fn default() -> Self {
        DEFAULT_GLYPH
    }
}

impl Glyph {
    /// Creates a glyph from a character and attributes.
    #[must_use]
    pub fn new(c: char, attr: Attributes) -> Self {
        Glyph { c, attr }
    }

    /// A blank cell used for fills and erases: the template's colors with
    /// everything else cleared.
    #[must_use]
    pub fn blank(attr: Attributes) -> Self {
        Glyph {
            c: ' ',
            attr: Attributes {
                fg: attr.fg,
                bg: attr.bg,
                ..Attributes::default()
            },
        }
    }

    /// True for the trailing half of a wide character.
    #[must_use]
    pub fn is_wide_continuation(&self) -> bool {
        self.attr.flags.contains(AttrFlags::WIDE_CONTINUATION)
    }

    /// True for the leading half of a wide character.
    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.attr.flags.contains(AttrFlags::WIDE)
    }

    /// True if the cell holds no visible content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.c == ' ' || self.c == WIDE_CHAR_PLACEHOLDER
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.c)
    }
}
