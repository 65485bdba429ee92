// src/term/unicode.rs

//! Unicode character display width.
//!
//! Widths come from the `unicode-width` table. Control characters and
//! zero-width code points report 0; everything else is 1 or 2 columns.

use unicode_width::UnicodeWidthChar;

/// Returns the display width of a character.
///
/// * `0` for control characters and characters that do not advance the
///   cursor (combining marks, ZWJ, ...).
/// * `1` for standard-width printable characters.
/// * `2` for characters occupying two terminal cells.
#[must_use]
pub fn char_display_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}
