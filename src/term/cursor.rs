// src/term/cursor.rs

//! Manages the terminal's cursor state: its logical position, the SGR
//! attribute template inherited by newly written cells, visibility, shape,
//! and translation to physical screen coordinates.
//!
//! Origin Mode (DECOM) is abstracted behind `ScreenContext`: logical row 0
//! is the scroll-region top when origin mode is active, the physical top
//! otherwise. The controller clamps every movement to the context bounds.

use crate::glyph::Attributes;
use crate::term::charset::CharacterSet;
use log::{trace, warn};
use std::cmp::min;

/// Cursor shape selected by DECSCUSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    #[default]
    BlinkingBlock,
    SteadyBlock,
    BlinkingUnderline,
    SteadyUnderline,
    BlinkingBar,
    SteadyBar,
}

impl CursorShape {
    /// Creates a `CursorShape` from a DECSCUSR code. Unknown codes default
    /// and log a warning.
    pub fn from_decscusr_code(code: u16) -> Self {
        match code {
            0 | 1 => CursorShape::BlinkingBlock,
            2 => CursorShape::SteadyBlock,
            3 => CursorShape::BlinkingUnderline,
            4 => CursorShape::SteadyUnderline,
            5 => CursorShape::BlinkingBar,
            6 => CursorShape::SteadyBar,
            _ => {
                warn!("unknown DECSCUSR shape code: {}, using default", code);
                CursorShape::default()
            }
        }
    }
}

/// Represents the state of the terminal cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Logical column (0-based). Can be == width to indicate the next
    /// character causes a wrap.
    pub logical_x: usize,
    /// Logical row (0-based); relative to the scroll-region top when origin
    /// mode is active.
    pub logical_y: usize,
    /// Current SGR attributes for characters written at the cursor.
    pub attributes: Attributes,
    /// Visibility of the cursor.
    pub visible: bool,
    /// Shape of the cursor.
    pub shape: CursorShape,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            logical_x: 0,
            logical_y: 0,
            attributes: Attributes::default(),
            visible: true,
            shape: CursorShape::default(),
        }
    }
}

/// Snapshot taken by DECSC and restored by DECRC: the full cursor plus the
/// character-set table and active slot. One slot exists per screen buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedCursor {
    pub cursor: Cursor,
    pub charsets: [CharacterSet; 4],
    pub g_level: usize,
}

/// Screen geometry needed to interpret cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenContext {
    /// Width of the screen in character cells.
    pub width: usize,
    /// Height of the screen in character cells.
    pub height: usize,
    /// Top row of the scrolling region (0-based, inclusive).
    pub scroll_top: usize,
    /// Bottom row of the scrolling region (0-based, inclusive).
    pub scroll_bot: usize,
    /// `true` if Origin Mode (DECOM) is active.
    pub origin_mode_active: bool,
}

impl ScreenContext {
    /// Largest valid logical row under this context.
    fn max_logical_y(&self) -> usize {
        if self.origin_mode_active {
            self.scroll_bot.saturating_sub(self.scroll_top)
        } else {
            self.height.saturating_sub(1)
        }
    }
}

/// Maintains the cursor and performs clamped logical movements.
#[derive(Debug, Clone)]
pub struct CursorController {
    pub(super) cursor: Cursor,
}

impl CursorController {
    /// Creates a controller with the cursor at (0,0) and the given initial
    /// attribute template.
    pub fn new(initial_attributes: Attributes) -> Self {
        Self {
            cursor: Cursor {
                attributes: initial_attributes,
                ..Default::default()
            },
        }
    }

    /// Current logical cursor position as `(column, row)`.
    pub fn logical_pos(&self) -> (usize, usize) {
        (self.cursor.logical_x, self.cursor.logical_y)
    }

    /// Absolute physical screen position `(column, row)` for rendering or
    /// glyph placement, clamped to the grid.
    pub fn physical_screen_pos(&self, context: &ScreenContext) -> (usize, usize) {
        let physical_y = if context.origin_mode_active {
            let relative = min(self.cursor.logical_y, context.max_logical_y());
            context.scroll_top + relative
        } else {
            self.cursor.logical_y
        };
        // logical_x may equal width (pending wrap); the cell index may not.
        let final_x = min(self.cursor.logical_x, context.width.saturating_sub(1));
        let final_y = min(physical_y, context.height.saturating_sub(1));
        (final_x, final_y)
    }

    /// Sets the SGR attribute template for subsequently printed characters.
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.cursor.attributes = attributes;
    }

    /// Current SGR attribute template.
    pub fn attributes(&self) -> Attributes {
        self.cursor.attributes
    }

    /// Sets cursor visibility.
    pub fn set_visible(&mut self, visible: bool) {
        self.cursor.visible = visible;
    }

    /// True if the cursor is currently visible.
    pub fn is_visible(&self) -> bool {
        self.cursor.visible
    }

    /// Cursor shape (DECSCUSR).
    pub fn shape(&self) -> CursorShape {
        self.cursor.shape
    }

    /// Selects the cursor shape.
    pub fn set_shape(&mut self, shape: CursorShape) {
        self.cursor.shape = shape;
    }

    /// Moves the cursor to logical `(new_x, new_y)`, clamped to the context.
    pub fn move_to_logical(&mut self, new_x: usize, new_y: usize, context: &ScreenContext) {
        self.cursor.logical_x = min(new_x, context.width.saturating_sub(1));
        self.cursor.logical_y = min(new_y, context.max_logical_y());
    }

    /// Moves the cursor up by `n` logical rows, stopping at row 0.
    pub fn move_up(&mut self, n: usize) {
        self.cursor.logical_y = self.cursor.logical_y.saturating_sub(n);
    }

    /// Moves the cursor down by `n` logical rows, stopping at the region or
    /// screen bottom.
    pub fn move_down(&mut self, n: usize, context: &ScreenContext) {
        self.cursor.logical_y = min(
            self.cursor.logical_y.saturating_add(n),
            context.max_logical_y(),
        );
    }

    /// Moves the cursor left by `n` columns, stopping at column 0.
    pub fn move_left(&mut self, n: usize) {
        self.cursor.logical_x = self.cursor.logical_x.saturating_sub(n);
    }

    /// Moves the cursor right by `n` columns. `logical_x` may reach
    /// `context.width` to signal that the next print should wrap.
    pub fn move_right(&mut self, n: usize, context: &ScreenContext) {
        self.cursor.logical_x = min(self.cursor.logical_x.saturating_add(n), context.width);
    }

    /// Moves the cursor to column `new_x`, clamped to `width - 1`.
    pub fn move_to_logical_col(&mut self, new_x: usize, context: &ScreenContext) {
        self.cursor.logical_x = min(new_x, context.width.saturating_sub(1));
    }

    /// Moves the cursor to column 0 of the current row.
    pub fn carriage_return(&mut self) {
        self.cursor.logical_x = 0;
    }

    /// Restores the cursor from a saved snapshot, re-clamping to the
    /// current boundaries.
    pub fn restore(&mut self, saved: Cursor, context: &ScreenContext) {
        self.cursor = saved;
        self.cursor.logical_x = min(self.cursor.logical_x, context.width.saturating_sub(1));
        self.cursor.logical_y = min(self.cursor.logical_y, context.max_logical_y());
        trace!("cursor restored to {:?}", self.cursor);
    }

    /// Resets the cursor to the default state.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
    }
}
