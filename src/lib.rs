// src/lib.rs

//! Host-agnostic VT/ANSI terminal engine.
//!
//! `vtcore` interprets the byte stream produced by a child process,
//! maintains an in-memory screen state (two buffers, scroll regions,
//! scrollback, a 256-color palette), and supports pointer-driven text
//! selection over that state. It performs no I/O of its own: rendering,
//! clipboard transport, and the PTY layer are external collaborators that
//! read the model and execute the `EmulatorAction`s processing produces.
//!
//! The usual entry point is [`Terminal`]:
//!
//! ```
//! use vtcore::{Config, Terminal};
//!
//! let mut term = Terminal::new(Config::default());
//! let actions = term.feed(b"hello \x1b[1;31mworld\x1b[0m");
//! assert!(actions.is_empty());
//! assert_eq!(term.emulator().visible_row(0).unwrap()[0].c, 'h');
//! ```

pub mod ansi;
pub mod color;
pub mod config;
pub mod glyph;
pub mod term;

pub use ansi::{AnsiParser, AnsiProcessor};
pub use color::{Color, NamedColor, Palette};
pub use config::Config;
pub use glyph::{AttrFlags, Attributes, Glyph, UnderlineStyle};
pub use term::{
    EmulatorAction, ModeFlags, SelectionKind, SnapMode, TerminalEmulator, TerminalSnapshot,
};

/// A complete terminal: the ANSI processor coupled to the emulator.
///
/// `feed` drives everything: bytes are lexed and parsed incrementally (a
/// UTF-8 character or escape sequence may span calls) and the resulting
/// commands are applied to the screen model synchronously. Any replies the
/// stream provokes (status reports, OSC queries) come back as
/// [`EmulatorAction`]s; the caller delivers them.
#[derive(Debug)]
pub struct Terminal {
    processor: AnsiProcessor,
    emulator: TerminalEmulator,
}

impl Terminal {
    /// Creates a terminal sized and tuned by `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Terminal {
            processor: AnsiProcessor::new(),
            emulator: TerminalEmulator::new(config),
        }
    }

    /// Processes a chunk of child-process output and returns the actions it
    /// produced, in order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<EmulatorAction> {
        let commands = self.processor.process_bytes(bytes);
        let mut actions = Vec::new();
        for command in commands {
            if let Some(action) = self.emulator.handle_command(command) {
                actions.push(action);
            }
        }
        actions
    }

    /// Resizes the grid, clamping the cursor and marking everything dirty.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.emulator.resize(cols, rows);
    }

    /// Read access to the emulator (render interface, modes, palette).
    pub fn emulator(&self) -> &TerminalEmulator {
        &self.emulator
    }

    /// Write access to the emulator (selection gestures, dirty clearing,
    /// viewport scrolling).
    pub fn emulator_mut(&mut self) -> &mut TerminalEmulator {
        &mut self.emulator
    }

    /// Starts a selection gesture at cell `(col, row)`.
    pub fn selection_start(&mut self, col: usize, row: usize, snap: SnapMode) {
        self.emulator.selection_start(col, row, snap);
    }

    /// Extends the selection gesture; `is_final` marks pointer release.
    pub fn selection_extend(
        &mut self,
        col: usize,
        row: usize,
        kind: SelectionKind,
        is_final: bool,
    ) {
        self.emulator.selection_extend(col, row, kind, is_final);
    }

    /// Clears any selection.
    pub fn selection_clear(&mut self) {
        self.emulator.selection_clear();
    }

    /// Extracted text of the current selection.
    #[must_use]
    pub fn selection_text(&self) -> Option<String> {
        self.emulator.selection_text()
    }
}
