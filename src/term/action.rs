// src/term/action.rs

//! Actions the emulator signals to its embedder.
//!
//! The core never performs I/O itself. Processing input bytes may produce
//! `EmulatorAction`s that the embedding layer executes: writing synthesized
//! replies back to the child process, updating the window title, moving
//! text to the clipboard, and so on.

/// Output the emulator signals to the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmulatorAction {
    /// Deliver bytes to the child process's input side (status reports,
    /// cursor position reports, OSC query replies). Must be queued, never
    /// written from within processing.
    WritePty(Vec<u8>),
    /// Set the window/icon title (OSC 0/1/2).
    SetTitle(String),
    /// Ring the bell (BEL).
    RingBell,
    /// Publish data to the system clipboard (OSC 52 set). The payload is
    /// the base64 text exactly as transmitted; transport decodes it.
    CopyToClipboard {
        /// OSC 52 selection designator (`c`, `p`, `s`, ...).
        selection: char,
        payload: Vec<u8>,
    },
    /// The application asked for the clipboard contents (OSC 52 query);
    /// the embedder should answer with an OSC 52 reply over `WritePty`.
    QueryClipboard {
        /// OSC 52 selection designator.
        selection: char,
    },
    /// One or more palette or special-color entries changed (OSC 4/10/11/
    /// 12/104/...); renderers caching resolved colors must repaint.
    PaletteChanged,
    /// Cursor visibility changed (DECTCEM).
    SetCursorVisibility(bool),
    /// The whole screen needs repainting (buffer switch, reverse video).
    RequestRedraw,
}
