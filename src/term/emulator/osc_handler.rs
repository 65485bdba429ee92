// src/term/emulator/osc_handler.rs

//! Operating System Command dispatch.
//!
//! The payload arrives as raw bytes; it is split on `;` and dispatched by
//! the leading integer. Clipboard transport (OSC 52) is delegated to the
//! embedder through actions; only the palette and hyperlink state live
//! here.

use super::TerminalEmulator;
use crate::color::{format_color_spec, parse_color_spec};
use crate::glyph::AttrFlags;
use crate::term::action::EmulatorAction;
use log::{debug, warn};

/// Dynamic-color OSC numbers set/queried via 10/11/12 and reset via
/// 110/111/112.
const OSC_FOREGROUND: u32 = 10;
const OSC_BACKGROUND: u32 = 11;
const OSC_CURSOR: u32 = 12;

impl TerminalEmulator {
    pub(super) fn handle_osc(&mut self, data: &[u8]) -> Option<EmulatorAction> {
        let osc_str = String::from_utf8_lossy(data);
        let mut parts = osc_str.splitn(2, ';');
        let ps_str = parts.next().unwrap_or("");
        let content = parts.next().unwrap_or("");

        let Ok(ps) = ps_str.parse::<u32>() else {
            warn!("OSC with non-numeric code: {:?}", ps_str);
            return None;
        };

        match ps {
            0 | 1 | 2 => Some(EmulatorAction::SetTitle(content.to_string())),
            4 => self.handle_osc_palette(content),
            8 => {
                self.handle_osc_hyperlink(content);
                None
            }
            OSC_FOREGROUND | OSC_BACKGROUND | OSC_CURSOR => {
                self.handle_osc_dynamic_color(ps, content)
            }
            52 => self.handle_osc_clipboard(content),
            104 => {
                // With no argument the whole palette resets.
                if content.is_empty() {
                    for idx in 0..=255u8 {
                        self.palette.reset(idx);
                    }
                } else {
                    for part in content.split(';') {
                        if let Ok(idx) = part.parse::<u8>() {
                            self.palette.reset(idx);
                        }
                    }
                }
                Some(EmulatorAction::PaletteChanged)
            }
            110 => {
                self.palette.reset_foreground();
                Some(EmulatorAction::PaletteChanged)
            }
            111 => {
                self.palette.reset_background();
                Some(EmulatorAction::PaletteChanged)
            }
            112 => {
                self.palette.reset_cursor();
                Some(EmulatorAction::PaletteChanged)
            }
            _ => {
                debug!("unhandled OSC command code: {} ({:?})", ps, content);
                None
            }
        }
    }

    /// OSC 4: `idx;spec` pairs. A spec of `?` queries; otherwise the entry
    /// is set.
    fn handle_osc_palette(&mut self, content: &str) -> Option<EmulatorAction> {
        let mut changed = false;
        let mut reply = Vec::new();
        let mut fields = content.split(';');

        while let (Some(idx_str), Some(spec)) = (fields.next(), fields.next()) {
            let Ok(idx) = idx_str.parse::<u8>() else {
                warn!("OSC 4 with invalid color index: {:?}", idx_str);
                continue;
            };
            if spec == "?" {
                let rgb = self.palette.get(idx);
                reply.extend_from_slice(
                    format!("\x1b]4;{};{}\x1b\\", idx, format_color_spec(rgb)).as_bytes(),
                );
            } else if let Some(rgb) = parse_color_spec(spec) {
                self.palette.set(idx, rgb);
                changed = true;
            } else {
                warn!("OSC 4 with unparseable color spec: {:?}", spec);
            }
        }

        if !reply.is_empty() {
            Some(EmulatorAction::WritePty(reply))
        } else if changed {
            Some(EmulatorAction::PaletteChanged)
        } else {
            None
        }
    }

    /// OSC 10/11/12: set or query the dynamic foreground/background/cursor
    /// colors.
    fn handle_osc_dynamic_color(&mut self, ps: u32, content: &str) -> Option<EmulatorAction> {
        if content == "?" {
            let rgb = match ps {
                OSC_FOREGROUND => self.palette.foreground,
                OSC_BACKGROUND => self.palette.background,
                _ => self.palette.cursor,
            };
            let reply = format!("\x1b]{};{}\x1b\\", ps, format_color_spec(rgb));
            return Some(EmulatorAction::WritePty(reply.into_bytes()));
        }
        let Some(rgb) = parse_color_spec(content) else {
            warn!("OSC {} with unparseable color spec: {:?}", ps, content);
            return None;
        };
        match ps {
            OSC_FOREGROUND => self.palette.foreground = rgb,
            OSC_BACKGROUND => self.palette.background = rgb,
            _ => self.palette.cursor = rgb,
        }
        Some(EmulatorAction::PaletteChanged)
    }

    /// OSC 8: `params;uri`. A non-empty URI starts associating printed
    /// cells with it; an empty URI ends the association.
    fn handle_osc_hyperlink(&mut self, content: &str) {
        let mut parts = content.splitn(2, ';');
        let _params = parts.next().unwrap_or("");
        let uri = parts.next().unwrap_or("");

        let mut attrs = self.cursor_controller.attributes();
        if uri.is_empty() {
            attrs.link_id = 0;
            attrs.flags.remove(AttrFlags::URL);
        } else {
            attrs.link_id = self.hyperlinks.intern(uri);
            attrs.flags.insert(AttrFlags::URL);
        }
        self.cursor_controller.set_attributes(attrs);
    }

    /// OSC 52: `selection;payload`. A payload of `?` asks for the clipboard
    /// contents; anything else is base64 text to publish. Transport stays
    /// external in both directions.
    fn handle_osc_clipboard(&mut self, content: &str) -> Option<EmulatorAction> {
        let mut parts = content.splitn(2, ';');
        let selection = parts.next().unwrap_or("c").chars().next().unwrap_or('c');
        let payload = parts.next().unwrap_or("");

        if payload == "?" {
            Some(EmulatorAction::QueryClipboard { selection })
        } else {
            Some(EmulatorAction::CopyToClipboard {
                selection,
                payload: payload.as_bytes().to_vec(),
            })
        }
    }
}
