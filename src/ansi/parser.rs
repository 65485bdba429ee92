// src/ansi/parser.rs

//! Token-level ANSI escape sequence parser.
//!
//! Consumes `AnsiToken`s from the lexer and produces structured
//! `AnsiCommand`s via a byte-at-a-time state machine. Exactly one parse
//! sub-state is active at any time; entering a new sequence discards any
//! partially accumulated one, so malformed input can never desynchronize
//! the stream.

use super::commands::{AnsiCommand, StringKind};
use super::lexer::{encode, AnsiToken};
use super::{MAX_CSI_INTERMEDIATES, MAX_CSI_PARAMS, MAX_CSI_RAW_LEN, MAX_CSI_SUBPARAMS, MAX_STRING_LEN};
use log::{trace, warn};
use std::collections::VecDeque;

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

/// States for the ANSI escape sequence parser state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserState {
    /// Default state: printable characters and C0 controls pass through.
    #[default]
    Ground,
    /// Received ESC, expecting a byte that selects the sequence type.
    Escape,
    /// Received ESC plus an intermediate (`(`, `)`, `*`, `+`, `#`, `%`),
    /// expecting the single final byte.
    EscapeIntermediate(char),
    /// Received CSI, before any parameter byte.
    CsiEntry,
    /// Accumulating CSI parameters (digits, `;`, `:`).
    CsiParam,
    /// Accumulating CSI intermediate bytes (0x20-0x2F).
    CsiIntermediate,
    /// Swallowing an oversized or malformed CSI until its final byte.
    CsiIgnore,
    /// Accumulating an OSC/DCS/PM/APC string payload.
    StringSequence,
    /// Received ESC inside a string payload; `\` completes it as ST,
    /// anything else aborts the string.
    StringEscape,
}

/// The ANSI parser state machine.
#[derive(Debug)]
pub struct AnsiParser {
    state: ParserState,
    csi_params: Vec<Vec<u16>>,
    csi_intermediates: Vec<u8>,
    csi_private: Option<char>,
    csi_raw_len: usize,
    string_kind: StringKind,
    string_buf: Vec<u8>,
    command_queue: VecDeque<AnsiCommand>,
}

impl Default for AnsiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiParser {
    /// Creates a new ANSI parser in the ground state.
    pub fn new() -> Self {
        AnsiParser {
            state: ParserState::Ground,
            csi_params: Vec::with_capacity(MAX_CSI_PARAMS),
            csi_intermediates: Vec::with_capacity(MAX_CSI_INTERMEDIATES),
            csi_private: None,
            csi_raw_len: 0,
            string_kind: StringKind::Osc,
            string_buf: Vec::new(),
            command_queue: VecDeque::new(),
        }
    }

    /// Feeds a single token into the state machine.
    pub fn process_token(&mut self, token: AnsiToken) {
        match token {
            AnsiToken::C0Control(ESC) => self.handle_esc_byte(),
            AnsiToken::C0Control(byte) => self.handle_c0(byte),
            AnsiToken::Print(c) => self.handle_print(c),
        }
    }

    /// Consumes and returns all parsed commands.
    pub fn take_commands(&mut self) -> Vec<AnsiCommand> {
        self.command_queue.drain(..).collect()
    }

    fn push_command(&mut self, command: AnsiCommand) {
        self.command_queue.push_back(command);
    }

    // --- ESC handling ---

    fn handle_esc_byte(&mut self) {
        match self.state {
            ParserState::StringSequence => {
                // Potential ST (ESC \) or abort; decided by the next byte.
                self.state = ParserState::StringEscape;
            }
            other => {
                if other != ParserState::Ground {
                    trace!("ESC aborted {:?}", other);
                }
                self.clear_csi();
                self.state = ParserState::Escape;
            }
        }
    }

    fn handle_c0(&mut self, byte: u8) {
        match self.state {
            ParserState::StringSequence => {
                if byte == BEL && self.string_kind == StringKind::Osc {
                    // Legacy BEL terminator; only OSC honors it, the other
                    // string families treat BEL as payload data.
                    self.dispatch_string();
                    self.state = ParserState::Ground;
                } else if self.string_buf.len() < MAX_STRING_LEN {
                    self.string_buf.push(byte);
                }
            }
            ParserState::StringEscape => {
                // ESC followed by a control: the string is aborted and the
                // control executes from ground.
                warn!("string sequence aborted by ESC + control {:#04x}", byte);
                self.string_buf.clear();
                self.state = ParserState::Ground;
                self.push_c0(byte);
            }
            ParserState::Ground => self.push_c0(byte),
            // A control inside an escape sequence aborts the sequence but
            // still executes; the accumulator is discarded.
            _ => {
                trace!("C0 {:#04x} aborted {:?}", byte, self.state);
                self.clear_csi();
                self.state = ParserState::Ground;
                self.push_c0(byte);
            }
        }
    }

    fn push_c0(&mut self, byte: u8) {
        if let Some(cmd) = AnsiCommand::from_c0(byte) {
            self.push_command(cmd);
        }
    }

    fn handle_print(&mut self, c: char) {
        match self.state {
            ParserState::Ground => self.push_command(AnsiCommand::Print(c)),
            ParserState::Escape => self.handle_escape_char(c),
            ParserState::EscapeIntermediate(intermediate) => {
                if let Some(cmd) = AnsiCommand::from_esc_intermediate(intermediate, c) {
                    self.push_command(cmd);
                } else {
                    self.push_command(AnsiCommand::Ignore(c as u8));
                }
                self.state = ParserState::Ground;
            }
            ParserState::CsiEntry => self.handle_csi_entry(c),
            ParserState::CsiParam => self.handle_csi_param(c),
            ParserState::CsiIntermediate => self.handle_csi_intermediate(c),
            ParserState::CsiIgnore => self.handle_csi_ignore(c),
            ParserState::StringSequence => {
                if self.string_buf.len() < MAX_STRING_LEN {
                    encode(c, &mut self.string_buf);
                } else {
                    trace!("string payload cap {} reached, dropping {:?}", MAX_STRING_LEN, c);
                }
            }
            ParserState::StringEscape => {
                if c == '\\' {
                    // ESC \ == ST: the payload is complete.
                    self.dispatch_string();
                    self.state = ParserState::Ground;
                } else {
                    // A bare ESC aborted the string; the byte after it
                    // starts a fresh escape sequence.
                    warn!("string sequence aborted by ESC '{}'", c);
                    self.string_buf.clear();
                    self.state = ParserState::Escape;
                    self.handle_escape_char(c);
                }
            }
        }
    }

    /// Handles the byte following ESC.
    fn handle_escape_char(&mut self, c: char) {
        match c {
            '[' => {
                self.clear_csi();
                self.state = ParserState::CsiEntry;
            }
            ']' => self.enter_string(StringKind::Osc),
            'P' => self.enter_string(StringKind::Dcs),
            '^' => self.enter_string(StringKind::Pm),
            '_' => self.enter_string(StringKind::Apc),
            '(' | ')' | '*' | '+' | '#' | '%' => {
                self.state = ParserState::EscapeIntermediate(c);
            }
            '\\' => {
                // Stray ST with nothing to terminate.
                self.state = ParserState::Ground;
            }
            _ => {
                match AnsiCommand::from_esc(c) {
                    Some(cmd) => self.push_command(cmd),
                    None => {
                        trace!("ignoring unknown byte after ESC: {:?}", c);
                        self.push_command(AnsiCommand::Ignore(c as u8));
                    }
                }
                self.state = ParserState::Ground;
            }
        }
    }

    fn enter_string(&mut self, kind: StringKind) {
        self.string_kind = kind;
        self.string_buf.clear();
        self.state = ParserState::StringSequence;
    }

    fn dispatch_string(&mut self) {
        let payload = std::mem::take(&mut self.string_buf);
        let command = match self.string_kind {
            StringKind::Osc => AnsiCommand::Osc(payload),
            StringKind::Dcs => AnsiCommand::Dcs(payload),
            StringKind::Pm => AnsiCommand::Pm(payload),
            StringKind::Apc => AnsiCommand::Apc(payload),
        };
        self.push_command(command);
    }

    // --- CSI handling ---

    /// Handles the first byte after CSI.
    fn handle_csi_entry(&mut self, c: char) {
        match c {
            '0'..='9' => {
                self.state = ParserState::CsiParam;
                self.push_csi_digit(c);
            }
            ';' => {
                self.state = ParserState::CsiParam;
                self.next_csi_param();
            }
            ':' => {
                self.state = ParserState::CsiParam;
                self.next_csi_subparam();
            }
            '?' | '>' | '=' => {
                // A leading private marker flags the sequence; it is not a
                // parameter. Only the first is kept.
                if self.csi_private.is_none() {
                    self.csi_private = Some(c);
                } else {
                    warn!("multiple private markers in CSI sequence");
                }
            }
            '\u{20}'..='\u{2F}' => self.push_csi_intermediate(c),
            '\u{40}'..='\u{7E}' => self.csi_dispatch(c as u8),
            _ => {
                warn!("unexpected byte {:?} in CSI entry, aborting", c);
                self.clear_csi();
                self.state = ParserState::Ground;
            }
        }
    }

    /// Handles CSI parameter bytes (digits, `;`, `:`).
    fn handle_csi_param(&mut self, c: char) {
        match c {
            '0'..='9' => self.push_csi_digit(c),
            ';' => self.next_csi_param(),
            ':' => self.next_csi_subparam(),
            '\u{20}'..='\u{2F}' => self.push_csi_intermediate(c),
            '\u{40}'..='\u{7E}' => self.csi_dispatch(c as u8),
            _ => {
                warn!("unexpected byte {:?} in CSI params, ignoring sequence", c);
                self.state = ParserState::CsiIgnore;
            }
        }
    }

    /// Handles CSI intermediate bytes (after params, before the final byte).
    fn handle_csi_intermediate(&mut self, c: char) {
        match c {
            '\u{20}'..='\u{2F}' => self.push_csi_intermediate(c),
            '\u{40}'..='\u{7E}' => self.csi_dispatch(c as u8),
            _ => {
                // Parameter bytes after an intermediate are out of order.
                warn!("unexpected byte {:?} after CSI intermediates", c);
                self.state = ParserState::CsiIgnore;
            }
        }
    }

    /// Swallows the remainder of an ignored CSI sequence. The final byte
    /// still returns the machine to ground; nothing is dispatched.
    fn handle_csi_ignore(&mut self, c: char) {
        if ('\u{40}'..='\u{7E}').contains(&c) {
            trace!("ignored CSI sequence terminated by '{}'", c);
            self.clear_csi();
            self.state = ParserState::Ground;
        }
    }

    fn clear_csi(&mut self) {
        self.csi_params.clear();
        self.csi_intermediates.clear();
        self.csi_private = None;
        self.csi_raw_len = 0;
    }

    /// Accounts one raw accumulator byte; switches to the ignore state when
    /// the budget is exhausted so the terminator is still honored.
    fn csi_budget_ok(&mut self) -> bool {
        self.csi_raw_len += 1;
        if self.csi_raw_len > MAX_CSI_RAW_LEN {
            warn!("CSI raw budget ({}) exhausted", MAX_CSI_RAW_LEN);
            self.state = ParserState::CsiIgnore;
            return false;
        }
        true
    }

    /// Appends a digit to the current sub-parameter.
    fn push_csi_digit(&mut self, c: char) {
        if !self.csi_budget_ok() {
            return;
        }
        let digit = (c as u8 - b'0') as u16;
        if self.csi_params.is_empty() {
            self.csi_params.push(vec![0]);
        }
        let param = self.csi_params.last_mut().expect("params non-empty");
        let slot = param.last_mut().expect("subparams non-empty");
        *slot = slot.saturating_mul(10).saturating_add(digit);
    }

    /// Starts a new top-level parameter slot (defaulting to 0).
    fn next_csi_param(&mut self) {
        if !self.csi_budget_ok() {
            return;
        }
        if self.csi_params.is_empty() {
            // A leading separator implies an empty first parameter.
            self.csi_params.push(vec![0]);
        }
        if self.csi_params.len() < MAX_CSI_PARAMS {
            self.csi_params.push(vec![0]);
        } else {
            warn!("max CSI params ({}) reached, ignoring sequence tail", MAX_CSI_PARAMS);
            self.state = ParserState::CsiIgnore;
        }
    }

    /// Starts a new colon-delimited sub-parameter of the current slot.
    fn next_csi_subparam(&mut self) {
        if !self.csi_budget_ok() {
            return;
        }
        if self.csi_params.is_empty() {
            self.csi_params.push(vec![0]);
        }
        let param = self.csi_params.last_mut().expect("params non-empty");
        if param.len() < MAX_CSI_SUBPARAMS {
            param.push(0);
        } else {
            warn!("max CSI sub-params ({}) reached, ignoring sequence tail", MAX_CSI_SUBPARAMS);
            self.state = ParserState::CsiIgnore;
        }
    }

    fn push_csi_intermediate(&mut self, c: char) {
        if !self.csi_budget_ok() {
            return;
        }
        if self.csi_intermediates.len() < MAX_CSI_INTERMEDIATES {
            self.csi_intermediates.push(c as u8);
            self.state = ParserState::CsiIntermediate;
        } else {
            self.state = ParserState::CsiIgnore;
        }
    }

    /// Dispatches a completed CSI sequence and returns to ground.
    fn csi_dispatch(&mut self, final_byte: u8) {
        trace!(
            "dispatch CSI: final='{}', params={:?}, intermediates={:?}, private={:?}",
            final_byte as char,
            self.csi_params,
            self.csi_intermediates,
            self.csi_private
        );
        // SM/RM and DECSET/DECRST accept a mode list; emit one command per
        // mode so the interpreter handles each independently.
        let is_mode_op = self.csi_intermediates.is_empty()
            && matches!(final_byte, b'h' | b'l')
            && self.csi_params.len() > 1;
        if is_mode_op {
            let params = std::mem::take(&mut self.csi_params);
            for param in &params {
                if let Some(cmd) = AnsiCommand::from_csi(
                    std::slice::from_ref(param),
                    &self.csi_intermediates,
                    self.csi_private,
                    final_byte,
                ) {
                    self.push_command(cmd);
                }
            }
        } else if let Some(cmd) = AnsiCommand::from_csi(
            &self.csi_params,
            &self.csi_intermediates,
            self.csi_private,
            final_byte,
        ) {
            self.push_command(cmd);
        }
        self.clear_csi();
        self.state = ParserState::Ground;
    }
}
