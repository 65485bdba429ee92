// src/ansi/lexer.rs

//! ANSI escape sequence lexer.
//! Converts a byte stream into `AnsiToken`s, processing byte by byte,
//! handling UTF-8 decoding and state across calls.
//!
//! The UTF-8 decoder is strict: it distinguishes malformed byte sequences,
//! overlong encodings, and invalid scalar values (surrogates, out of range),
//! so callers can test each failure class separately. Truncated sequences
//! are never an error mid-stream; the decoder buffers and waits for more
//! bytes until `finalize` is called.

use log::{trace, warn};
use std::mem;

/// Unicode replacement character (U+FFFD).
/// Used when encountering invalid UTF-8 sequences.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

const DEL_BYTE: u8 = 0x7F;
const ESC_BYTE: u8 = 0x1B;

const UNICODE_MAX_CODE_POINT: u32 = 0x10FFFF;
const UNICODE_SURROGATE_START: u32 = 0xD800;
const UNICODE_SURROGATE_END: u32 = 0xDFFF;

/// Minimum scalar value representable at each encoded length; anything
/// smaller is an overlong encoding.
const MIN_SCALAR_FOR_LEN: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

/// Classifies why a byte sequence failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Error {
    /// Structurally malformed: bad lead byte or missing continuation marker.
    InvalidSequence,
    /// Well-formed but encodes a scalar that has a shorter encoding.
    OverlongEncoding,
    /// Well-formed but encodes a surrogate or a value past U+10FFFF.
    InvalidScalar,
}

/// Represents the outcome of a single byte being processed by the `Utf8Decoder`.
#[derive(Debug, PartialEq, Eq)]
pub enum Utf8DecodeResult {
    /// Successfully decoded a valid Unicode character.
    Decoded(char),
    /// The byte sequence was invalid. Decoder is reset.
    Invalid(Utf8Error),
    /// Current byte was validly consumed/buffered; more bytes needed.
    NeedsMoreBytes,
}

/// Is `byte` a C0 control (0x00-0x1F) or DEL?
#[must_use]
pub fn is_c0(byte: u8) -> bool {
    byte < 0x20 || byte == DEL_BYTE
}

/// Is `byte` a C1 control (0x80-0x9F)?
#[must_use]
pub fn is_c1(byte: u8) -> bool {
    (0x80..=0x9F).contains(&byte)
}

/// Re-encodes a scalar value as UTF-8, appending to `out`.
pub fn encode(scalar: char, out: &mut Vec<u8>) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(scalar.encode_utf8(&mut buf).as_bytes());
}

/// Represents a single token identified by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnsiToken {
    /// A printable character, decoded from UTF-8.
    Print(char),
    /// A C0 control code (0x00 - 0x1F, plus DEL 0x7F).
    C0Control(u8),
}

/// Internal state machine for decoding UTF-8 byte streams incrementally.
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    scalar: u32,
    len: usize,
    expected: usize,
}

impl Utf8Decoder {
    /// Resets the decoder state.
    #[inline]
    pub fn reset(&mut self) {
        self.scalar = 0;
        self.len = 0;
        self.expected = 0;
    }

    /// True if a multi-byte sequence is in progress.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.len > 0
    }

    /// Decodes a single byte.
    pub fn decode(&mut self, byte: u8) -> Utf8DecodeResult {
        if self.len == 0 {
            return self.decode_first_byte(byte);
        }
        self.decode_continuation_byte(byte)
    }

    #[inline]
    fn decode_first_byte(&mut self, byte: u8) -> Utf8DecodeResult {
        match byte {
            0x00..=0x7F => Utf8DecodeResult::Decoded(byte as char),
            // 0xC0/0xC1 are accepted as leads so the completed sequence can
            // be reported as an overlong encoding rather than a generic
            // malformed one; same for 0xF5-0xF7 and out-of-range scalars.
            0xC0..=0xDF => {
                self.begin(byte & 0x1F, 2);
                Utf8DecodeResult::NeedsMoreBytes
            }
            0xE0..=0xEF => {
                self.begin(byte & 0x0F, 3);
                Utf8DecodeResult::NeedsMoreBytes
            }
            0xF0..=0xF7 => {
                self.begin(byte & 0x07, 4);
                Utf8DecodeResult::NeedsMoreBytes
            }
            // Continuation bytes as leads (0x80-0xBF) and 0xF8-0xFF have no
            // mapping at all.
            _ => {
                warn!("invalid utf8 lead byte: {:#04x}", byte);
                self.reset();
                Utf8DecodeResult::Invalid(Utf8Error::InvalidSequence)
            }
        }
    }

    #[inline]
    fn begin(&mut self, payload: u8, expected: usize) {
        self.scalar = payload as u32;
        self.len = 1;
        self.expected = expected;
    }

    #[inline]
    fn decode_continuation_byte(&mut self, byte: u8) -> Utf8DecodeResult {
        if byte & 0xC0 != 0x80 {
            // Not a continuation byte; the buffered sequence is invalid.
            self.reset();
            return Utf8DecodeResult::Invalid(Utf8Error::InvalidSequence);
        }

        self.scalar = (self.scalar << 6) | (byte & 0x3F) as u32;
        self.len += 1;

        if self.len != self.expected {
            return Utf8DecodeResult::NeedsMoreBytes;
        }

        let scalar = self.scalar;
        let expected = self.expected;
        self.reset();

        if scalar < MIN_SCALAR_FOR_LEN[expected] {
            warn!("overlong utf8 encoding of U+{:04X}", scalar);
            return Utf8DecodeResult::Invalid(Utf8Error::OverlongEncoding);
        }
        if (UNICODE_SURROGATE_START..=UNICODE_SURROGATE_END).contains(&scalar)
            || scalar > UNICODE_MAX_CODE_POINT
        {
            warn!("invalid unicode scalar U+{:04X}", scalar);
            return Utf8DecodeResult::Invalid(Utf8Error::InvalidScalar);
        }
        match char::from_u32(scalar) {
            Some(c) => Utf8DecodeResult::Decoded(c),
            None => Utf8DecodeResult::Invalid(Utf8Error::InvalidScalar),
        }
    }
}

/// Lexer that processes a stream of bytes into `AnsiToken`s.
#[derive(Debug, Clone, Default)]
pub struct AnsiLexer {
    tokens: Vec<AnsiToken>,
    utf8_decoder: Utf8Decoder,
}

impl AnsiLexer {
    /// Creates a new `AnsiLexer`.
    pub fn new() -> Self {
        AnsiLexer::default()
    }

    /// Determines if a byte is a C0 control that should unambiguously
    /// interrupt an ongoing UTF-8 sequence. C1 codes are *not* checked here
    /// because their byte values are valid UTF-8 continuations; the decoder
    /// resolves those itself.
    #[inline]
    fn is_interrupting_control(byte: u8) -> bool {
        is_c0(byte)
    }

    fn process_byte_as_new_token(&mut self, byte: u8) {
        // Called with the decoder idle: decide whether `byte` is a control
        // code or starts a new UTF-8 sequence.
        if is_c0(byte) {
            self.tokens.push(AnsiToken::C0Control(byte));
            return;
        }
        match self.utf8_decoder.decode(byte) {
            Utf8DecodeResult::Decoded(c) => self.tokens.push(AnsiToken::Print(c)),
            Utf8DecodeResult::NeedsMoreBytes => { /* Byte buffered, wait for more */ }
            Utf8DecodeResult::Invalid(err) => {
                warn!("invalid utf8 byte {:#04x}: {:?}", byte, err);
                self.tokens.push(AnsiToken::Print(REPLACEMENT_CHARACTER));
            }
        }
    }

    /// Processes a single byte and updates the lexer state.
    pub fn process_byte(&mut self, byte: u8) {
        if !self.utf8_decoder.in_progress() {
            self.process_byte_as_new_token(byte);
            return;
        }

        // A multi-byte character is being built. ESC and other C0 controls
        // abort it; the control itself is then processed from ground.
        if Self::is_interrupting_control(byte) {
            warn!("control byte {:#04x} interrupted a utf8 sequence", byte);
            self.tokens.push(AnsiToken::Print(REPLACEMENT_CHARACTER));
            self.utf8_decoder.reset();
            self.process_byte_as_new_token(byte);
            return;
        }

        match self.utf8_decoder.decode(byte) {
            Utf8DecodeResult::Decoded(c) => self.tokens.push(AnsiToken::Print(c)),
            Utf8DecodeResult::Invalid(_) => {
                // The buffered sequence is broken; emit a replacement and
                // resynchronize by reprocessing `byte` from ground state.
                self.tokens.push(AnsiToken::Print(REPLACEMENT_CHARACTER));
                self.process_byte_as_new_token(byte);
            }
            Utf8DecodeResult::NeedsMoreBytes => { /* Valid continuation, buffered. */ }
        }
    }

    /// Consumes and returns all accumulated tokens.
    pub fn take_tokens(&mut self) -> Vec<AnsiToken> {
        trace!("taking {} tokens from lexer", self.tokens.len());
        mem::take(&mut self.tokens)
    }

    /// Finalizes any incomplete UTF-8 sequence, e.g. at end of stream.
    pub fn finalize(&mut self) {
        if self.utf8_decoder.in_progress() {
            self.tokens.push(AnsiToken::Print(REPLACEMENT_CHARACTER));
            self.utf8_decoder.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Utf8DecodeResult {
        let mut decoder = Utf8Decoder::default();
        let mut last = Utf8DecodeResult::NeedsMoreBytes;
        for &b in bytes {
            last = decoder.decode(b);
        }
        last
    }

    #[test]
    fn decodes_ascii_and_multibyte() {
        assert_eq!(decode_all(b"A"), Utf8DecodeResult::Decoded('A'));
        assert_eq!(decode_all("é".as_bytes()), Utf8DecodeResult::Decoded('é'));
        assert_eq!(decode_all("世".as_bytes()), Utf8DecodeResult::Decoded('世'));
        assert_eq!(decode_all("🦀".as_bytes()), Utf8DecodeResult::Decoded('🦀'));
    }

    #[test]
    fn encode_then_decode_roundtrips() {
        for c in ['\0', 'A', '\u{7F}', '\u{80}', 'é', '\u{7FF}', '\u{800}', '世', '\u{FFFD}', '\u{10000}', '\u{10FFFF}'] {
            let mut bytes = Vec::new();
            encode(c, &mut bytes);
            assert_eq!(decode_all(&bytes), Utf8DecodeResult::Decoded(c), "roundtrip of {:?}", c);
        }
    }

    #[test]
    fn bad_continuation_is_invalid_sequence() {
        assert_eq!(
            decode_all(&[0xC3, 0x41]),
            Utf8DecodeResult::Invalid(Utf8Error::InvalidSequence)
        );
    }

    #[test]
    fn continuation_as_lead_is_invalid_sequence() {
        assert_eq!(
            decode_all(&[0x80]),
            Utf8DecodeResult::Invalid(Utf8Error::InvalidSequence)
        );
        assert_eq!(
            decode_all(&[0xFF]),
            Utf8DecodeResult::Invalid(Utf8Error::InvalidSequence)
        );
    }

    #[test]
    fn overlong_encodings_are_classified() {
        // 2-byte encoding of '/', 3-byte encoding of NUL, 4-byte of U+0800.
        assert_eq!(
            decode_all(&[0xC0, 0xAF]),
            Utf8DecodeResult::Invalid(Utf8Error::OverlongEncoding)
        );
        assert_eq!(
            decode_all(&[0xE0, 0x80, 0x80]),
            Utf8DecodeResult::Invalid(Utf8Error::OverlongEncoding)
        );
        assert_eq!(
            decode_all(&[0xF0, 0x80, 0xA0, 0x80]),
            Utf8DecodeResult::Invalid(Utf8Error::OverlongEncoding)
        );
    }

    #[test]
    fn surrogates_and_out_of_range_are_invalid_scalars() {
        // U+D800 and U+110000.
        assert_eq!(
            decode_all(&[0xED, 0xA0, 0x80]),
            Utf8DecodeResult::Invalid(Utf8Error::InvalidScalar)
        );
        assert_eq!(
            decode_all(&[0xF4, 0x90, 0x80, 0x80]),
            Utf8DecodeResult::Invalid(Utf8Error::InvalidScalar)
        );
    }

    #[test]
    fn truncated_input_waits_for_more_bytes() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(0xE4), Utf8DecodeResult::NeedsMoreBytes);
        assert_eq!(decoder.decode(0xB8), Utf8DecodeResult::NeedsMoreBytes);
        assert!(decoder.in_progress());
        assert_eq!(decoder.decode(0x96), Utf8DecodeResult::Decoded('世'));
    }

    #[test]
    fn lexer_replaces_interrupted_sequence_and_keeps_control() {
        let mut lexer = AnsiLexer::new();
        for &b in &[0xE4u8, 0x1B] {
            lexer.process_byte(b);
        }
        assert_eq!(
            lexer.take_tokens(),
            vec![
                AnsiToken::Print(REPLACEMENT_CHARACTER),
                AnsiToken::C0Control(0x1B)
            ]
        );
    }

    #[test]
    fn lexer_finalize_flushes_partial_char() {
        let mut lexer = AnsiLexer::new();
        lexer.process_byte(0xE4);
        lexer.finalize();
        assert_eq!(lexer.take_tokens(), vec![AnsiToken::Print(REPLACEMENT_CHARACTER)]);
    }

    #[test]
    fn control_classification() {
        assert!(is_c0(0x07));
        assert!(is_c0(0x7F));
        assert!(!is_c0(b'A'));
        assert!(is_c1(0x9B));
        assert!(!is_c1(0x7F));
    }
}
