//! UTF-8 with deterministic repair of malformed input.
//!
//! Encoding is the standard one: one to four bytes per code point, the lead
//! byte carrying the length in its leading one-bits and each continuation
//! byte (`10xxxxxx`) carrying six payload bits, most significant first.
//!
//! Decoding never fails. Well-formed sequences decode to their code point;
//! everything else decodes to [`REPLACEMENT`], exactly one per raw byte of the
//! rejected sequence:
//!
//! - a byte that cannot start a sequence (a stray continuation, `0xF8..=0xFF`)
//!   yields one replacement;
//! - a sequence interrupted by a non-continuation byte yields one replacement
//!   per byte consumed so far, and the interrupting byte is decoded afresh;
//! - a sequence cut off by the end of input yields one replacement per byte;
//! - a complete sequence whose value is overlong, a surrogate, or above
//!   `0x10FFFF` yields one replacement per byte.
//!
//! Because every replacement stands for exactly one input byte, decoding any
//! suffix of the input that starts at a code point boundary gives the same
//! code points as the corresponding suffix of the full decode. [`Chars`]
//! relies on this to report byte offsets for sub-views.
//!
//! Two decoders share this policy: [`Decoder`] is incremental and accepts
//! input in chunks, while [`Chars`] is a lazy iterator over a borrowed slice.

use alloc::vec::Vec;
use core::iter::{self, FusedIterator};

use crate::{
    code_point::{REPLACEMENT, to_char},
    encoding::Encoding,
    logging::trace,
    text::Text,
};

const CONTINUATION_MASK: u8 = 0b1100_0000;
const CONTINUATION_TAG: u8 = 0b1000_0000;
const PAYLOAD_MASK: u8 = 0b0011_1111;

/// The smallest value that needs a sequence of the given length; anything
/// below is overlong.
const MIN_VALUE: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & CONTINUATION_MASK == CONTINUATION_TAG
}

/// The total length of the sequence `lead` starts, if it starts one.
#[inline]
const fn sequence_len(lead: u8) -> Option<u8> {
    if lead & 0b1110_0000 == 0b1100_0000 {
        Some(2)
    } else if lead & 0b1111_0000 == 0b1110_0000 {
        Some(3)
    } else if lead & 0b1111_1000 == 0b1111_0000 {
        Some(4)
    } else {
        None
    }
}

/// The payload bits of a lead byte for a sequence of `len` bytes.
#[inline]
const fn lead_payload(lead: u8, len: u8) -> u32 {
    (lead & (0x7F >> len)) as u32
}

/// Accepts a completed sequence if its value is a valid, minimally encoded
/// code point.
#[inline]
fn accept(value: u32, len: u8) -> Option<char> {
    if value < MIN_VALUE[usize::from(len)] {
        return None;
    }
    to_char(value)
}

/// Encodes `chars` as UTF-8. Every code point is representable.
#[must_use]
pub fn encode<I: IntoIterator<Item = char>>(chars: I) -> Vec<u8> {
    Encoding::Utf8.encode(chars)
}

/// Decodes UTF-8, repairing malformed input as described in the module docs.
#[must_use]
pub fn decode(bytes: &[u8]) -> Text {
    // Each byte yields at most one code point.
    let mut out = Text::with_capacity(bytes.len());
    let mut decoder = Decoder::new();
    decoder.feed(bytes, &mut out);
    decoder.finish(&mut out);
    out
}

/// Counts the code points `bytes` decodes to.
#[must_use]
pub fn decoded_len(bytes: &[u8]) -> usize {
    Chars::new(bytes).count()
}

/// Incremental UTF-8 decoder.
///
/// A sequence split across two [`feed`](Self::feed) calls is completed by the
/// second one, so feeding any partition of a byte string produces the same
/// code points as decoding it in one piece. Call [`finish`](Self::finish)
/// after the last chunk to flush an unterminated sequence.
///
/// ```rust
/// use textenc::{REPLACEMENT, Text, encoding::utf8::Decoder};
///
/// let mut out = Text::new();
/// let mut decoder = Decoder::new();
/// decoder.feed(b"\xE2\x82", &mut out);
/// assert!(decoder.is_pending());
/// decoder.feed(b"\xAC\xE2", &mut out);
/// decoder.finish(&mut out);
/// assert_eq!(out.as_chars(), ['€', REPLACEMENT]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    /// Continuation bytes still needed by the sequence in progress.
    expected: u8,
    /// Bytes consumed by the sequence in progress, lead included.
    seen: u8,
    value: u32,
    position: usize,
}

impl Decoder {
    /// Creates a decoder with no sequence in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            expected: 0,
            seen: 0,
            value: 0,
            position: 0,
        }
    }

    /// Whether a multi-byte sequence has been started but not completed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.expected > 0
    }

    /// The number of bytes fed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Decodes `chunk`, pushing completed code points into `out`.
    pub fn feed<E: Extend<char> + ?Sized>(&mut self, chunk: &[u8], out: &mut E) {
        for &byte in chunk {
            self.step(byte, out);
            self.position += 1;
        }
    }

    /// Ends the input, flushing an unterminated sequence as replacements.
    pub fn finish<E: Extend<char> + ?Sized>(mut self, out: &mut E) {
        if self.is_pending() {
            self.reject(out);
        }
    }

    fn step<E: Extend<char> + ?Sized>(&mut self, byte: u8, out: &mut E) {
        if self.is_pending() {
            if is_continuation(byte) {
                self.value = (self.value << 6) | u32::from(byte & PAYLOAD_MASK);
                self.expected -= 1;
                self.seen += 1;

                if !self.is_pending() {
                    match accept(self.value, self.seen) {
                        Some(c) => {
                            out.extend(iter::once(c));
                            self.seen = 0;
                            self.value = 0;
                        }
                        None => self.reject(out),
                    }
                }
                return;
            }

            // Interrupted: give up on the sequence and decode `byte` afresh.
            self.reject(out);
        }

        if byte.is_ascii() {
            out.extend(iter::once(char::from(byte)));
            return;
        }

        match sequence_len(byte) {
            Some(len) => {
                self.expected = len - 1;
                self.seen = 1;
                self.value = lead_payload(byte, len);
            }
            None => {
                trace!(position = self.position, "invalid UTF-8 lead byte");
                out.extend(iter::once(REPLACEMENT));
            }
        }
    }

    fn reject<E: Extend<char> + ?Sized>(&mut self, out: &mut E) {
        trace!(
            position = self.position,
            count = self.seen,
            "replacing malformed UTF-8 sequence"
        );
        out.extend(iter::repeat_n(REPLACEMENT, usize::from(self.seen)));
        self.expected = 0;
        self.seen = 0;
        self.value = 0;
    }
}

/// Lazy iterator over the code points of a UTF-8 byte slice.
///
/// Yields exactly what [`decode`] would, one code point per step. Cloning it
/// is cheap, which makes it restartable.
#[derive(Debug, Clone)]
pub struct Chars<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Replacements still owed for a rejected sequence; they stand for the
    /// last `pending` bytes before `pos`.
    pending: usize,
}

impl<'a> Chars<'a> {
    /// Iterates over the code points of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            pending: 0,
        }
    }

    /// The byte offset at which the next code point starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos - self.pending
    }

    /// The bytes that have not been yielded yet.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[self.offset()..]
    }

    /// Marks the bytes of a rejected sequence, all but the one returned now,
    /// as owed.
    fn reject(&mut self, seen: usize) -> char {
        self.pending = seen - 1;
        REPLACEMENT
    }
}

impl Iterator for Chars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.pending > 0 {
            self.pending -= 1;
            return Some(REPLACEMENT);
        }

        let &lead = self.bytes.get(self.pos)?;
        self.pos += 1;

        if lead.is_ascii() {
            return Some(char::from(lead));
        }

        let Some(len) = sequence_len(lead) else {
            return Some(REPLACEMENT);
        };

        let mut value = lead_payload(lead, len);
        let mut seen = 1;
        while seen < usize::from(len) {
            match self.bytes.get(self.pos) {
                Some(&byte) if is_continuation(byte) => {
                    value = (value << 6) | u32::from(byte & PAYLOAD_MASK);
                    self.pos += 1;
                    seen += 1;
                }
                // Interrupted or truncated; the next byte stays unconsumed.
                _ => return Some(self.reject(seen)),
            }
        }

        Some(accept(value, len).unwrap_or_else(|| self.reject(seen)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.pos;
        (
            self.pending + remaining.div_ceil(4),
            Some(self.pending + remaining),
        )
    }
}

impl FusedIterator for Chars<'_> {}
