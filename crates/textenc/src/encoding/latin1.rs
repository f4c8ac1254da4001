//! ISO-8859-1, the first 256 code points one byte each.

use alloc::vec::Vec;

use crate::{code_point::ASCII_REPLACEMENT_BYTE, encoding::Encoding, logging::trace, text::Text};

pub(crate) fn encode_char(c: char) -> u8 {
    u8::try_from(c).unwrap_or_else(|_| {
        trace!(code_point = u32::from(c), "substituting unrepresentable code point in Latin-1");
        ASCII_REPLACEMENT_BYTE
    })
}

pub(crate) fn decode_byte(byte: u8) -> char {
    char::from(byte)
}

/// Encodes `chars` as Latin-1, writing `?` for anything above U+00FF.
#[must_use]
pub fn encode<I: IntoIterator<Item = char>>(chars: I) -> Vec<u8> {
    Encoding::Latin1.encode(chars)
}

/// Decodes Latin-1 bytes. Every byte sequence is valid.
#[must_use]
pub fn decode(bytes: &[u8]) -> Text {
    Encoding::Latin1.decode(bytes)
}
