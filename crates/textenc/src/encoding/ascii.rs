//! 7-bit ASCII.

use alloc::vec::Vec;

use crate::{
    code_point::{ASCII_REPLACEMENT_BYTE, REPLACEMENT},
    encoding::Encoding,
    logging::trace,
    text::Text,
};

pub(crate) fn encode_char(c: char) -> u8 {
    match u8::try_from(c) {
        Ok(byte) if byte.is_ascii() => byte,
        _ => {
            trace!(code_point = u32::from(c), "substituting unrepresentable code point in ASCII");
            ASCII_REPLACEMENT_BYTE
        }
    }
}

pub(crate) fn decode_byte(byte: u8) -> char {
    if byte.is_ascii() {
        char::from(byte)
    } else {
        REPLACEMENT
    }
}

/// Encodes `chars` as ASCII, writing `?` for anything above U+007F.
#[must_use]
pub fn encode<I: IntoIterator<Item = char>>(chars: I) -> Vec<u8> {
    Encoding::Ascii.encode(chars)
}

/// Decodes ASCII bytes, substituting U+FFFD for any byte with the high bit set.
#[must_use]
pub fn decode(bytes: &[u8]) -> Text {
    Encoding::Ascii.decode(bytes)
}
