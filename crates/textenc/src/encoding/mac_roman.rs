//! Mac OS Roman: ASCII below 0x80 and a fixed table above it.

use alloc::vec::Vec;

use crate::{code_point::ASCII_REPLACEMENT_BYTE, encoding::Encoding, logging::trace, text::Text};

/// Code points of bytes `0x80..=0xFF`, indexed by `byte - 0x80`.
static HIGH_HALF: [char; 128] = [
    // 0x80
    '\u{00C4}', '\u{00C5}', '\u{00C7}', '\u{00C9}', '\u{00D1}', '\u{00D6}', '\u{00DC}', '\u{00E1}',
    '\u{00E0}', '\u{00E2}', '\u{00E4}', '\u{00E3}', '\u{00E5}', '\u{00E7}', '\u{00E9}', '\u{00E8}',
    // 0x90
    '\u{00EA}', '\u{00EB}', '\u{00ED}', '\u{00EC}', '\u{00EE}', '\u{00EF}', '\u{00F1}', '\u{00F3}',
    '\u{00F2}', '\u{00F4}', '\u{00F6}', '\u{00F5}', '\u{00FA}', '\u{00F9}', '\u{00FB}', '\u{00FC}',
    // 0xA0
    '\u{2020}', '\u{00B0}', '\u{00A2}', '\u{00A3}', '\u{00A7}', '\u{2022}', '\u{00B6}', '\u{00DF}',
    '\u{00AE}', '\u{00A9}', '\u{2122}', '\u{00B4}', '\u{00A8}', '\u{2260}', '\u{00C6}', '\u{00D8}',
    // 0xB0
    '\u{221E}', '\u{00B1}', '\u{2264}', '\u{2265}', '\u{00A5}', '\u{00B5}', '\u{2202}', '\u{2211}',
    '\u{220F}', '\u{03C0}', '\u{222B}', '\u{00AA}', '\u{00BA}', '\u{03A9}', '\u{00E6}', '\u{00F8}',
    // 0xC0
    '\u{00BF}', '\u{00A1}', '\u{00AC}', '\u{221A}', '\u{0192}', '\u{2248}', '\u{2206}', '\u{00AB}',
    '\u{00BB}', '\u{2026}', '\u{00A0}', '\u{00C0}', '\u{00C3}', '\u{00D5}', '\u{0152}', '\u{0153}',
    // 0xD0
    '\u{2013}', '\u{2014}', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{00F7}', '\u{25CA}',
    '\u{00FF}', '\u{0178}', '\u{2044}', '\u{20AC}', '\u{2039}', '\u{203A}', '\u{FB01}', '\u{FB02}',
    // 0xE0
    '\u{2021}', '\u{00B7}', '\u{201A}', '\u{201E}', '\u{2030}', '\u{00C2}', '\u{00CA}', '\u{00C1}',
    '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}', '\u{00CC}', '\u{00D3}', '\u{00D4}',
    // 0xF0
    '\u{F8FF}', '\u{00D2}', '\u{00DA}', '\u{00DB}', '\u{00D9}', '\u{0131}', '\u{02C6}', '\u{02DC}',
    '\u{00AF}', '\u{02D8}', '\u{02D9}', '\u{02DA}', '\u{00B8}', '\u{02DD}', '\u{02DB}', '\u{02C7}',
];

/// The byte encoding `c`, if MacRoman can represent it.
pub(crate) fn lookup(c: char) -> Option<u8> {
    if c.is_ascii() {
        return u8::try_from(c).ok();
    }

    HIGH_HALF
        .iter()
        .position(|&entry| entry == c)
        .and_then(|index| u8::try_from(0x80 + index).ok())
}

pub(crate) fn encode_char(c: char) -> u8 {
    lookup(c).unwrap_or_else(|| {
        trace!(code_point = u32::from(c), "substituting unrepresentable code point in MacRoman");
        ASCII_REPLACEMENT_BYTE
    })
}

pub(crate) fn decode_byte(byte: u8) -> char {
    match byte.checked_sub(0x80) {
        Some(index) => HIGH_HALF[usize::from(index)],
        None => char::from(byte),
    }
}

/// Encodes `chars` as MacRoman, writing `?` for anything outside its table.
#[must_use]
pub fn encode<I: IntoIterator<Item = char>>(chars: I) -> Vec<u8> {
    Encoding::MacRoman.encode(chars)
}

/// Decodes MacRoman bytes. Every byte sequence is valid.
#[must_use]
pub fn decode(bytes: &[u8]) -> Text {
    Encoding::MacRoman.decode(bytes)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0x80, '\u{00C4}')]
    #[case(0xA5, '\u{2022}')]
    #[case(0xBD, '\u{03A9}')]
    #[case(0xCA, '\u{00A0}')]
    #[case(0xDB, '\u{20AC}')]
    #[case(0xF0, '\u{F8FF}')]
    #[case(0xFF, '\u{02C7}')]
    fn decodes_table_entries(#[case] byte: u8, #[case] expected: char) {
        assert_eq!(decode_byte(byte), expected);
        assert_eq!(encode_char(expected), byte);
    }

    #[test]
    fn table_has_no_duplicates_or_ascii() {
        for (i, a) in HIGH_HALF.iter().enumerate() {
            assert!(!a.is_ascii());
            assert!(!HIGH_HALF[i + 1..].contains(a), "{a:?} appears twice");
        }
    }

    #[test]
    fn every_byte_round_trips() {
        let bytes: Vec<u8> = (0..=0xFF).collect();
        assert_eq!(encode(decode(&bytes).chars()), bytes);
    }

    #[test]
    fn substitutes_outside_table() {
        assert_eq!(encode("a\u{00A4}\u{0391}b".chars()), b"a??b");
    }
}
