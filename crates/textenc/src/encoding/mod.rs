//! The supported encodings and their conversion contracts.
//!
//! Every encoding converts in both directions without failing:
//!
//! | Encoding   | Unrepresentable on encode | Malformed on decode    | Indexing |
//! |------------|---------------------------|------------------------|----------|
//! | `Ascii`    | [`ASCII_REPLACEMENT`]     | [`REPLACEMENT`]        | O(1)     |
//! | `Latin1`   | [`ASCII_REPLACEMENT`]     | (every byte is valid)  | O(1)     |
//! | `MacRoman` | [`ASCII_REPLACEMENT`]     | (every byte is valid)  | O(1)     |
//! | `Utf8`     | (every code point fits)   | one [`REPLACEMENT`] per bad byte | O(n) |
//!
//! [`ASCII_REPLACEMENT`]: crate::ASCII_REPLACEMENT
//! [`REPLACEMENT`]: crate::REPLACEMENT

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::{
    code_point::{ASCII_REPLACEMENT, REPLACEMENT},
    error::UnknownEncoding,
    sink::ByteSink,
    text::Text,
    view::TextView,
};

pub mod ascii;
pub mod latin1;
pub mod mac_roman;
pub mod utf8;

/// A named, stateless conversion between code points and bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum Encoding {
    /// 7-bit ASCII.
    Ascii,
    /// ISO-8859-1, where every byte is the code point of the same value.
    Latin1,
    /// Classic Mac OS Roman.
    MacRoman,
    /// UTF-8, with per-byte repair of malformed input.
    Utf8,
}

/// The cost of one view operation over input of length n.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum Cost {
    /// O(1), independent of the input.
    Constant,
    /// O(n), proportional to the input.
    Linear,
}

/// The complexity guarantees an encoding makes for views over it.
///
/// Callers can rely on these when choosing an algorithm: indexing in a loop is
/// fine when `index` is [`Cost::Constant`] and quadratic otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct Complexity {
    /// Counting the code points.
    pub size: Cost,
    /// Reading the code point at an index.
    pub index: Cost,
    /// Restricting a view to a range of code points.
    pub substr: Cost,
    /// Advancing an iterator by one code point, amortized.
    pub iterate: Cost,
}

impl Complexity {
    pub(crate) const FIXED_WIDTH: Self = Self {
        size: Cost::Constant,
        index: Cost::Constant,
        substr: Cost::Constant,
        iterate: Cost::Constant,
    };

    pub(crate) const VARIABLE_WIDTH: Self = Self {
        size: Cost::Linear,
        index: Cost::Linear,
        substr: Cost::Linear,
        iterate: Cost::Constant,
    };
}

impl Encoding {
    /// Every supported encoding.
    pub const ALL: [Self; 4] = [Self::Ascii, Self::Latin1, Self::MacRoman, Self::Utf8];

    /// The canonical name, as accepted by [`FromStr`] and shown by `Display`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ASCII",
            Self::Latin1 => "Latin-1",
            Self::MacRoman => "MacRoman",
            Self::Utf8 => "UTF-8",
        }
    }

    /// Whether every code point occupies exactly one byte.
    #[must_use]
    pub const fn is_fixed_width(self) -> bool {
        !matches!(self, Self::Utf8)
    }

    /// The complexity of view operations over this encoding.
    #[must_use]
    pub const fn complexity(self) -> Complexity {
        if self.is_fixed_width() {
            Complexity::FIXED_WIDTH
        } else {
            Complexity::VARIABLE_WIDTH
        }
    }

    /// The code point substituted when encoding something this encoding
    /// cannot represent.
    ///
    /// Decoding always substitutes [`REPLACEMENT`](crate::REPLACEMENT), since
    /// the result is a code point sequence rather than bytes.
    #[must_use]
    pub const fn replacement(self) -> char {
        if self.is_fixed_width() {
            ASCII_REPLACEMENT
        } else {
            REPLACEMENT
        }
    }

    /// Whether `c` survives encoding and decoding unchanged.
    #[must_use]
    pub fn can_encode(self, c: char) -> bool {
        match self {
            Self::Ascii => c.is_ascii(),
            Self::Latin1 => u8::try_from(c).is_ok(),
            Self::MacRoman => mac_roman::lookup(c).is_some(),
            Self::Utf8 => true,
        }
    }

    /// Encodes a single code point into `sink`.
    pub fn encode_char<S: ByteSink + ?Sized>(self, c: char, sink: &mut S) {
        match self {
            Self::Ascii => sink.extend_bytes(&[ascii::encode_char(c)]),
            Self::Latin1 => sink.extend_bytes(&[latin1::encode_char(c)]),
            Self::MacRoman => sink.extend_bytes(&[mac_roman::encode_char(c)]),
            Self::Utf8 => {
                let mut buf = [0u8; 4];
                sink.extend_bytes(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    /// Encodes `chars` into `sink`.
    pub fn encode_into<I, S>(self, chars: I, sink: &mut S)
    where
        I: IntoIterator<Item = char>,
        S: ByteSink + ?Sized,
    {
        let chars = chars.into_iter();
        sink.reserve_bytes(chars.size_hint().0);
        for c in chars {
            self.encode_char(c, sink);
        }
    }

    /// Encodes `chars` into a new byte buffer.
    #[must_use]
    pub fn encode<I: IntoIterator<Item = char>>(self, chars: I) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(chars, &mut out);
        out
    }

    /// Decodes `bytes` into an owned sequence, repairing malformed input.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Text {
        match self.byte_decoder() {
            Some(decode_byte) => bytes.iter().copied().map(decode_byte).collect(),
            None => utf8::decode(bytes),
        }
    }

    /// Borrows `bytes` as a code point sequence in this encoding.
    #[must_use]
    pub const fn view(self, bytes: &[u8]) -> TextView<'_> {
        TextView::new(bytes, self)
    }

    /// The per-byte decoder of a fixed-width encoding.
    pub(crate) fn byte_decoder(self) -> Option<fn(u8) -> char> {
        match self {
            Self::Ascii => Some(ascii::decode_byte),
            Self::Latin1 => Some(latin1::decode_byte),
            Self::MacRoman => Some(mac_roman::decode_byte),
            Self::Utf8 => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "ascii" | "usascii" => Ok(Self::Ascii),
            "latin1" | "iso88591" | "l1" => Ok(Self::Latin1),
            "macroman" | "macintosh" | "mac" => Ok(Self::MacRoman),
            "utf8" => Ok(Self::Utf8),
            _ => Err(UnknownEncoding(name.into())),
        }
    }
}

/// Re-encodes `bytes` from one encoding into another.
///
/// Malformed input is repaired under `from`'s policy and unrepresentable code
/// points are substituted under `to`'s, so this never fails.
#[must_use]
pub fn transcode(bytes: &[u8], from: Encoding, to: Encoding) -> Vec<u8> {
    to.encode(from.view(bytes).chars())
}
