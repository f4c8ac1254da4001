use alloc::string::String;

use thiserror::Error;

/// Errors reported by indexed access and by mutation of a [`Text`](crate::Text).
///
/// Malformed or unrepresentable input is never reported here; encoding and
/// decoding repair it with replacement code points instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// An index, or the end of a requested range, lies past the end of the
    /// sequence.
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds {
        /// The offending index or range end, in code points.
        index: usize,
        /// The length of the sequence, in code points.
        len: usize,
    },
    /// A value outside `0..=0x10FFFF`, or inside the surrogate band, was
    /// offered as a code point.
    #[error("invalid code point 0x{0:X}")]
    InvalidCodePoint(u32),
    /// A `Display` implementation reported an error while being appended.
    #[error("formatting a value failed")]
    Format,
}

impl From<core::fmt::Error> for TextError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Format
    }
}

/// The name given to [`Encoding::from_str`](crate::Encoding) matched no
/// supported encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown encoding '{0}'")]
pub struct UnknownEncoding(pub String);
