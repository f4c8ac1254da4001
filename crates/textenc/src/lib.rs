//! Encoding-independent sequences of Unicode code points.
//!
//! A [`TextView`] borrows bytes together with the [`Encoding`] they are stored
//! in and answers code-point-indexed questions about them without decoding
//! eagerly. A [`Text`] owns its code points at a fixed width, so every
//! operation on it is O(1) per code point, and lends itself out as a
//! [`TextView`] without copying.
//!
//! Decoding is total: malformed input never fails, it is repaired with
//! [`REPLACEMENT`] one code point per offending byte. Encoding is total too:
//! code points an encoding cannot represent become that encoding's
//! [`Encoding::replacement`].
//!
//! ```rust
//! use textenc::{Encoding, Text};
//!
//! let greeting = Text::from("Καλημέρα");
//! let utf8 = greeting.encode(Encoding::Utf8);
//! assert_eq!(Encoding::Utf8.decode(&utf8), greeting);
//!
//! // Greek has no Latin-1 representation.
//! assert_eq!(greeting.encode(Encoding::Latin1), b"????????");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod code_point;
pub mod encoding;
mod error;
mod logging;
#[cfg(any(test, feature = "serde"))]
mod serde_impls;
mod sink;
mod text;
mod view;

#[cfg(test)]
mod tests;

pub use code_point::{ASCII_REPLACEMENT, REPLACEMENT, is_valid_code_point, to_char};
pub use encoding::{Complexity, Cost, Encoding, transcode};
pub use error::{TextError, UnknownEncoding};
pub use sink::ByteSink;
pub use text::Text;
pub use view::{Chars, Needle, TextView};
