use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
    iter::FusedIterator,
    ops::Range,
    slice,
};

use bstr::ByteSlice;

use crate::{
    encoding::{Complexity, Encoding, utf8},
    error::TextError,
    text::Text,
};

/// A borrowed code point sequence: bytes plus the encoding they are in.
///
/// A view never owns or frees memory, and no operation on it decodes more
/// than it has to. How expensive an operation is depends on the encoding; see
/// [`Encoding::complexity`]. Views lent out by [`Text`] are always O(1).
///
/// Equality, ordering and hashing look at the decoded code points only, so
/// views over different encodings compare equal when they decode alike.
#[derive(Clone, Copy)]
pub struct TextView<'a> {
    repr: Repr<'a>,
}

#[derive(Clone, Copy)]
enum Repr<'a> {
    Encoded { bytes: &'a [u8], encoding: Encoding },
    Decoded(&'a [char]),
}

/// Something to search a [`TextView`] for.
#[derive(Debug, Clone, Copy)]
pub enum Needle<'n> {
    /// A single code point.
    Char(char),
    /// A run of code points.
    Seq(TextView<'n>),
}

impl From<char> for Needle<'_> {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl<'n> From<TextView<'n>> for Needle<'n> {
    fn from(view: TextView<'n>) -> Self {
        Self::Seq(view)
    }
}

impl<'n> From<&'n Text> for Needle<'n> {
    fn from(text: &'n Text) -> Self {
        Self::Seq(text.as_view())
    }
}

impl<'n> From<&'n str> for Needle<'n> {
    fn from(s: &'n str) -> Self {
        Self::Seq(TextView::from(s))
    }
}

impl<'a> TextView<'a> {
    /// Views `bytes` as a sequence in `encoding`.
    #[must_use]
    pub const fn new(bytes: &'a [u8], encoding: Encoding) -> Self {
        Self {
            repr: Repr::Encoded { bytes, encoding },
        }
    }

    /// Views already decoded code points.
    #[must_use]
    pub const fn from_chars(chars: &'a [char]) -> Self {
        Self {
            repr: Repr::Decoded(chars),
        }
    }

    /// The encoding of the underlying bytes, or `None` if the view borrows
    /// decoded code points.
    #[must_use]
    pub const fn encoding(&self) -> Option<Encoding> {
        match self.repr {
            Repr::Encoded { encoding, .. } => Some(encoding),
            Repr::Decoded(_) => None,
        }
    }

    /// The underlying bytes, or `None` if the view borrows decoded code
    /// points.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&'a [u8]> {
        match self.repr {
            Repr::Encoded { bytes, .. } => Some(bytes),
            Repr::Decoded(_) => None,
        }
    }

    /// The complexity of operations on this view.
    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        match self.repr {
            Repr::Encoded { encoding, .. } => encoding.complexity(),
            Repr::Decoded(_) => Complexity::FIXED_WIDTH,
        }
    }

    /// The number of code points. O(n) for UTF-8, O(1) otherwise.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.repr {
            Repr::Encoded {
                bytes,
                encoding: Encoding::Utf8,
            } => utf8::decoded_len(bytes),
            Repr::Encoded { bytes, .. } => bytes.len(),
            Repr::Decoded(chars) => chars.len(),
        }
    }

    /// Whether the view holds no code points. O(1) for every encoding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self.repr {
            Repr::Encoded { bytes, .. } => bytes.is_empty(),
            Repr::Decoded(chars) => chars.is_empty(),
        }
    }

    /// The code point at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        match self.repr {
            Repr::Encoded {
                bytes,
                encoding: Encoding::Utf8,
            } => utf8::Chars::new(bytes).nth(index),
            Repr::Encoded { bytes, encoding } => {
                let &byte = bytes.get(index)?;
                encoding.byte_decoder().map(|decode| decode(byte))
            }
            Repr::Decoded(chars) => chars.get(index).copied(),
        }
    }

    /// The code point at `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfBounds`] if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<char, TextError> {
        self.get(index).ok_or_else(|| TextError::OutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Iterates over the code points, decoding lazily.
    #[must_use]
    pub fn chars(&self) -> Chars<'a> {
        let repr = match self.repr {
            Repr::Encoded { bytes, encoding } => match encoding.byte_decoder() {
                Some(decode) => CharsRepr::SingleByte {
                    bytes: bytes.iter(),
                    decode,
                },
                None => CharsRepr::Utf8(utf8::Chars::new(bytes)),
            },
            Repr::Decoded(chars) => CharsRepr::Decoded(chars.iter()),
        };
        Chars(repr)
    }

    /// The view of `length` code points starting at `start`, or of everything
    /// from `start` on when `length` is `None`.
    ///
    /// `substr(self.len(), None)` is the empty view at the end.
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfBounds`] if `start`, or `start + length`, lies past
    /// the end. Neither bound is clamped.
    pub fn substr(&self, start: usize, length: Option<usize>) -> Result<Self, TextError> {
        match self.repr {
            Repr::Encoded {
                bytes,
                encoding: Encoding::Utf8,
            } => {
                let out_of_bounds = |index| TextError::OutOfBounds {
                    index,
                    len: utf8::decoded_len(bytes),
                };

                let mut chars = utf8::Chars::new(bytes);
                for _ in 0..start {
                    chars.next().ok_or_else(|| out_of_bounds(start))?;
                }
                let from = chars.offset();
                let to = match length {
                    None => bytes.len(),
                    Some(length) => {
                        for _ in 0..length {
                            chars
                                .next()
                                .ok_or_else(|| out_of_bounds(start.saturating_add(length)))?;
                        }
                        chars.offset()
                    }
                };
                Ok(Self::new(&bytes[from..to], Encoding::Utf8))
            }
            Repr::Encoded { bytes, encoding } => {
                let range = checked_range(start, length, bytes.len())?;
                Ok(Self::new(&bytes[range], encoding))
            }
            Repr::Decoded(chars) => {
                let range = checked_range(start, length, chars.len())?;
                Ok(Self::from_chars(&chars[range]))
            }
        }
    }

    /// The index of the first occurrence of `needle`.
    #[must_use]
    pub fn find<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<usize> {
        self.find_from(needle, 0)
    }

    /// The index of the first occurrence of `needle` at or after `start`.
    ///
    /// An empty needle matches at `start` itself as long as `start` is within
    /// the view, end included.
    #[must_use]
    pub fn find_from<'n>(&self, needle: impl Into<Needle<'n>>, start: usize) -> Option<usize> {
        match needle.into() {
            Needle::Char(c) => self
                .chars()
                .enumerate()
                .skip(start)
                .find_map(|(index, x)| (x == c).then_some(index)),
            Needle::Seq(seq) => {
                let pattern: Vec<char> = seq.chars().collect();
                let mut rest = self.chars();
                for _ in 0..start {
                    rest.next()?;
                }

                let mut index = start;
                loop {
                    if starts_with_pattern(rest.clone(), &pattern) {
                        return Some(index);
                    }
                    rest.next()?;
                    index += 1;
                }
            }
        }
    }

    /// The index of the last occurrence of `needle`.
    #[must_use]
    pub fn rfind<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<usize> {
        self.rfind_from(needle, usize::MAX)
    }

    /// The index of the last occurrence of `needle` that starts at or before
    /// `start`.
    #[must_use]
    pub fn rfind_from<'n>(&self, needle: impl Into<Needle<'n>>, start: usize) -> Option<usize> {
        match needle.into() {
            Needle::Char(c) => self
                .chars()
                .take(start.saturating_add(1))
                .enumerate()
                .filter_map(|(index, x)| (x == c).then_some(index))
                .last(),
            Needle::Seq(seq) => {
                let pattern: Vec<char> = seq.chars().collect();
                let mut rest = self.chars();
                let mut found = None;

                for index in 0..=start {
                    if starts_with_pattern(rest.clone(), &pattern) {
                        found = Some(index);
                    }
                    if rest.next().is_none() {
                        break;
                    }
                }
                found
            }
        }
    }

    /// Whether the view begins with `needle`.
    #[must_use]
    pub fn starts_with<'n>(&self, needle: impl Into<Needle<'n>>) -> bool {
        let mut hay = self.chars();
        match needle.into() {
            Needle::Char(c) => hay.next() == Some(c),
            Needle::Seq(seq) => seq.chars().all(|c| hay.next() == Some(c)),
        }
    }

    /// Re-encodes the code points under `encoding`.
    #[must_use]
    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        encoding.encode(self.chars())
    }

    /// Copies the code points into an owned sequence.
    #[must_use]
    pub fn to_text(&self) -> Text {
        Text::from(*self)
    }
}

fn checked_range(
    start: usize,
    length: Option<usize>,
    len: usize,
) -> Result<Range<usize>, TextError> {
    if start > len {
        return Err(TextError::OutOfBounds { index: start, len });
    }
    let end = match length {
        None => len,
        Some(length) => start
            .checked_add(length)
            .filter(|&end| end <= len)
            .ok_or(TextError::OutOfBounds {
                index: start.saturating_add(length),
                len,
            })?,
    };
    Ok(start..end)
}

fn starts_with_pattern(hay: Chars<'_>, pattern: &[char]) -> bool {
    hay.take(pattern.len()).eq(pattern.iter().copied())
}

impl Default for TextView<'_> {
    fn default() -> Self {
        Self::from_chars(&[])
    }
}

impl<'a> From<&'a str> for TextView<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes(), Encoding::Utf8)
    }
}

impl<'a> From<&'a [char]> for TextView<'a> {
    fn from(chars: &'a [char]) -> Self {
        Self::from_chars(chars)
    }
}

impl<'a> From<&'a Text> for TextView<'a> {
    fn from(text: &'a Text) -> Self {
        text.as_view()
    }
}

impl<'a> IntoIterator for TextView<'a> {
    type Item = char;
    type IntoIter = Chars<'a>;

    fn into_iter(self) -> Chars<'a> {
        self.chars()
    }
}

impl<'b> PartialEq<TextView<'b>> for TextView<'_> {
    fn eq(&self, other: &TextView<'b>) -> bool {
        self.chars().eq(other.chars())
    }
}

impl Eq for TextView<'_> {}

impl PartialEq<Text> for TextView<'_> {
    fn eq(&self, other: &Text) -> bool {
        *self == other.as_view()
    }
}

impl PartialEq<str> for TextView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for TextView<'_> {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<TextView<'_>> for str {
    fn eq(&self, other: &TextView<'_>) -> bool {
        *other == *self
    }
}

impl PartialEq<TextView<'_>> for &str {
    fn eq(&self, other: &TextView<'_>) -> bool {
        *other == **self
    }
}

impl<'b> PartialOrd<TextView<'b>> for TextView<'_> {
    fn partial_cmp(&self, other: &TextView<'b>) -> Option<Ordering> {
        Some(self.chars().cmp(other.chars()))
    }
}

impl PartialOrd<Text> for TextView<'_> {
    fn partial_cmp(&self, other: &Text) -> Option<Ordering> {
        self.partial_cmp(&other.as_view())
    }
}

impl Ord for TextView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chars().cmp(other.chars())
    }
}

impl Hash for TextView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0usize;
        for c in self.chars() {
            c.hash(state);
            len += 1;
        }
        state.write_usize(len);
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars().try_for_each(|c| f.write_char(c))
    }
}

impl fmt::Debug for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            Repr::Encoded { bytes, encoding } => f
                .debug_struct("TextView")
                .field("encoding", &encoding)
                .field("bytes", &bytes.as_bstr())
                .finish(),
            Repr::Decoded(_) => f.debug_tuple("TextView").field(&Quoted(*self)).finish(),
        }
    }
}

/// Debug-formats a view as an escaped, quoted string.
pub(crate) struct Quoted<'a>(pub(crate) TextView<'a>);

impl fmt::Debug for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.0.chars() {
            write!(f, "{}", c.escape_debug())?;
        }
        f.write_char('"')
    }
}

/// Lazy iterator over the code points of a [`TextView`].
///
/// Every step is O(1) amortized, whatever the encoding. Clone it to restart
/// from the current position.
#[derive(Debug, Clone)]
pub struct Chars<'a>(CharsRepr<'a>);

#[derive(Debug, Clone)]
enum CharsRepr<'a> {
    SingleByte {
        bytes: slice::Iter<'a, u8>,
        decode: fn(u8) -> char,
    },
    Utf8(utf8::Chars<'a>),
    Decoded(slice::Iter<'a, char>),
}

impl Iterator for Chars<'_> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        match &mut self.0 {
            CharsRepr::SingleByte { bytes, decode } => bytes.next().map(|&byte| decode(byte)),
            CharsRepr::Utf8(chars) => chars.next(),
            CharsRepr::Decoded(chars) => chars.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            CharsRepr::SingleByte { bytes, .. } => bytes.size_hint(),
            CharsRepr::Utf8(chars) => chars.size_hint(),
            CharsRepr::Decoded(chars) => chars.size_hint(),
        }
    }
}

impl FusedIterator for Chars<'_> {}
