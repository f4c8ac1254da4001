use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
    iter,
};

use crate::{
    code_point::to_char,
    encoding::Encoding,
    error::TextError,
    logging::debug,
    sink::ByteSink,
    view::{Chars, Quoted, TextView},
};

/// An owned, growable sequence of code points.
///
/// Code points are stored decoded, four bytes each, so indexing and slicing
/// through [`as_view`](Self::as_view) are O(1) whatever encoding the text came
/// from. Every stored code point is valid; values that are not are rejected
/// with [`TextError::InvalidCodePoint`] and leave the text untouched.
///
/// Growing the buffer may move it, which invalidates every view borrowed
/// from it. The borrow checker enforces this: a `Text` cannot be mutated
/// while a [`TextView`] of it is alive.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Text {
    chars: Vec<char>,
}

impl Text {
    /// Creates an empty text.
    #[must_use]
    pub const fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Creates an empty text with room for `capacity` code points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
        }
    }

    /// Decodes `bytes` from `encoding`.
    #[must_use]
    pub fn decode_from(bytes: &[u8], encoding: Encoding) -> Self {
        encoding.decode(bytes)
    }

    /// Creates a text of `count` copies of `code_point`.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidCodePoint`] if `code_point` is not valid.
    pub fn repeated(code_point: u32, count: usize) -> Result<Self, TextError> {
        let mut text = Self::new();
        text.append_repeated(code_point, count)?;
        Ok(text)
    }

    /// Borrows the text as a view. O(1), no copy.
    #[must_use]
    pub fn as_view(&self) -> TextView<'_> {
        TextView::from_chars(&self.chars)
    }

    /// The code points as a slice.
    #[must_use]
    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    /// Iterates over the code points.
    #[must_use]
    pub fn chars(&self) -> Chars<'_> {
        self.as_view().chars()
    }

    /// The number of code points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the text holds no code points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The number of code points the text can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.chars.capacity()
    }

    /// The code point at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// The code point at `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfBounds`] if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<char, TextError> {
        self.get(index).ok_or(TextError::OutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Encodes the text under `encoding`.
    #[must_use]
    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        encoding.encode(self.chars.iter().copied())
    }

    /// Encodes the text under `encoding`, appending to `sink`.
    pub fn encode_into<S: ByteSink + ?Sized>(&self, encoding: Encoding, sink: &mut S) {
        encoding.encode_into(self.chars.iter().copied(), sink);
    }

    /// Makes room for at least `additional` more code points.
    ///
    /// Capacity at least doubles whenever it has to grow, so repeated appends
    /// run in amortized constant time per code point.
    pub fn reserve(&mut self, additional: usize) {
        let len = self.chars.len();
        let capacity = self.chars.capacity();
        let required = len.saturating_add(additional);
        if required <= capacity {
            return;
        }

        let target = required.max(capacity.saturating_mul(2));
        debug!(from = capacity, to = target, "growing text buffer");
        self.chars.reserve_exact(target - len);
    }

    /// Appends the code point `code_point`.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidCodePoint`] if `code_point` is not valid; the text
    /// is left unchanged.
    pub fn push(&mut self, code_point: u32) -> Result<(), TextError> {
        let c = to_char(code_point).ok_or(TextError::InvalidCodePoint(code_point))?;
        self.push_char(c);
        Ok(())
    }

    /// Appends `c`.
    pub fn push_char(&mut self, c: char) {
        self.reserve(1);
        self.chars.push(c);
    }

    /// Appends every code point of `other`.
    ///
    /// `other` can be another [`Text`], a [`TextView`] in any encoding, or a
    /// string literal.
    pub fn append<'v>(&mut self, other: impl Into<TextView<'v>>) {
        self.extend(other.into().chars());
    }

    /// Decodes `bytes` from `encoding` onto the end of the text.
    pub fn append_encoded(&mut self, bytes: &[u8], encoding: Encoding) {
        self.append(encoding.view(bytes));
    }

    /// Appends `count` copies of `code_point`.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidCodePoint`] if `code_point` is not valid; the text
    /// is left unchanged.
    pub fn append_repeated(&mut self, code_point: u32, count: usize) -> Result<(), TextError> {
        let c = to_char(code_point).ok_or(TextError::InvalidCodePoint(code_point))?;
        self.extend(iter::repeat_n(c, count));
        Ok(())
    }

    /// Appends the `Display` rendering of `value`.
    ///
    /// Integers, booleans, other texts and views, and any user type that
    /// implements `Display` can be absorbed this way.
    ///
    /// # Errors
    ///
    /// [`TextError::Format`] if `value`'s `Display` implementation fails; the
    /// text is left unchanged.
    pub fn append_display<T: fmt::Display + ?Sized>(&mut self, value: &T) -> Result<(), TextError> {
        let len = self.chars.len();
        write!(self, "{value}").map_err(|err| {
            self.chars.truncate(len);
            TextError::from(err)
        })
    }

    /// Replaces the contents with the code points of `other`.
    pub fn assign<'v>(&mut self, other: impl Into<TextView<'v>>) {
        self.chars.clear();
        self.append(other);
    }

    /// Replaces the contents with `bytes` decoded from `encoding`.
    pub fn assign_encoded(&mut self, bytes: &[u8], encoding: Encoding) {
        self.chars.clear();
        self.append_encoded(bytes, encoding);
    }

    /// Replaces the contents with `count` copies of `code_point`.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidCodePoint`] if `code_point` is not valid; the text
    /// is left unchanged.
    pub fn assign_repeated(&mut self, code_point: u32, count: usize) -> Result<(), TextError> {
        let c = to_char(code_point).ok_or(TextError::InvalidCodePoint(code_point))?;
        self.chars.clear();
        self.extend(iter::repeat_n(c, count));
        Ok(())
    }

    /// Replaces the contents with the `Display` rendering of `value`.
    ///
    /// # Errors
    ///
    /// [`TextError::Format`] if `value`'s `Display` implementation fails; the
    /// text is left unchanged.
    pub fn assign_display<T: fmt::Display + ?Sized>(&mut self, value: &T) -> Result<(), TextError> {
        let mut rendered = Self::new();
        rendered.append_display(value)?;
        self.chars.clear();
        self.chars.extend_from_slice(&rendered.chars);
        Ok(())
    }

    /// Shortens or lengthens the text to `new_len`, padding with `fill`.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidCodePoint`] if `fill` is not valid; the text is
    /// left unchanged.
    pub fn resize(&mut self, new_len: usize, fill: u32) -> Result<(), TextError> {
        let fill = to_char(fill).ok_or(TextError::InvalidCodePoint(fill))?;
        self.resize_with_char(new_len, fill);
        Ok(())
    }

    /// Shortens or lengthens the text to `new_len`, padding with NUL.
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with_char(new_len, '\0');
    }

    fn resize_with_char(&mut self, new_len: usize, fill: char) {
        if let Some(additional) = new_len.checked_sub(self.chars.len()) {
            self.reserve(additional);
        }
        self.chars.resize(new_len, fill);
    }

    /// Keeps the first `len` code points and drops the rest.
    pub fn truncate(&mut self, len: usize) {
        self.chars.truncate(len);
    }

    /// Replaces the `count` code points starting at `index` with
    /// `replacement`.
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfBounds`] if `index + count` lies past the end; the
    /// text is left unchanged.
    pub fn replace<'v>(
        &mut self,
        index: usize,
        count: usize,
        replacement: impl Into<TextView<'v>>,
    ) -> Result<(), TextError> {
        let len = self.chars.len();
        let end = index
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(TextError::OutOfBounds {
                index: index.saturating_add(count),
                len,
            })?;

        let tail = self.chars.split_off(end);
        self.chars.truncate(index);
        self.append(replacement);
        self.chars.extend_from_slice(&tail);
        Ok(())
    }

    /// Removes every code point, keeping the allocation.
    pub fn clear(&mut self) {
        self.chars.clear();
    }
}

impl Extend<char> for Text {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        self.chars.extend(iter);
    }
}

impl<'a> Extend<&'a char> for Text {
    fn extend<I: IntoIterator<Item = &'a char>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<char> for Text {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut text = Self::new();
        text.extend(iter);
        text
    }
}

impl From<TextView<'_>> for Text {
    fn from(view: TextView<'_>) -> Self {
        view.chars().collect()
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl From<char> for Text {
    fn from(c: char) -> Self {
        Self { chars: [c].into() }
    }
}

impl From<Vec<char>> for Text {
    fn from(chars: Vec<char>) -> Self {
        Self { chars }
    }
}

impl AsRef<[char]> for Text {
    fn as_ref(&self) -> &[char] {
        &self.chars
    }
}

impl<'a> IntoIterator for &'a Text {
    type Item = char;
    type IntoIter = Chars<'a>;

    fn into_iter(self) -> Chars<'a> {
        self.chars()
    }
}

impl fmt::Write for Text {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend(s.chars());
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push_char(c);
        Ok(())
    }
}

impl PartialEq<TextView<'_>> for Text {
    fn eq(&self, other: &TextView<'_>) -> bool {
        self.as_view() == *other
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.chars.iter().copied().eq(other.chars())
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<Text> for str {
    fn eq(&self, other: &Text) -> bool {
        *other == *self
    }
}

impl PartialEq<Text> for &str {
    fn eq(&self, other: &Text) -> bool {
        *other == **self
    }
}

impl PartialOrd<TextView<'_>> for Text {
    fn partial_cmp(&self, other: &TextView<'_>) -> Option<Ordering> {
        self.as_view().partial_cmp(other)
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_view().hash(state);
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_view(), f)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Quoted(self.as_view()), f)
    }
}
