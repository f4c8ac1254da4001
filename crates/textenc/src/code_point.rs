/// General replacement for input that cannot be decoded, usable wherever any
/// code point can be represented.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Replacement for single-byte encodings, which cannot represent
/// [`REPLACEMENT`] itself.
pub const ASCII_REPLACEMENT: char = '?';

pub(crate) const ASCII_REPLACEMENT_BYTE: u8 = b'?';

const MAX_CODE_POINT: u32 = 0x10_FFFF;
const SURROGATE_MIN: u32 = 0xD800;
const SURROGATE_MAX: u32 = 0xDFFF;

/// Returns whether `value` names a Unicode code point that may appear in a
/// sequence: at most `0x10FFFF` and outside the surrogate band.
#[inline]
#[must_use]
pub const fn is_valid_code_point(value: u32) -> bool {
    value <= MAX_CODE_POINT && !(value >= SURROGATE_MIN && value <= SURROGATE_MAX)
}

/// Converts `value` into a `char` if [`is_valid_code_point`] accepts it.
#[inline]
#[must_use]
pub const fn to_char(value: u32) -> Option<char> {
    if is_valid_code_point(value) {
        char::from_u32(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0x0000, true)]
    #[case(0x007F, true)]
    #[case(0xD7FF, true)]
    #[case(0xD800, false)]
    #[case(0xDBFF, false)]
    #[case(0xDC00, false)]
    #[case(0xDFFF, false)]
    #[case(0xE000, true)]
    #[case(0xFFFD, true)]
    #[case(0x10_FFFF, true)]
    #[case(0x11_0000, false)]
    #[case(u32::MAX, false)]
    fn oracle_boundaries(#[case] value: u32, #[case] valid: bool) {
        assert_eq!(is_valid_code_point(value), valid, "U+{value:04X}");
        assert_eq!(to_char(value).is_some(), valid);
    }

    #[test]
    fn sentinels_are_valid() {
        assert!(is_valid_code_point(REPLACEMENT as u32));
        assert!(is_valid_code_point(ASCII_REPLACEMENT as u32));
        assert_eq!(u8::try_from(ASCII_REPLACEMENT), Ok(ASCII_REPLACEMENT_BYTE));
    }
}
