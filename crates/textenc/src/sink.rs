use alloc::vec::Vec;

use bstr::BString;

/// A growable byte buffer that encoders write into.
pub trait ByteSink {
    /// Appends `bytes` to the end of the buffer.
    fn extend_bytes(&mut self, bytes: &[u8]);

    /// Hints that at least `additional` more bytes are about to be appended.
    fn reserve_bytes(&mut self, additional: usize) {
        let _ = additional;
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn extend_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn reserve_bytes(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl ByteSink for BString {
    #[inline]
    fn extend_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn reserve_bytes(&mut self, additional: usize) {
        self.reserve(additional);
    }
}
