use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::Encoding;

impl Arbitrary for Encoding {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Encoding::ALL).unwrap_or(&Encoding::Utf8)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // ASCII is the simplest encoding to read in a failure report.
        match self {
            Encoding::Ascii => quickcheck::empty_shrinker(),
            _ => quickcheck::single_shrinker(Encoding::Ascii),
        }
    }
}

const INTERESTING_LEADS: [u8; 10] = [0xC0, 0xC2, 0xDF, 0xE0, 0xED, 0xEF, 0xF0, 0xF4, 0xF5, 0xFF];

/// Bytes biased towards UTF-8 structure, so that lead bytes, continuations
/// and well-formed sequences all show up often.
#[derive(Debug, Clone)]
pub(crate) struct Utf8ish(pub(crate) Vec<u8>);

impl Arbitrary for Utf8ish {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() + 1);
        let mut bytes = Vec::with_capacity(len);
        while bytes.len() < len {
            match u8::arbitrary(g) % 5 {
                0 => bytes.push(u8::arbitrary(g) & 0x7F),
                1 => bytes.push(0x80 | (u8::arbitrary(g) & 0x3F)),
                2 => bytes.push(*g.choose(&INTERESTING_LEADS).unwrap_or(&0xFF)),
                _ => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(char::arbitrary(g).encode_utf8(&mut buf).as_bytes());
                }
            }
        }
        Self(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}
