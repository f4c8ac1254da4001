#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textenc::{Encoding, Text, encoding::utf8, is_valid_code_point};

#[derive(Debug, Arbitrary)]
struct Input {
    encoding: Encoding,
    target: Encoding,
    /// Chunk lengths for the incremental decoder; zero-length chunks are allowed.
    splits: Vec<u8>,
    bytes: Vec<u8>,
    start: u16,
    length: Option<u16>,
}

fn decode(input: Input) {
    let Input {
        encoding,
        target,
        splits,
        bytes,
        start,
        length,
    } = input;

    // Decoding is total and every code point it yields is valid.
    let text = encoding.decode(&bytes);
    assert!(text.chars().all(|c| is_valid_code_point(u32::from(c))));
    if encoding.is_fixed_width() {
        assert_eq!(text.len(), bytes.len());
    } else {
        assert!(text.len() <= bytes.len());
        assert_eq!(text.len(), utf8::decoded_len(&bytes));
    }

    // The lazy view agrees with the eager decode.
    let view = encoding.view(&bytes);
    assert_eq!(view.len(), text.len());
    assert!(view.chars().eq(text.chars()));

    // Chunked decoding agrees with one-shot decoding.
    if encoding == Encoding::Utf8 {
        let mut decoder = utf8::Decoder::new();
        let mut out = Text::new();
        let mut rest = bytes.as_slice();
        for split in splits {
            let (chunk, tail) = rest.split_at(usize::from(split).min(rest.len()));
            decoder.feed(chunk, &mut out);
            rest = tail;
        }
        decoder.feed(rest, &mut out);
        decoder.finish(&mut out);
        assert_eq!(out, text);
    }

    // Sub-views hold the same code points as slices of the decode.
    let (start, length) = (usize::from(start), length.map(usize::from));
    let end = length.map_or(text.len(), |l| start + l);
    match view.substr(start, length) {
        Ok(sub) => assert!(sub.chars().eq(text.as_chars()[start..end].iter().copied())),
        Err(_) => assert!(start > text.len() || end > text.len()),
    }

    // Re-encoding never fails and substitutes one for one.
    let encoded = text.encode(target);
    if target.is_fixed_width() {
        assert_eq!(encoded.len(), text.len());
    }
    let back = target.decode(&encoded);
    assert_eq!(back.len(), text.len());

    // The printable and serialized forms agree.
    let json = serde_json::to_string(&view).expect("serializing a view cannot fail");
    let parsed: Text = serde_json::from_str(&json).expect("a serialized view parses back");
    assert_eq!(parsed, text);
    assert_eq!(view.to_string(), text.to_string());
}

fuzz_target!(|input: Input| decode(input));
