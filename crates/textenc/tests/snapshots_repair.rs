#![expect(missing_docs)]

use core::fmt::Write;

use textenc::{Encoding, encoding::utf8};

fn render(chars: impl IntoIterator<Item = char>) -> String {
    let mut out = String::new();
    for (i, c) in chars.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "U+{:04X}", u32::from(c)).unwrap();
    }
    out
}

fn render_table(encoding: Encoding, inputs: &[&[u8]]) -> String {
    let mut out = String::new();
    for bytes in inputs {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
        writeln!(out, "{} -> {}", hex.join(" "), render(encoding.view(bytes))).unwrap();
    }
    out
}

#[test]
fn snapshot_utf8_repair() {
    let inputs: [&[u8]; 12] = [
        b"A\xC3\xA9",
        b"\xF0\x9F\x98\x80",
        b"\xC0\xAF",
        b"\xE0\x80\xAF",
        b"\xED\xA0\x80",
        b"\xF4\x90\x80\x80",
        b"\xE2\x82",
        b"\xE2\x41",
        b"\xE2\xE2\x82\xAC",
        b"\x80\xBF",
        b"\xFE\xFF",
        b"\xEF\xBF\xBD",
    ];

    insta::assert_snapshot!(render_table(Encoding::Utf8, &inputs), @r"
    41 C3 A9 -> U+0041 U+00E9
    F0 9F 98 80 -> U+1F600
    C0 AF -> U+FFFD U+FFFD
    E0 80 AF -> U+FFFD U+FFFD U+FFFD
    ED A0 80 -> U+FFFD U+FFFD U+FFFD
    F4 90 80 80 -> U+FFFD U+FFFD U+FFFD U+FFFD
    E2 82 -> U+FFFD U+FFFD
    E2 41 -> U+FFFD U+0041
    E2 E2 82 AC -> U+FFFD U+20AC
    80 BF -> U+FFFD U+FFFD
    FE FF -> U+FFFD U+FFFD
    EF BF BD -> U+FFFD
    ");
}

#[test]
fn snapshot_single_byte_high_half() {
    let inputs: [&[u8]; 3] = [b"\x41\x7F", b"\x80\xA9\xFF", b"\xDB\xF0"];

    insta::assert_snapshot!(render_table(Encoding::Ascii, &inputs), @r"
    41 7F -> U+0041 U+007F
    80 A9 FF -> U+FFFD U+FFFD U+FFFD
    DB F0 -> U+FFFD U+FFFD
    ");
    insta::assert_snapshot!(render_table(Encoding::Latin1, &inputs), @r"
    41 7F -> U+0041 U+007F
    80 A9 FF -> U+0080 U+00A9 U+00FF
    DB F0 -> U+00DB U+00F0
    ");
    insta::assert_snapshot!(render_table(Encoding::MacRoman, &inputs), @r"
    41 7F -> U+0041 U+007F
    80 A9 FF -> U+00C4 U+00A9 U+02C7
    DB F0 -> U+20AC U+F8FF
    ");
}

#[test]
fn snapshot_chunked_decoder() {
    // The euro sign split across three chunks, then a dangling lead byte.
    let chunks: [&[u8]; 4] = [b"\xE2", b"\x82", b"\xAC\xE2", b"!\xF0\x9F"];
    let mut decoder = utf8::Decoder::new();
    let mut out = String::new();
    let mut log = String::new();

    for chunk in chunks {
        decoder.feed(chunk, &mut out);
        let pending = decoder.is_pending();
        writeln!(log, "{chunk:02X?} pending={pending} out=[{}]", render(out.chars())).unwrap();
    }
    decoder.finish(&mut out);
    writeln!(log, "finish out=[{}]", render(out.chars())).unwrap();

    insta::assert_snapshot!(log, @r"
    [E2] pending=true out=[]
    [82] pending=true out=[]
    [AC, E2] pending=true out=[U+20AC]
    [21, F0, 9F] pending=true out=[U+20AC U+FFFD U+0021]
    finish out=[U+20AC U+FFFD U+0021 U+FFFD U+FFFD]
    ");
}
