//! Benchmark – decoding, indexing and re-encoding across encodings
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use textenc::{Encoding, Text, encoding::utf8};

/// Produce a deterministic mixed-script payload of close to `target_len`
/// bytes under `encoding`. Characters the encoding cannot represent are
/// skipped, so every encoding sees well-formed input.
fn make_payload(encoding: Encoding, target_len: usize) -> Vec<u8> {
    const SAMPLE: &str = "The café serves crème brûlée, Καλημέρα, 3€ ∞ ";

    let mut bytes = Vec::with_capacity(target_len);
    let chars = SAMPLE.chars().filter(|&c| encoding.can_encode(c)).cycle();
    for c in chars {
        if bytes.len() + c.len_utf8() > target_len {
            break;
        }
        encoding.encode_char(c, &mut bytes);
    }
    bytes
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for encoding in Encoding::ALL {
        let payload = make_payload(encoding, 64 * 1024);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("owned", encoding), &payload, |b, p| {
            b.iter(|| black_box(encoding.decode(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("view_iter", encoding), &payload, |b, p| {
            b.iter(|| black_box(encoding.view(black_box(p)).chars().count()));
        });
    }
    group.finish();
}

fn bench_chunked_utf8(c: &mut Criterion) {
    let payload = make_payload(Encoding::Utf8, 64 * 1024);
    let mut group = c.benchmark_group("utf8_decoder_split");

    for &parts in &[1usize, 100, 5_000] {
        let chunk_size = payload.len().div_ceil(parts);
        group.bench_with_input(BenchmarkId::from_parameter(parts), &payload, |b, p| {
            b.iter(|| {
                let mut decoder = utf8::Decoder::new();
                let mut out = Text::with_capacity(p.len());
                for chunk in p.chunks(chunk_size) {
                    decoder.feed(black_box(chunk), &mut out);
                }
                decoder.finish(&mut out);
                black_box(out.len())
            });
        });
    }
    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_middle");

    for encoding in Encoding::ALL {
        let payload = make_payload(encoding, 16 * 1024);
        let view = encoding.view(&payload);
        let middle = view.len() / 2;
        group.bench_function(BenchmarkId::from_parameter(encoding), |b| {
            b.iter(|| black_box(view.at(black_box(middle))));
        });
    }

    let text = Encoding::Utf8.decode(&make_payload(Encoding::Utf8, 16 * 1024));
    let middle = text.len() / 2;
    group.bench_function("owned", |b| {
        b.iter(|| black_box(text.at(black_box(middle))));
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! {
    name = benches;
    config = criterion();
    targets = bench_decode, bench_chunked_utf8, bench_index
}
criterion_main!(benches);
