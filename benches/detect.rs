//! Criterion benchmarks for the full detection pass
//!
//! The dispatcher is a fixed number of single-pass scans, so throughput
//! should scale linearly with buffer size; these benches keep that honest.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use jcode_detect::EncodingDetector;

// "日本語" repeated, in the three byte-oriented grammars.
const SHIFT_JIS_UNIT: &[u8] = &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];
const EUC_JP_UNIT: &[u8] = &[0xC6, 0xFC, 0xCB, 0xDC, 0xB8, 0xEC];
const UTF8_UNIT: &[u8] = "日本語".as_bytes();

fn repeat_to(unit: &[u8], size: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(size + unit.len());
    while buf.len() < size {
        buf.extend_from_slice(unit);
    }
    buf
}

fn bench_detect_ascii(c: &mut Criterion) {
    let detector = EncodingDetector::new();
    let data = repeat_to(b"plain ascii text, nothing to see here. ", 8192);
    c.bench_function("detect_ascii_8k", |b| {
        b.iter(|| detector.detect(black_box(&data)))
    });
}

fn bench_detect_utf8(c: &mut Criterion) {
    let detector = EncodingDetector::new();
    let data = repeat_to(UTF8_UNIT, 8192);
    c.bench_function("detect_utf8_8k", |b| {
        b.iter(|| detector.detect(black_box(&data)))
    });
}

fn bench_detect_shift_jis(c: &mut Criterion) {
    let detector = EncodingDetector::new();
    let data = repeat_to(SHIFT_JIS_UNIT, 8192);
    c.bench_function("detect_shift_jis_8k", |b| {
        b.iter(|| detector.detect(black_box(&data)))
    });
}

fn bench_detect_euc_jp(c: &mut Criterion) {
    let detector = EncodingDetector::new();
    let data = repeat_to(EUC_JP_UNIT, 8192);
    c.bench_function("detect_euc_jp_8k", |b| {
        b.iter(|| detector.detect(black_box(&data)))
    });
}

criterion_group!(
    benches,
    bench_detect_ascii,
    bench_detect_utf8,
    bench_detect_shift_jis,
    bench_detect_euc_jp,
);
criterion_main!(benches);
