//! Performance benchmarks for oxihuff.
//!
//! Measures compression and decompression throughput across data patterns
//! with very different symbol skew:
//! - uniform (two-leaf tree, best case)
//! - repetitive text (moderate skew)
//! - English-like text (realistic skew)
//! - pseudo-random (flat histogram, worst case)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff::{compress, decompress};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same (maximum skew)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - flat histogram (no skew to exploit)
    pub fn random(size: usize) -> Vec<u8> {
        // Simple PRNG for reproducible random data
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Repetitive pattern - few distinct symbols
    pub fn repetitive(size: usize) -> Vec<u8> {
        let pattern = b"TOBEORNOTTOBEORTOBEORNOT";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(pattern.len());
            data.extend_from_slice(&pattern[..chunk_size]);
        }
        data
    }

    /// Text-like data - realistic symbol distribution
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    let patterns: &[(&str, PatternGenerator)] = &[
        ("uniform", test_data::uniform),
        ("repetitive", test_data::repetitive),
        ("text", test_data::text_like),
        ("random", test_data::random),
    ];

    for size in [4 * 1024, 64 * 1024] {
        for (name, generator) in patterns {
            let data = generator(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(*name, size),
                &data,
                |b, data| b.iter(|| compress(black_box(data)).unwrap()),
            );
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let patterns: &[(&str, PatternGenerator)] = &[
        ("uniform", test_data::uniform),
        ("repetitive", test_data::repetitive),
        ("text", test_data::text_like),
        ("random", test_data::random),
    ];

    for size in [4 * 1024, 64 * 1024] {
        for (name, generator) in patterns {
            let compressed = compress(&generator(size)).unwrap();
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(*name, size),
                &compressed,
                |b, compressed| b.iter(|| decompress(black_box(compressed)).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
