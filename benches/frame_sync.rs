//! Benchmarks for the binary waveform parser
//!
//! The parser sits directly behind the read loop, so it must sustain the
//! link's byte rate with headroom:
//! - clean framed streams (the steady-state case)
//! - noisy streams that exercise the one-byte resync path
//! - chunked feeding at realistic read sizes

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vitalink::FrameSync;

/// A stream of `count` valid frames with a sawtooth payload.
fn framed_stream(count: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(count * 7);
    for i in 0..count {
        let value = ((i % 4096) as i16) - 2048;
        let [high, low] = (value as u16).to_be_bytes();
        stream.extend_from_slice(&[0xAA, 0xAA, 0x04, 0x80, 0x02, high, low]);
    }
    stream
}

/// The same stream with deterministic garbage between frames, including
/// false sync markers.
fn noisy_stream(count: usize) -> Vec<u8> {
    let mut stream = Vec::new();
    for (i, chunk) in framed_stream(count).chunks(7).enumerate() {
        match i % 3 {
            0 => stream.extend_from_slice(&[0x17, 0x2B]),
            1 => stream.extend_from_slice(&[0xAA, 0xAA, 0x00]),
            _ => {}
        }
        stream.extend_from_slice(chunk);
    }
    stream
}

fn bench_clean_stream(c: &mut Criterion) {
    let stream = framed_stream(10_000);

    let mut group = c.benchmark_group("frame_sync_clean");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("single_feed", |b| {
        b.iter(|| {
            let mut sync = FrameSync::new();
            let samples = sync.feed(black_box(&stream));
            black_box(samples)
        })
    });

    group.finish();
}

fn bench_noisy_stream(c: &mut Criterion) {
    let stream = noisy_stream(10_000);

    let mut group = c.benchmark_group("frame_sync_noisy");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("single_feed", |b| {
        b.iter(|| {
            let mut sync = FrameSync::new();
            let samples = sync.feed(black_box(&stream));
            black_box(samples)
        })
    });

    group.finish();
}

fn bench_chunked_feeding(c: &mut Criterion) {
    let stream = framed_stream(10_000);

    let mut group = c.benchmark_group("frame_sync_chunked");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    // Read-loop sized chunks, deliberately not frame-aligned.
    for chunk_len in [64usize, 1024] {
        group.bench_function(format!("chunk_{chunk_len}"), |b| {
            b.iter(|| {
                let mut sync = FrameSync::new();
                let mut total = 0usize;
                for chunk in stream.chunks(black_box(chunk_len)) {
                    total += sync.feed(chunk).len();
                }
                black_box(total)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clean_stream, bench_noisy_stream, bench_chunked_feeding);
criterion_main!(benches);
