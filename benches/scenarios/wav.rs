//! Benchmarks for finishing a take.

use std::hint::black_box;

use beatgrid::record::{wav, CaptureBuffer};
use criterion::{BenchmarkId, Criterion, Throughput};

pub fn bench_wav(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/wav");

    for seconds in [1usize, 10] {
        let mut capture = CaptureBuffer::new(44_100);
        let block: Vec<f32> = (0..4096).map(|i| ((i as f32) * 0.01).sin() * 0.8).collect();
        for _ in 0..(seconds * 44_100 / 4096) {
            capture.push_block(&block, &block);
        }
        let interleaved = capture.interleaved();

        group.throughput(Throughput::Elements(capture.frames() as u64));
        group.bench_with_input(BenchmarkId::new("interleave", seconds), &seconds, |b, _| {
            b.iter(|| black_box(capture.interleaved()))
        });
        group.bench_with_input(BenchmarkId::new("encode", seconds), &seconds, |b, _| {
            b.iter(|| black_box(wav::encode(&interleaved, 44_100)))
        });
    }

    group.finish();
}
