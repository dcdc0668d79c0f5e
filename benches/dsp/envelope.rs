//! Benchmarks for the exponential ramp.

use std::hint::black_box;

use beatgrid::dsp::envelope::ExpRamp;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Mid-ramp: multiply every sample
        let mut ramp = ExpRamp::new(1.0, 0.01, 60.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("decaying", size), &size, |b, _| {
            b.iter(|| {
                ramp.render(black_box(&mut buffer));
            })
        });

        // Finished: holding the floor
        let mut ramp = ExpRamp::new(1.0, 0.01, 0.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("holding", size), &size, |b, _| {
            b.iter(|| {
                ramp.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
