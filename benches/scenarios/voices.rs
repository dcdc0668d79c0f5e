//! Benchmarks for the five drum voice recipes.

use std::hint::black_box;

use beatgrid::{
    dsp::noise::NoiseBuffer,
    graph::RenderCtx,
    kit::presets,
    voices,
};
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::new(SAMPLE_RATE);
    let noise = NoiseBuffer::generate(SAMPLE_RATE as u32, 2.0, &mut StdRng::seed_from_u64(1));
    let kit = presets::neon_808();

    // Building a voice happens off the audio thread, once per trigger
    group.bench_function("build_kit", |b| {
        b.iter(|| {
            for pad in kit.pads() {
                let voice = voices::build(pad.voice_type, &pad.params, &noise, SAMPLE_RATE);
                black_box(voice.is_ok());
            }
        })
    });

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for pad in kit.pads() {
            let Ok(mut voice) = voices::build(pad.voice_type, &pad.params, &noise, SAMPLE_RATE)
            else {
                continue;
            };
            let name = pad.label.to_lowercase().replace(' ', "_");
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    voice.node.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }
    }

    group.finish();
}
