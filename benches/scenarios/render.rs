//! Benchmarks for the render callback with a busy voice pool.

use std::hint::black_box;

use beatgrid::{
    engine::{Engine, OfflineHost},
    kit::presets,
    EngineConfig,
};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    for &size in BLOCK_SIZES {
        for voices in [8usize, 32] {
            let (host, rx) = OfflineHost::new(48_000, 2);
            let mut engine = Engine::with_host(EngineConfig::default(), host);
            if engine.init().is_err() {
                continue;
            }
            let Ok(mut renderer) = rx.try_recv() else {
                continue;
            };
            let kit = presets::techno_909();
            let mut buffer = vec![0.0f32; size * 2];

            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        // keep the pool topped up with fresh one-shots
                        if renderer.active_voices() < voices {
                            if let (Some(synth), Some(now)) = (engine.synth(), engine.now()) {
                                for pad in kit.pads().iter().cycle().take(voices) {
                                    synth.play(pad.voice_type, &pad.params, now);
                                }
                            }
                        }
                        renderer.render(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
