//! Snare and clap voice.
//!
//! Two layers, each with its own envelope:
//!
//! 1. A sine "body" at the pad frequency, 0.3 → 0.01 over a fixed 100 ms
//! 2. Noise through a high-pass (`filterFreq`, default 1 kHz) for the rattle,
//!    `noiseMix` (default 0.5) → 0.01 over the decay
//!
//! Both layers are cut at the decay. Claps use the same recipe; the preset
//! kits give them a higher body pitch and a more noise-heavy mix.

use crate::{
    dsp::noise::NoiseBuffer,
    graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode,
        oscillator::OscNode, GraphNode,
    },
    kit::SoundParams,
};

use super::or_default;

const BODY_GAIN: f32 = 0.3;
const BODY_DECAY: f32 = 0.1;
const DEFAULT_CUTOFF: f32 = 1_000.0;
const DEFAULT_NOISE_MIX: f32 = 0.5;

/// Create a snare (or clap) voice.
pub fn snare(params: &SoundParams, noise: &NoiseBuffer, sample_rate: f32) -> Box<dyn GraphNode> {
    let body = OscNode::sine(params.frequency)
        .amplify(EnvNode::decay(BODY_GAIN, BODY_DECAY, sample_rate));

    let rattle = NoiseNode::new(noise.clone())
        .through(FilterNode::highpass(or_default(params.filter_freq, DEFAULT_CUTOFF)))
        .amplify(EnvNode::decay(
            or_default(params.noise_mix, DEFAULT_NOISE_MIX),
            params.decay,
            sample_rate,
        ));

    body.layer(rattle).boxed()
}
