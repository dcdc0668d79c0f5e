//! Hi-hat voice: high-passed noise, 0.6 → 0.01 over the decay.
//!
//! The pad frequency is not used; `filterFreq` (default 7 kHz) sets the
//! brightness. Closed and open hats differ only in decay.

use crate::{
    dsp::noise::NoiseBuffer,
    graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode, GraphNode,
    },
    kit::SoundParams,
};

use super::or_default;

const PEAK: f32 = 0.6;
const DEFAULT_CUTOFF: f32 = 7_000.0;

/// Create a hi-hat voice.
pub fn hihat(params: &SoundParams, noise: &NoiseBuffer, sample_rate: f32) -> Box<dyn GraphNode> {
    NoiseNode::new(noise.clone())
        .through(FilterNode::highpass(or_default(params.filter_freq, DEFAULT_CUTOFF)))
        .amplify(EnvNode::decay(PEAK, params.decay, sample_rate))
        .boxed()
}
