//! Generic tonal voice: one oscillator of the pad's `waveform` (sine when
//! absent) at the pad frequency, 0.5 → 0.01 over the decay. Toms, cowbells,
//! bass stabs and "laser" pads in the preset kits are all this recipe.

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode},
    kit::SoundParams,
};

const PEAK: f32 = 0.5;

/// Create a synth voice.
pub fn synth(params: &SoundParams, sample_rate: f32) -> Box<dyn GraphNode> {
    OscNode::new(params.waveform.unwrap_or_default(), params.frequency)
        .amplify(EnvNode::decay(PEAK, params.decay, sample_rate))
        .boxed()
}
