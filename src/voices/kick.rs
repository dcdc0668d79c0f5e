//! Kick drum voice.
//!
//! A sine whose pitch falls exponentially from the pad frequency to 0.01 Hz
//! over the decay, under an amplitude envelope falling 1.0 → 0.01 over the
//! same time. The fast early pitch drop is the "punch"; what's left is a
//! low thud that fades out.
//!
//! # Variations
//!
//! - Longer decay = boomy 808-style kick
//! - Higher start frequency = more "click" attack

use crate::{
    dsp::envelope::ExpRamp,
    graph::{
        envelope::{EnvNode, ENVELOPE_FLOOR},
        extensions::NodeExt,
        oscillator::OscNode,
        GraphNode,
    },
    kit::SoundParams,
};

/// Create a kick drum voice.
pub fn kick(params: &SoundParams, sample_rate: f32) -> Box<dyn GraphNode> {
    let pitch = ExpRamp::new(params.frequency, ENVELOPE_FLOOR, params.decay, sample_rate);

    OscNode::sine_sweep(pitch)
        .amplify(EnvNode::decay(1.0, params.decay, sample_rate))
        .boxed()
}
