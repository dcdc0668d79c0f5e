//! Voice recipes for the five pad types.
//!
//! Each recipe turns a pad's [`SoundParams`] into a one-shot node graph. The
//! graph itself knows nothing about time; the renderer starts it at the
//! scheduled frame and drops it once [`Voice::seconds`] have played.
//!
//! | voice | graph                                                        |
//! | ----- | ------------------------------------------------------------ |
//! | kick  | swept sine × decay(1.0)                                      |
//! | snare | sine × decay(0.3, 0.1 s) + noise → high-pass × decay(mix)     |
//! | clap  | same recipe as snare                                         |
//! | hihat | noise → high-pass × decay(0.6)                               |
//! | synth | oscillator(waveform) × decay(0.5)                            |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dsp::noise::NoiseBuffer, graph::node::GraphNode, kit::SoundParams};

mod hihat;
mod kick;
mod snare;
mod synth;

pub use hihat::hihat;
pub use kick::kick;
pub use snare::snare;
pub use synth::synth;

/// Which recipe a pad plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Kick,
    Snare,
    Hihat,
    Clap,
    Synth,
}

/// Parameters a recipe cannot render.
///
/// These never leave the synthesizer: the offending trigger is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParams {
    #[error("frequency must be positive and finite, got {0}")]
    Frequency(f32),
    #[error("decay must be positive and finite, got {0}")]
    Decay(f32),
    #[error("filter frequency must be non-negative and finite, got {0}")]
    FilterFreq(f32),
    #[error("noise mix must lie in [0, 1], got {0}")]
    NoiseMix(f32),
}

/// A ready-to-render one-shot.
pub struct Voice {
    pub node: Box<dyn GraphNode>,
    /// Audible length; the renderer stops the voice after this many seconds.
    pub seconds: f32,
}

impl std::fmt::Debug for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voice")
            .field("seconds", &self.seconds)
            .finish_non_exhaustive()
    }
}

/// Build the graph for `voice_type` from `params`.
pub fn build(
    voice_type: VoiceType,
    params: &SoundParams,
    noise: &NoiseBuffer,
    sample_rate: f32,
) -> Result<Voice, InvalidParams> {
    validate(params)?;

    let node = match voice_type {
        VoiceType::Kick => kick(params, sample_rate),
        VoiceType::Snare | VoiceType::Clap => snare(params, noise, sample_rate),
        VoiceType::Hihat => hihat(params, noise, sample_rate),
        VoiceType::Synth => synth(params, sample_rate),
    };

    Ok(Voice {
        node,
        seconds: params.decay,
    })
}

fn validate(params: &SoundParams) -> Result<(), InvalidParams> {
    if !(params.frequency.is_finite() && params.frequency > 0.0) {
        return Err(InvalidParams::Frequency(params.frequency));
    }
    if !(params.decay.is_finite() && params.decay > 0.0) {
        return Err(InvalidParams::Decay(params.decay));
    }
    if let Some(cutoff) = params.filter_freq {
        if !(cutoff.is_finite() && cutoff >= 0.0) {
            return Err(InvalidParams::FilterFreq(cutoff));
        }
    }
    if let Some(mix) = params.noise_mix {
        if !(0.0..=1.0).contains(&mix) {
            return Err(InvalidParams::NoiseMix(mix));
        }
    }
    Ok(())
}

/// Treat an explicit zero like an absent value.
fn or_default(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| *v > 0.0).unwrap_or(default)
}
