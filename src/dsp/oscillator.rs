use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Periodic waveform shapes available to tonal voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Naive phase-accumulator oscillator.
///
/// Phase is kept in cycles (0.0..1.0) so the frequency can change every sample
/// without discontinuities; the kick's pitch ramp relies on that.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce one sample at `frequency` Hz and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = shape(self.waveform, self.phase);
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Evaluate a waveform at `phase` (in cycles). Every shape starts at or near
/// zero-crossing except the square, which starts high.
#[inline]
fn shape(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (TAU * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => {
            let shifted = phase + 0.5;
            2.0 * (shifted - shifted.floor()) - 1.0
        }
        Waveform::Triangle => {
            if phase < 0.25 {
                4.0 * phase
            } else if phase < 0.75 {
                2.0 - 4.0 * phase
            } else {
                4.0 * phase - 4.0
            }
        }
    }
}
