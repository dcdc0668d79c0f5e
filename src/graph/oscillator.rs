use crate::dsp::{envelope::ExpRamp, oscillator::Oscillator, oscillator::Waveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The tonal half of every voice. An `OscNode` owns one phase-accumulating
oscillator and a frequency *curve*: either a fixed pitch, or an exponential
ramp that is evaluated every sample.

  Fixed:  snare/clap body, synth pads      frequency(t) = f
  Ramp:   kick                             frequency(t) = f * (0.01 / f) ^ (t / decay)

The kick's ramp falls very fast at first (most of the audible "thump" happens
in the first 10-20 ms) and then crawls towards 0.01 Hz, where the oscillator
is effectively frozen and only the amplitude tail remains.

Example usage:
  let tone = OscNode::sine(200.0);
  let kick = OscNode::sine_sweep(ExpRamp::new(150.0, 0.01, 0.5, 48_000.0));
  let synth = OscNode::new(Waveform::Triangle, 800.0);
*/

enum FrequencyCurve {
    Fixed(f32),
    Ramp(ExpRamp),
}

pub struct OscNode {
    osc: Oscillator,
    frequency: FrequencyCurve,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            osc: Oscillator::new(waveform),
            frequency: FrequencyCurve::Fixed(frequency),
        }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(Waveform::Sine, frequency)
    }

    /// Sine whose pitch follows `ramp` sample by sample.
    pub fn sine_sweep(ramp: ExpRamp) -> Self {
        Self {
            osc: Oscillator::new(Waveform::Sine),
            frequency: FrequencyCurve::Ramp(ramp),
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match &mut self.frequency {
            FrequencyCurve::Fixed(frequency) => {
                let frequency = *frequency;
                for sample in out.iter_mut() {
                    *sample = self.osc.next_sample(frequency, ctx.sample_rate);
                }
            }
            FrequencyCurve::Ramp(ramp) => {
                for sample in out.iter_mut() {
                    *sample = self.osc.next_sample(ramp.next_sample(), ctx.sample_rate);
                }
            }
        }
    }
}
