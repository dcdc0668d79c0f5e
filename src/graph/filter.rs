use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, RenderCtx},
};

/*
State-Variable Filter (SVF)
===========================

Noise is flat across the spectrum; the percussion voices get their colour by
throwing part of it away. A high-pass at 7-8 kHz leaves only the sizzle of a
closed hat, one at 1 kHz keeps the body of a snare's rattle.

Highpass (HP): Passes frequencies ABOVE the cutoff, attenuates below.
  - 12 dB/octave slope (two-pole)
  - Butterworth Q: flat passband, no resonant bump at the cutoff

Example usage:
  let hat = NoiseNode::new(noise)
      .through(FilterNode::highpass(7000.0))
      .amplify(EnvNode::decay(0.6, 0.05, sample_rate));
*/

pub struct FilterNode {
    filter: SVFilter,
}

impl FilterNode {
    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
        }
    }

    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff_hz
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx.sample_rate);
    }
}
