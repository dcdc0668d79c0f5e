use crate::dsp::envelope::ExpRamp;
use crate::graph::node::{GraphNode, RenderCtx};

/// Level below which a decayed voice is considered silent.
pub const ENVELOPE_FLOOR: f32 = 0.01;

/// Gain curve node: renders an [`ExpRamp`] as a control signal.
///
/// Meant to be used as the modulator of `.amplify()`.
pub struct EnvNode {
    ramp: ExpRamp,
}

impl EnvNode {
    pub fn new(ramp: ExpRamp) -> Self {
        Self { ramp }
    }

    /// One-shot decay from `peak` down to [`ENVELOPE_FLOOR`] over `seconds`.
    pub fn decay(peak: f32, seconds: f32, sample_rate: f32) -> Self {
        Self::new(ExpRamp::new(peak, ENVELOPE_FLOOR, seconds, sample_rate))
    }

    pub fn level(&self) -> f32 {
        self.ramp.level()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.ramp.render(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decays_to_floor() {
        let ctx = RenderCtx::new(48_000.0);
        let mut env = EnvNode::decay(0.6, 0.05, ctx.sample_rate);
        let mut out = vec![0.0; 4_800];
        env.render_block(&mut out, &ctx);

        assert!((out[0] - 0.6).abs() < 1e-6);
        assert!((out[4_799] - ENVELOPE_FLOOR).abs() < 1e-6);
        assert!((env.level() - ENVELOPE_FLOOR).abs() < 1e-6);
    }
}
