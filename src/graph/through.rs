use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (effect):

  Through: [Source] ──→ [Effect] ──→ output

1. Render the source into the output buffer
2. Pass that buffer through the effect (in-place processing)

The noise voices are the only users: noise ──→ high-pass.
*/

pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::noise::NoiseBuffer;
    use crate::graph::{extensions::NodeExt, filter::FilterNode, noise::NoiseNode};

    #[test]
    fn renders_source_then_effect() {
        let mut node = NoiseNode::new(NoiseBuffer::from_samples(vec![1.0; 512]))
            .through(FilterNode::highpass(2_000.0));
        let mut buffer = vec![0.0; 512];
        node.render_block(&mut buffer, &RenderCtx::new(48_000.0));

        // Constant input through a high-pass decays towards zero.
        assert!(buffer[0] > 0.5);
        assert!(buffer[511].abs() < 0.01);
    }

    #[test]
    fn active_while_source_is() {
        let mut node = NoiseNode::new(NoiseBuffer::from_samples(vec![0.1; 4]))
            .through(FilterNode::highpass(2_000.0));
        assert!(node.is_active());

        let mut buffer = vec![0.0; 8];
        node.render_block(&mut buffer, &RenderCtx::new(48_000.0));
        assert!(!node.is_active());
    }
}
