use crate::dsp::noise::NoiseBuffer;
use crate::graph::node::{GraphNode, RenderCtx};

/// Plays the shared noise table once from the start.
pub struct NoiseNode {
    buffer: NoiseBuffer,
    position: usize,
}

impl NoiseNode {
    pub fn new(buffer: NoiseBuffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self.buffer.get(self.position);
            self.position = self.position.saturating_add(1);
        }
    }

    fn is_active(&self) -> bool {
        self.position < self.buffer.len()
    }
}
