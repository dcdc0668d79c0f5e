use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Layering (Layer)
=========================

Layer renders two nodes side by side and adds them at unity gain:

  Layer:   [A] ────┬──→ (+) ──→ output
           [B] ────┘

Each branch carries its own envelope, so no balance control is needed; the
snare is a sine body layered with a filtered noise rattle, each decaying on
its own clock.
*/

pub struct Layer<A, B> {
    a: A,
    b: B,
    temp_buffer: Vec<f32>,
}

impl<A, B> Layer<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self {
            a,
            b,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Layer<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.a.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.b.render_block(frames, ctx);

        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o += *b;
        }
    }

    fn is_active(&self) -> bool {
        self.a.is_active() || self.b.is_active()
    }
}
