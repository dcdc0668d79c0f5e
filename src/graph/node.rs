/// Context passed to graph nodes during rendering.
///
/// Drum voices carry their own pitch and timing, so the only thing the render
/// path has to tell a node is the rate it is running at.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for audio processing graph nodes.
///
/// A node fills `out` in place. Sources overwrite the buffer, processors
/// transform whatever is already in it.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Check if this node can still produce sound.
    ///
    /// Used by the renderer to free a voice before its scheduled end.
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
