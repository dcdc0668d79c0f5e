//! Real-world scenario benchmarks.
//!
//! These model what the machine does while playing: building and rendering
//! drum voices, running the full render callback with a busy voice pool,
//! and encoding a finished take.

mod render;
mod voices;
mod wav;

pub use render::bench_render;
pub use voices::bench_voices;
pub use wav::bench_wav;
