//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once built and realtime-safe, so they
//! can live directly inside voice structs on the render thread.

/// Exponential ramps for gain and pitch decays.
pub mod envelope;
/// State-variable filter used by the noise voices.
pub mod filter;
/// Shared white-noise table.
pub mod noise;
/// Periodic oscillator waveforms.
pub mod oscillator;

pub use envelope::ExpRamp;
pub use filter::{FilterType, SVFilter};
pub use noise::NoiseBuffer;
pub use oscillator::{Oscillator, Waveform};
