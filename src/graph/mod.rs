//! Composable building blocks for constructing voice graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with block-based rendering.
//! The `extensions` module adds fluent helpers so each voice recipe reads as
//! a signal chain.

/// Multiply two signals together (VCA).
pub mod amplify;
/// Exponential gain envelopes.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, `.layer()`).
pub mod extensions;
/// State-variable filter node.
pub mod filter;
/// Unity-gain summing of parallel branches.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Playback of the shared noise table.
pub mod noise;
/// Fixed and swept oscillators.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
