//! Step-sequencer drum machine core.
//!
//! An eight-pad kit of synthesized voices, a 16-steps-per-bar pattern grid,
//! a look-ahead transport that schedules steps sample-accurately on the audio
//! clock, and a recorder that turns the mixed output into a 16-bit WAV.
//!
//! [`DrumMachine`] ties it together; the modules below can also be used on
//! their own (for example, rendering voices offline with [`engine::OfflineHost`]).

pub mod config;
pub mod dsp; // Oscillators, filters, ramps and noise
pub mod engine; // Device output, render callback, scheduler thread
mod error;
pub mod graph; // Composable audio graph nodes
pub mod kit; // Pads, kits, presets and descriptor ingestion
pub mod machine;
pub mod record; // Mix tap, capture and WAV encoding
pub mod sequencing; // Pattern grid and look-ahead transport
pub mod voices; // Drum voice recipes

pub use config::{EngineConfig, MachineConfig, TransportConfig};
pub use error::{Error, Result};
pub use kit::{Kit, KitDescriptor, PadConfig, SoundParams};
pub use machine::DrumMachine;
pub use sequencing::TransportEvent;
pub use voices::VoiceType;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Pads per kit, and rows in the pattern grid.
pub const PAD_COUNT: usize = 8;
pub const STEPS_PER_BAR: usize = 16;
pub const DEFAULT_BARS: usize = 24;
