//! Runtime configuration.
//!
//! Every struct here has a `Default` matching the reference machine and derives
//! serde with `#[serde(default)]`, so an embedding application can load partial
//! overrides from whatever format it already uses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_BARS;

/// Settings for the audio engine and its render path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gain applied to the summed voice bus before it reaches the device.
    pub master_gain: f32,
    /// Maximum voices sounding at once; the oldest is dropped past this.
    pub max_voices: usize,
    /// Length of the shared white-noise table in seconds.
    pub noise_seconds: f32,
    /// Frames per block delivered by the recording tap.
    pub tap_block_frames: usize,
    /// Depth of the tap ring, in blocks.
    pub tap_ring_blocks: usize,
    /// Requested device buffer size in frames (`None` = device default).
    pub buffer_size: Option<u32>,
    /// Sample rate stamped on empty captures made before any device was opened.
    pub fallback_sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_gain: 0.8,
            max_voices: 64,
            noise_seconds: 2.0,
            tap_block_frames: 4096,
            tap_ring_blocks: 16,
            buffer_size: None,
            fallback_sample_rate: 44_100,
        }
    }
}

/// Timing of the look-ahead scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// How often the scheduler wakes, in milliseconds.
    pub lookahead_ms: u64,
    /// How far past "now" each wake schedules, in audio-clock seconds.
    pub schedule_ahead: f64,
    /// Delay between `start()` and the first step, in seconds.
    pub priming_offset: f64,
    /// Number of 16-step bars in the pattern grid.
    pub bars: usize,
}

impl TransportConfig {
    pub fn lookahead(&self) -> Duration {
        Duration::from_millis(self.lookahead_ms.max(1))
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            lookahead_ms: 25,
            schedule_ahead: 0.1,
            priming_offset: 0.1,
            bars: DEFAULT_BARS,
        }
    }
}

/// Top-level configuration for [`crate::DrumMachine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub engine: EngineConfig,
    pub transport: TransportConfig,
    /// Longest take `poll_recording` lets run before disarming, in seconds.
    pub max_take_seconds: f64,
    /// Capacity of the cosmetic event channel; events past this are dropped.
    pub event_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            transport: TransportConfig::default(),
            max_take_seconds: 60.0,
            event_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: MachineConfig =
            serde_json::from_str(r#"{ "transport": { "bars": 4 } }"#).unwrap();

        assert_eq!(config.transport.bars, 4);
        assert_eq!(config.transport.lookahead_ms, 25);
        assert_eq!(config.engine.tap_block_frames, 4096);
        assert_eq!(config.max_take_seconds, 60.0);
    }

    #[test]
    fn lookahead_is_never_zero() {
        let config = TransportConfig {
            lookahead_ms: 0,
            ..TransportConfig::default()
        };
        assert_eq!(config.lookahead(), Duration::from_millis(1));
    }
}
