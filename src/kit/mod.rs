//! Kit data model: eight pads, each a voice recipe plus its parameters.
//!
//! A [`Kit`] always holds exactly [`PAD_COUNT`] pads with ids `0..8` and a
//! tempo inside [`BPM_RANGE`]. The only way to build one from outside data is
//! through [`KitDescriptor`], which normalizes or rejects the input.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{dsp::oscillator::Waveform, voices::VoiceType, PAD_COUNT};

mod descriptor;
pub mod presets;

pub use descriptor::KitDescriptor;

/// Tempo range a kit may carry.
pub const BPM_RANGE: RangeInclusive<u32> = 60..=200;

/// Synthesis parameters for one pad. Which fields matter depends on the
/// pad's [`VoiceType`]; unused ones are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundParams {
    /// Base pitch in Hz.
    pub frequency: f32,
    /// Voice length in seconds.
    pub decay: f32,
    /// Kick pitch sweep depth. Kept for descriptor fidelity; the kick recipe
    /// always sweeps down to the envelope floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<f32>,
    /// Noise layer level for snares and claps, in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_mix: Option<f32>,
    /// High-pass cutoff for the noise voices, in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_freq: Option<f32>,
    /// Oscillator shape for synth pads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<Waveform>,
}

impl SoundParams {
    pub fn kick(frequency: f32, decay: f32, sweep: f32) -> Self {
        Self {
            frequency,
            decay,
            sweep: Some(sweep),
            ..Self::default()
        }
    }

    pub fn noisy(frequency: f32, decay: f32, noise_mix: f32, filter_freq: f32) -> Self {
        Self {
            frequency,
            decay,
            noise_mix: Some(noise_mix),
            filter_freq: Some(filter_freq),
            ..Self::default()
        }
    }

    pub fn tone(frequency: f32, decay: f32, waveform: Waveform) -> Self {
        Self {
            frequency,
            decay,
            waveform: Some(waveform),
            ..Self::default()
        }
    }
}

impl Default for SoundParams {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            decay: 0.2,
            sweep: None,
            noise_mix: None,
            filter_freq: None,
            waveform: None,
        }
    }
}

/// One trigger pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadConfig {
    pub id: u8,
    pub label: String,
    /// Display colour as a hex string (`#rrggbb`).
    pub color: String,
    #[serde(rename = "soundType", alias = "voiceType")]
    pub voice_type: VoiceType,
    pub params: SoundParams,
}

impl PadConfig {
    pub fn new(
        id: u8,
        label: impl Into<String>,
        color: impl Into<String>,
        voice_type: VoiceType,
        params: SoundParams,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            color: color.into(),
            voice_type,
            params,
        }
    }
}

/// A complete, validated kit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KitDescriptor")]
pub struct Kit {
    name: String,
    description: String,
    bpm: u32,
    pads: Vec<PadConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<Vec<Vec<bool>>>,
}

impl Kit {
    /// Parse and normalize a JSON kit descriptor.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let descriptor: KitDescriptor = serde_json::from_str(json)?;
        Self::try_from(descriptor)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// All pads, ordered by id.
    pub fn pads(&self) -> &[PadConfig] {
        &self.pads
    }

    /// Pad `id`, or `None` when out of range.
    pub fn pad(&self, id: usize) -> Option<&PadConfig> {
        self.pads.get(id)
    }

    /// Suggested pattern: exactly [`PAD_COUNT`] rows of equal, non-zero length.
    pub fn pattern(&self) -> Option<&[Vec<bool>]> {
        self.pattern.as_deref()
    }

    /// Build from parts that already satisfy the kit invariants.
    pub(crate) fn from_parts(
        name: String,
        description: String,
        bpm: u32,
        pads: Vec<PadConfig>,
        pattern: Option<Vec<Vec<bool>>>,
    ) -> Self {
        debug_assert_eq!(pads.len(), PAD_COUNT);
        Self {
            name,
            description,
            bpm,
            pads,
            pattern,
        }
    }
}

impl Default for Kit {
    fn default() -> Self {
        presets::neon_808()
    }
}
