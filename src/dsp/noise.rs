use std::sync::Arc;

use rand::Rng;

/// Shared table of uniform white noise in `[-1, 1]`.
///
/// Generated once per engine and shared by every noise voice; each voice reads
/// it from index 0, so two hits of the same hihat are sample-identical. Reads
/// past the end return silence.
#[derive(Debug, Clone)]
pub struct NoiseBuffer {
    samples: Arc<[f32]>,
}

impl NoiseBuffer {
    /// Fill `seconds` worth of samples at `sample_rate` from `rng`.
    pub fn generate<R: Rng>(sample_rate: u32, seconds: f32, rng: &mut R) -> Self {
        let len = (sample_rate as f32 * seconds.max(0.0)).round() as usize;
        let samples: Vec<f32> = (0..len).map(|_| rng.random_range(-1.0..=1.0)).collect();
        Self::from_samples(samples)
    }

    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.samples.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}
