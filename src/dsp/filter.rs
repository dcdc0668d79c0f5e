use std::f32::consts::{FRAC_1_SQRT_2, TAU};

/*
| type      | passes       | rejects      |
| --------- | ------------ | ------------ |
| low-pass  | below cutoff | above cutoff |
| high-pass | above cutoff | below cutoff |

Topology-preserving-transform state-variable filter. `k = 1 / Q`; the default
Q of 1/sqrt(2) gives a Butterworth (maximally flat) response, which is what
the noise voices expect from a plain "high-pass at N Hz".
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub q: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: FRAC_1_SQRT_2,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    /// Warped integrator gain. The cutoff is held just under Nyquist so
    /// descriptor values above half the device rate stay stable.
    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let cutoff = self.cutoff_hz.clamp(1.0, sample_rate * 0.49);
        (TAU * cutoff / (2.0 * sample_rate)).tan()
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.compute_g(sample_rate);
        let k = 1.0 / self.q.max(0.01);

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.filter_type {
                FilterType::LowPass => outputs.lowpass,
                FilterType::HighPass => outputs.highpass,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{Oscillator, Waveform};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine_block(frequency: f32, len: usize) -> Vec<f32> {
        let mut osc = Oscillator::new(Waveform::Sine);
        (0..len)
            .map(|_| osc.next_sample(frequency, SAMPLE_RATE))
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer, SAMPLE_RATE);

        assert!((buffer[511] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer, SAMPLE_RATE);

        assert!(buffer[511].abs() < 0.001, "got {}", buffer[511]);
    }

    #[test]
    fn test_highpass_attenuates_below_cutoff() {
        let mut low = sine_block(200.0, 2_048);
        let mut high = sine_block(10_000.0, 2_048);

        let mut filter = SVFilter::highpass(7_000.0);
        filter.render(&mut low, SAMPLE_RATE);
        filter.reset();
        filter.render(&mut high, SAMPLE_RATE);

        let low_peak = peak_after_transient(&low);
        let high_peak = peak_after_transient(&high);
        assert!(low_peak < 0.01, "200 Hz leaked through: {low_peak}");
        assert!(high_peak > 0.8, "10 kHz was attenuated: {high_peak}");
    }

    #[test]
    fn test_cutoff_above_nyquist_stays_finite() {
        let mut filter = SVFilter::highpass(40_000.0);
        let mut buffer = sine_block(1_000.0, 512);

        filter.render(&mut buffer, 44_100.0);

        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_set_cutoff_updates_frequency() {
        let mut filter = SVFilter::highpass(1000.0);
        filter.set_cutoff(2000.0);
        assert!((filter.cutoff_hz - 2000.0).abs() < 0.1);
    }
}
