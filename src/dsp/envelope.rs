/*
Exponential Ramp
================

Every drum voice in the machine is shaped by the same primitive: a value that
starts somewhere and slides *exponentially* to a target over a fixed time,
then holds the target.

Vocabulary
----------

  start       Value at the first sample of the ramp.
  end         Value reached after `duration` and held afterwards.
  duration    Ramp length in samples (seconds * sample_rate, rounded).
  ratio       end / start. Must be positive: an exponential curve cannot
              cross or touch zero.

The Shape
---------

  value(n) = start * (end / start) ^ (n / duration)     for n <= duration
  value(n) = end                                        for n >  duration

  Level
   1.0 ┐╲
       │ ╲
       │  ╲_
       │    ╲__
  0.01 └───────╲______________→ Time
       0     duration

Equal time slices multiply the level by the same factor, which is what a
struck drum head sounds like. Decaying to 0.01 rather than 0 is the usual
compromise: 0.01 is -40 dB, quiet enough to cut without a click.

The Math
--------

Instead of calling powf every sample we precompute the per-sample multiplier

    mult = ratio ^ (1 / duration)

and do `level *= mult`. The level is accumulated in f64 so the product is
still within a few ULPs of `end` after a multi-second ramp.

The same ramp drives pitch as well as gain: the kick sweeps its oscillator
frequency from the pad frequency down to 0.01 Hz over its decay.
*/

/// Exponential slide from `start` to `end`, then hold `end`.
#[derive(Debug, Clone)]
pub struct ExpRamp {
    start: f32,
    end: f32,
    duration: u64,
    elapsed: u64,
    level: f64,
    mult: f64,
}

impl ExpRamp {
    /// Build a ramp lasting `seconds` at `sample_rate`.
    ///
    /// `start` and `end` must both be positive; values at or below zero are
    /// lifted to `f32::MIN_POSITIVE` so the curve stays defined.
    pub fn new(start: f32, end: f32, seconds: f32, sample_rate: f32) -> Self {
        let start = start.max(f32::MIN_POSITIVE);
        let end = end.max(f32::MIN_POSITIVE);
        let duration = (seconds.max(0.0) * sample_rate).round() as u64;

        let mult = if duration == 0 {
            1.0
        } else {
            (end as f64 / start as f64).powf(1.0 / duration as f64)
        };

        Self {
            start,
            end,
            duration,
            elapsed: 0,
            level: if duration == 0 { end as f64 } else { start as f64 },
            mult,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Ramp length in samples.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// True once the ramp has reached `end` and is holding.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current value without advancing.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level as f32
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = self.level as f32;

        if self.elapsed < self.duration {
            self.elapsed += 1;
            self.level = if self.elapsed == self.duration {
                self.end as f64
            } else {
                self.level * self.mult
            };
        }

        value
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Rewind to the first sample.
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.level = if self.duration == 0 {
            self.end as f64
        } else {
            self.start as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    #[test]
    fn starts_at_start_and_lands_on_end() {
        let mut ramp = ExpRamp::new(1.0, 0.01, 0.5, SR);
        let mut out = vec![0.0; 24_000];
        ramp.render(&mut out);

        assert_eq!(out[0], 1.0);
        assert!(ramp.is_finished());
        assert!((ramp.level() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn midpoint_is_geometric_mean() {
        let mut ramp = ExpRamp::new(1.0, 0.01, 1.0, SR);
        let mut out = vec![0.0; 24_001];
        ramp.render(&mut out);

        // sqrt(1.0 * 0.01) = 0.1
        let mid = out[24_000];
        assert!((mid - 0.1).abs() < 1e-4, "got {mid}");
    }

    #[test]
    fn holds_end_after_duration() {
        let mut ramp = ExpRamp::new(0.6, 0.01, 0.01, SR);
        let mut out = vec![0.0; 2_000];
        ramp.render(&mut out);

        assert!(out[480..].iter().all(|&s| (s - 0.01).abs() < 1e-6));
    }

    #[test]
    fn monotonic_for_decays() {
        let mut ramp = ExpRamp::new(150.0, 0.01, 0.5, SR);
        let mut prev = f32::INFINITY;
        for _ in 0..24_000 {
            let s = ramp.next_sample();
            assert!(s <= prev);
            prev = s;
        }
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let mut ramp = ExpRamp::new(1.0, 0.01, 0.0, SR);
        assert!(ramp.is_finished());
        assert_eq!(ramp.next_sample(), 0.01);
    }

    #[test]
    fn reset_rewinds() {
        let mut ramp = ExpRamp::new(1.0, 0.5, 0.001, SR);
        let mut out = vec![0.0; 100];
        ramp.render(&mut out);
        ramp.reset();
        assert_eq!(ramp.next_sample(), 1.0);
    }
}
