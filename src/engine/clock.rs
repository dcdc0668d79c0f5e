use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// The audio clock: frames rendered since the engine started.
///
/// Only the renderer advances it, once per rendered block. Everyone else
/// reads it to learn "now" in audio time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frames: Arc<AtomicU64>,
    sample_rate: u32,
}

impl FrameClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Current audio time in seconds.
    pub fn now(&self) -> f64 {
        self.frames_to_seconds(self.frames())
    }

    /// Nearest frame to audio time `seconds`; negative times map to frame 0.
    pub fn seconds_to_frame(&self, seconds: f64) -> u64 {
        if !(seconds > 0.0) {
            return 0;
        }
        (seconds * self.sample_rate as f64).round() as u64
    }

    pub fn frames_to_seconds(&self, frames: u64) -> f64 {
        frames as f64 / self.sample_rate as f64
    }

    pub(crate) fn set_frames(&self, frames: u64) {
        self.frames.store(frames, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        let clock = FrameClock::new(48_000);
        assert_eq!(clock.seconds_to_frame(0.5), 24_000);
        assert_eq!(clock.seconds_to_frame(-1.0), 0);
        assert_eq!(clock.seconds_to_frame(f64::NAN), 0);
        assert_eq!(clock.frames_to_seconds(96_000), 2.0);
    }

    #[test]
    fn clones_share_the_counter() {
        let clock = FrameClock::new(44_100);
        let reader = clock.clone();
        clock.set_frames(44_100);
        assert_eq!(reader.now(), 1.0);
    }
}
