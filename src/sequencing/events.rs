//! Cosmetic transport events for a UI.
//!
//! The scheduler runs ahead of the audio clock, so every event carries both
//! the audio time it refers to and the wall-clock `delay` until it becomes
//! audible. A UI waits `delay` before flashing the pad or moving the cursor.
//!
//! Delivery is best-effort: the channel is bounded and a full channel drops
//! the event instead of blocking the scheduler.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEvent {
    /// The cursor reaches `step` (in `bar`) at audio time `at`.
    Step {
        step: usize,
        bar: usize,
        at: f64,
        delay: Duration,
    },
    /// `pad` sounds at audio time `at`.
    PadHit { pad: usize, at: f64, delay: Duration },
}

impl TransportEvent {
    /// Wall-clock wait until the event is audible.
    pub fn delay(&self) -> Duration {
        match *self {
            Self::Step { delay, .. } | Self::PadHit { delay, .. } => delay,
        }
    }
}

/// Display delay for an event at `at` seen from `now`, never negative.
pub fn delay_until(at: f64, now: f64) -> Duration {
    Duration::from_secs_f64((at - now).max(0.0))
}

/// Sending half of the event channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<TransportEvent>,
}

impl EventSender {
    /// Queue `event`, dropping it if the channel is full or nobody listens.
    /// Returns whether it was queued.
    pub fn emit(&self, event: TransportEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Bounded event channel holding at most `capacity` undelivered events.
pub fn channel(capacity: usize) -> (EventSender, Receiver<TransportEvent>) {
    let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
    (EventSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(pad: usize) -> TransportEvent {
        TransportEvent::PadHit {
            pad,
            at: 0.0,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (tx, rx) = channel(2);
        assert!(tx.emit(hit(0)));
        assert!(tx.emit(hit(1)));
        assert!(!tx.emit(hit(2)));

        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(got, vec![hit(0), hit(1)]);
    }

    #[test]
    fn emit_without_listener_is_harmless() {
        let (tx, rx) = channel(4);
        drop(rx);
        assert!(!tx.emit(hit(0)));
    }

    #[test]
    fn delay_never_negative() {
        assert_eq!(delay_until(1.0, 2.0), Duration::ZERO);
        assert_eq!(delay_until(2.5, 2.0), Duration::from_millis(500));
    }
}
