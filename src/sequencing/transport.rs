/*
Look-ahead Transport
====================

Two clocks are involved in playing a pattern:

  audio clock   Sample-accurate, advanced by the device. Voices are started
                at exact audio-clock times.
  wall clock    The scheduler thread's sleep/wake timer. Coarse and jittery:
                a 25 ms sleep can come back after 30, 40 or 90 ms.

Nothing musical is timed by the wall clock. The scheduler wakes roughly every
`lookahead` and asks: which steps fall before `now + schedule_ahead` on the
audio clock? Each of those is handed to the synthesizer with its exact audio
time, then the cursor advances.

   audio time ──────────────────────────────────────────────────→
               now           now + schedule_ahead
                │◄──── window ────►│
      ... ──x───┼──x─────x─────x───┼──x── ...
                   ▲     ▲     ▲
                   scheduled this wake (step times)

As long as the wake interval stays below the window the device never runs
dry, and because event times are computed by accumulation from the previous
step (not from "when the timer fired"), jitter never reaches the audio.

Tempo changes only affect the increment applied *after* the current step:
events already handed to the synthesizer keep their times.

Per step:

  1. trigger every pad whose cell is set, at next_event_time
  2. emit a Step event for this step and a PadHit per triggered pad
  3. next_event_time += 0.25 * 60 / bpm      (one sixteenth note)
  4. current_step = (current_step + 1) mod total_steps
*/

use log::debug;

use crate::{
    config::TransportConfig,
    kit::{SoundParams, BPM_RANGE},
    sequencing::{
        events::{delay_until, EventSender, TransportEvent},
        grid::bar_of,
        snapshot::Snapshot,
    },
    voices::VoiceType,
};

/// Receiver of timestamped voice triggers.
pub trait TriggerSink {
    /// Play `voice` with `params` starting at audio time `at` (seconds).
    fn trigger(&mut self, voice: VoiceType, params: &SoundParams, at: f64);
}

impl<T: TriggerSink + ?Sized> TriggerSink for &mut T {
    fn trigger(&mut self, voice: VoiceType, params: &SoundParams, at: f64) {
        (**self).trigger(voice, params, at)
    }
}

/// Seconds per sixteenth-note step at `bpm`.
#[inline]
pub fn step_duration(bpm: f64) -> f64 {
    0.25 * 60.0 / bpm
}

/// Hold `bpm` inside the kit tempo range. Non-finite values keep `current`.
fn clamp_bpm(bpm: f64, current: f64) -> f64 {
    let bpm = if bpm.is_finite() { bpm } else { current };
    bpm.clamp(*BPM_RANGE.start() as f64, *BPM_RANGE.end() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

/// Cursor and clock state, owned by whoever runs the scheduling passes.
#[derive(Debug, Clone)]
pub struct Transport {
    state: PlayState,
    current_step: usize,
    next_event_time: f64,
    bpm: f64,
    schedule_ahead: f64,
    priming_offset: f64,
}

impl Transport {
    pub fn new(config: &TransportConfig, bpm: f64) -> Self {
        Self {
            state: PlayState::Stopped,
            current_step: 0,
            next_event_time: 0.0,
            bpm: clamp_bpm(bpm, 120.0),
            schedule_ahead: config.schedule_ahead,
            priming_offset: config.priming_offset,
        }
    }

    /// Begin playback with the first step `priming_offset` after `now`.
    /// Returns `false` (and changes nothing) if already playing.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state == PlayState::Playing {
            return false;
        }
        self.state = PlayState::Playing;
        self.current_step = 0;
        self.next_event_time = now + self.priming_offset;
        debug!("transport started, first step at {:.3}s", self.next_event_time);
        true
    }

    pub fn stop(&mut self) {
        if self.state == PlayState::Playing {
            debug!("transport stopped at step {}", self.current_step);
        }
        self.state = PlayState::Stopped;
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Step the next scheduled event will play.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Audio time of the next step.
    pub fn next_event_time(&self) -> f64 {
        self.next_event_time
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Clamped to the kit tempo range; non-finite values are ignored.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = clamp_bpm(bpm, self.bpm);
    }

    pub fn step_duration(&self) -> f64 {
        step_duration(self.bpm)
    }

    /// One look-ahead pass at audio time `now`.
    ///
    /// Schedules every step whose time falls before `now + schedule_ahead`
    /// and returns how many steps were scheduled. Does nothing while stopped.
    pub fn schedule(
        &mut self,
        now: f64,
        snapshot: &Snapshot,
        sink: &mut dyn TriggerSink,
        events: &EventSender,
    ) -> usize {
        if self.state != PlayState::Playing {
            return 0;
        }

        self.set_bpm(snapshot.bpm);
        let total_steps = snapshot.grid.total_steps();
        if self.current_step >= total_steps {
            self.current_step = 0;
        }

        let horizon = now + self.schedule_ahead;
        let mut scheduled = 0;

        while self.next_event_time < horizon {
            let step = self.current_step;
            let at = self.next_event_time;
            let delay = delay_until(at, now);

            for row in snapshot.grid.hits_at(step) {
                let Some(pad) = snapshot.kit.pad(row) else {
                    continue;
                };
                sink.trigger(pad.voice_type, &pad.params, at);
                events.emit(TransportEvent::PadHit { pad: row, at, delay });
            }

            events.emit(TransportEvent::Step {
                step,
                bar: bar_of(step),
                at,
                delay,
            });

            self.next_event_time += step_duration(self.bpm);
            self.current_step = (step + 1) % total_steps;
            scheduled += 1;
        }

        scheduled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        kit::Kit,
        sequencing::{events, grid::PatternGrid},
    };

    #[derive(Default)]
    struct Captured {
        hits: Vec<(VoiceType, f64)>,
    }

    impl TriggerSink for Captured {
        fn trigger(&mut self, voice: VoiceType, _params: &SoundParams, at: f64) {
            self.hits.push((voice, at));
        }
    }

    fn snapshot(grid: PatternGrid, bpm: f64) -> Snapshot {
        Snapshot {
            kit: Arc::new(Kit::default()),
            grid: Arc::new(grid),
            bpm,
        }
    }

    fn started(now: f64) -> Transport {
        let mut transport = Transport::new(&TransportConfig::default(), 120.0);
        assert!(transport.start(now));
        transport
    }

    #[test]
    fn start_is_idempotent() {
        let mut transport = started(1.0);
        let first = transport.next_event_time();
        assert!((first - 1.1).abs() < 1e-12);

        assert!(!transport.start(5.0));
        assert_eq!(transport.next_event_time(), first);
    }

    #[test]
    fn stopped_transport_schedules_nothing() {
        let mut transport = Transport::new(&TransportConfig::default(), 120.0);
        let (tx, _rx) = events::channel(16);
        let mut sink = Captured::default();
        let n = transport.schedule(0.0, &snapshot(PatternGrid::new(1), 120.0), &mut sink, &tx);
        assert_eq!(n, 0);
    }

    #[test]
    fn window_bounds_each_pass() {
        let mut transport = started(0.0);
        let (tx, _rx) = events::channel(64);
        let mut sink = Captured::default();
        let snap = snapshot(PatternGrid::new(1), 120.0);

        // first step at 0.1, horizon 0.1: nothing yet
        assert_eq!(transport.schedule(0.0, &snap, &mut sink, &tx), 0);
        // horizon 0.2: steps at 0.1 and 0.225 -> only 0.1
        assert_eq!(transport.schedule(0.1, &snap, &mut sink, &tx), 1);
        assert_eq!(transport.current_step(), 1);
        assert!(transport.next_event_time() >= 0.2);
    }

    #[test]
    fn four_on_the_floor_at_120() {
        let mut grid = PatternGrid::new(1);
        for step in [0, 4, 8, 12] {
            grid.set(0, step, true);
        }
        let snap = snapshot(grid, 120.0);
        let (tx, _rx) = events::channel(256);
        let mut sink = Captured::default();
        let mut transport = started(0.0);

        // stop before the one-bar grid wraps back to step 0 at 2.1 s
        let mut now = 0.0;
        while now < 1.6 {
            transport.schedule(now, &snap, &mut sink, &tx);
            now += 0.025;
        }

        let times: Vec<f64> = sink.hits.iter().map(|&(_, at)| at).collect();
        assert_eq!(times.len(), 4);
        for (k, at) in times.iter().enumerate() {
            let expected = 0.1 + 0.5 * k as f64;
            assert!((at - expected).abs() < 1e-9, "hit {k} at {at}");
        }
        assert!(sink.hits.iter().all(|&(v, _)| v == VoiceType::Kick));
    }

    #[test]
    fn steps_advance_monotonically_and_wrap() {
        let grid = PatternGrid::new(1);
        let snap = snapshot(grid, 200.0);
        let (tx, rx) = events::channel(1024);
        let mut sink = Captured::default();
        let mut transport = started(0.0);

        let mut now = 0.0;
        while now < 3.0 {
            transport.schedule(now, &snap, &mut sink, &tx);
            now += 0.025;
        }

        let steps: Vec<(usize, f64)> = rx
            .try_iter()
            .filter_map(|e| match e {
                TransportEvent::Step { step, at, .. } => Some((step, at)),
                _ => None,
            })
            .collect();

        assert!(steps.len() > 16);
        for pair in steps.windows(2) {
            assert_eq!(pair[1].0, (pair[0].0 + 1) % 16);
            assert!(pair[1].1 > pair[0].1);
        }
    }

    #[test]
    fn tempo_change_only_moves_future_steps() {
        let mut grid = PatternGrid::new(1);
        grid.set(0, 0, true);
        grid.set(0, 1, true);
        grid.set(0, 2, true);
        let (tx, _rx) = events::channel(64);
        let mut sink = Captured::default();
        let mut transport = started(0.0);

        // steps 0 and 1 at 120 bpm: 0.1, 0.225
        transport.schedule(0.2, &snapshot(grid.clone(), 120.0), &mut sink, &tx);
        assert_eq!(sink.hits.len(), 2);
        let committed = sink.hits.clone();

        // the increment after step 1 was taken at 120 bpm, step 2 is at 0.35;
        // at 60 bpm the step after that is 0.25 s later
        transport.schedule(0.3, &snapshot(grid, 60.0), &mut sink, &tx);
        assert_eq!(&sink.hits[..2], &committed[..]);
        assert!((sink.hits[2].1 - 0.35).abs() < 1e-9);
        assert!((transport.next_event_time() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn events_carry_non_negative_delays() {
        let mut grid = PatternGrid::new(1);
        grid.set(2, 0, true);
        let (tx, rx) = events::channel(64);
        let mut sink = Captured::default();
        let mut transport = started(0.0);

        // woken late: the first step is already in the past
        transport.schedule(0.15, &snapshot(grid, 120.0), &mut sink, &tx);

        let got: Vec<_> = rx.try_iter().collect();
        assert!(got.contains(&TransportEvent::PadHit {
            pad: 2,
            at: 0.1,
            delay: std::time::Duration::ZERO
        }));
        assert!(matches!(
            got.last(),
            Some(TransportEvent::Step { step: 1, bar: 0, .. })
        ));
    }

    #[test]
    fn out_of_range_tempo_is_clamped() {
        let (tx, _rx) = events::channel(256);
        let mut sink = Captured::default();
        let mut transport = started(0.0);

        for bpm in [0.0, -120.0, f64::NAN, f64::INFINITY] {
            let now = transport.next_event_time();
            let n = transport.schedule(now, &snapshot(PatternGrid::new(1), bpm), &mut sink, &tx);
            assert!(n <= 2, "bpm {bpm} scheduled {n} steps");
            assert!(transport.next_event_time().is_finite());
        }

        // the slowest legal step is 0.25 s
        assert_eq!(transport.bpm(), 60.0);
        transport.set_bpm(1_000.0);
        assert_eq!(transport.bpm(), 200.0);
    }

    #[test]
    fn stop_halts_scheduling() {
        let mut transport = started(0.0);
        transport.stop();
        assert!(!transport.is_playing());

        let (tx, _rx) = events::channel(16);
        let mut sink = Captured::default();
        let n = transport.schedule(10.0, &snapshot(PatternGrid::new(1), 120.0), &mut sink, &tx);
        assert_eq!(n, 0);
    }
}
