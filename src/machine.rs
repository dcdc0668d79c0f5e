/*
Drum Machine Facade
===================

The only writer of kit, grid and tempo. Every edit replaces the affected
piece (copy-on-write through `Arc::make_mut`) and publishes a new snapshot;
the scheduler picks it up on its next wake.

  caller ──► DrumMachine ──publish──► SnapshotFeed ──► scheduler thread
                 │                                          │
                 ├── trigger_pad_now ──► VoiceSynth ◄───────┘
                 │                          │
                 │                          ▼
                 └── Recorder ◄── tap ◄── Renderer (device callback)

Playback state lives on the scheduler thread while playing; `stop` joins it.
*/

use std::sync::Arc;

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

use crate::{
    config::MachineConfig,
    engine::{AudioHost, Engine, SchedulerHandle},
    kit::{Kit, KitDescriptor, BPM_RANGE},
    record::Recorder,
    sequencing::{events, EventSender, PatternGrid, Snapshot, SnapshotPublisher, Transport, TransportEvent},
    Result,
};

pub struct DrumMachine {
    config: MachineConfig,
    engine: Engine,
    recorder: Recorder,
    kit: Arc<Kit>,
    grid: Arc<PatternGrid>,
    bpm: f64,
    publisher: SnapshotPublisher,
    events: EventSender,
    event_rx: Receiver<TransportEvent>,
    scheduler: Option<SchedulerHandle>,
}

impl DrumMachine {
    /// Machine on the default output device. Nothing is opened until the
    /// first `start`, pad press or `arm_recording`.
    pub fn new(config: MachineConfig) -> Self {
        let engine = Engine::new(config.engine.clone());
        Self::with_engine(config, engine)
    }

    pub fn with_host(config: MachineConfig, host: impl AudioHost + 'static) -> Self {
        let engine = Engine::with_host(config.engine.clone(), host);
        Self::with_engine(config, engine)
    }

    fn with_engine(config: MachineConfig, engine: Engine) -> Self {
        let kit = Kit::default();
        let (events, event_rx) = events::channel(config.event_capacity);

        Self {
            bpm: kit.bpm() as f64,
            kit: Arc::new(kit),
            grid: Arc::new(PatternGrid::new(config.transport.bars)),
            publisher: SnapshotPublisher::new(),
            recorder: Recorder::new(),
            scheduler: None,
            events,
            event_rx,
            engine,
            config,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            kit: self.kit.clone(),
            grid: self.grid.clone(),
            bpm: self.bpm,
        }
    }

    fn publish(&self) {
        self.publisher.publish(self.snapshot());
    }

    /* --- transport --- */

    /// Begin playback from step 0. A no-op while already playing.
    pub fn start(&mut self) -> Result<()> {
        if self.scheduler.is_some() {
            return Ok(());
        }

        self.engine.init()?;
        let (Some(clock), Some(synth)) = (self.engine.clock(), self.engine.synth()) else {
            return Err(crate::Error::engine("engine is not running"));
        };
        let (clock, synth) = (clock.clone(), synth.clone());

        let mut transport = Transport::new(&self.config.transport, self.bpm);
        transport.start(clock.now());
        let feed = self.publisher.subscribe(self.snapshot());

        self.scheduler = Some(SchedulerHandle::spawn(
            transport,
            feed,
            synth,
            clock,
            self.events.clone(),
            self.config.transport.lookahead(),
        )?);
        info!("playback started at {} bpm", self.bpm);
        Ok(())
    }

    /// Stop scheduling. Voices already handed to the engine still sound.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(scheduler) = self.scheduler.take() {
            let transport = scheduler.stop()?;
            info!("playback stopped before step {}", transport.current_step());
        }
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Change tempo. Clamped to the kit tempo range; non-finite values are
    /// ignored. Only steps after the one currently pending move.
    pub fn set_bpm(&mut self, bpm: f64) {
        if !bpm.is_finite() {
            debug!("ignoring tempo {bpm}");
            return;
        }
        self.bpm = bpm.clamp(*BPM_RANGE.start() as f64, *BPM_RANGE.end() as f64);
        self.publish();
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /* --- pads and grid --- */

    /// Sound `pad` right now. Returns `false` for an unknown pad or a skipped
    /// trigger; fails only when no audio device can be opened.
    pub fn trigger_pad_now(&mut self, pad: usize) -> Result<bool> {
        let Some(config) = self.kit.pad(pad).cloned() else {
            return Ok(false);
        };

        self.engine.init()?;
        let at = self.engine.now().unwrap_or(0.0);
        let played = self
            .engine
            .synth()
            .is_some_and(|synth| synth.play(config.voice_type, &config.params, at));

        if played {
            self.events.emit(TransportEvent::PadHit {
                pad,
                at,
                delay: std::time::Duration::ZERO,
            });
        }
        Ok(played)
    }

    /// Flip one cell of the global grid. Returns the new value, or `None` if
    /// the cell is out of range.
    pub fn toggle_step(&mut self, row: usize, step: usize) -> Option<bool> {
        let value = Arc::make_mut(&mut self.grid).toggle(row, step)?;
        self.publish();
        Some(value)
    }

    /// Flip a cell addressed as `local_step` of `bar`.
    pub fn toggle_step_in_bar(&mut self, row: usize, bar: usize, local_step: usize) -> Option<bool> {
        let value = Arc::make_mut(&mut self.grid).toggle_in_bar(row, bar, local_step)?;
        self.publish();
        Some(value)
    }

    pub fn clear_pattern(&mut self) {
        Arc::make_mut(&mut self.grid).clear();
        self.publish();
    }

    pub fn randomize_bar(&mut self, bar: usize) {
        Arc::make_mut(&mut self.grid).randomize_bar(bar, &mut rand::rng());
        self.publish();
    }

    pub fn grid(&self) -> &PatternGrid {
        &self.grid
    }

    /* --- kits --- */

    /// Switch kits and adopt the kit's tempo. The grid is left alone.
    pub fn select_kit(&mut self, kit: Kit) {
        info!("kit selected: {}", kit.name());
        self.bpm = kit.bpm() as f64;
        self.kit = Arc::new(kit);
        self.publish();
    }

    /// Validate a descriptor and make it the active kit. If it carries a
    /// pattern, the pattern is tiled across the whole grid.
    ///
    /// On error the previous kit stays active.
    pub fn ingest_kit(&mut self, descriptor: KitDescriptor) -> Result<()> {
        let kit = Kit::try_from(descriptor)?;
        self.adopt(kit);
        Ok(())
    }

    /// [`ingest_kit`](Self::ingest_kit) from descriptor JSON.
    pub fn ingest_kit_json(&mut self, json: &str) -> Result<()> {
        let kit = Kit::from_json(json).inspect_err(|err| warn!("rejected kit: {err}"))?;
        self.adopt(kit);
        Ok(())
    }

    fn adopt(&mut self, kit: Kit) {
        if let Some(rows) = kit.pattern() {
            Arc::make_mut(&mut self.grid).tile(rows);
        }
        self.select_kit(kit);
    }

    pub fn kit(&self) -> &Kit {
        &self.kit
    }

    /* --- recording --- */

    pub fn arm_recording(&mut self) -> Result<()> {
        self.recorder.arm(&mut self.engine)
    }

    /// Finish the take. Without a take this is a valid empty WAV.
    pub fn disarm_recording(&mut self) -> Result<Vec<u8>> {
        self.recorder.disarm(&mut self.engine)
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_armed()
    }

    /// Length of the current take in audio-clock seconds.
    pub fn recording_elapsed(&self) -> Option<f64> {
        self.recorder.elapsed(self.engine.now()?)
    }

    /// Enforce the take limit. Returns the finished WAV once the take has
    /// reached `max_take_seconds`, `None` otherwise.
    pub fn poll_recording(&mut self) -> Result<Option<Vec<u8>>> {
        match self.recording_elapsed() {
            Some(elapsed) if elapsed >= self.config.max_take_seconds => {
                info!("take reached {:.1}s, stopping", self.config.max_take_seconds);
                self.disarm_recording().map(Some)
            }
            _ => Ok(None),
        }
    }

    /* --- plumbing --- */

    /// Receiver for cosmetic step and pad events.
    ///
    /// The machine keeps the channel open itself, so events pile up (to
    /// `event_capacity`, then drop) while nobody reads them. That backlog is
    /// stale by now and is discarded here; every receiver shares one queue,
    /// so subscribe once.
    pub fn events(&self) -> Receiver<TransportEvent> {
        while self.event_rx.try_recv().is_ok() {}
        self.event_rx.clone()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Stop playback, abandon any take and release the device.
    pub fn shutdown(&mut self) {
        if let Err(err) = self.stop() {
            warn!("scheduler did not stop cleanly: {err}");
        }
        if self.recorder.is_armed() {
            if let Err(err) = self.recorder.disarm(&mut self.engine) {
                warn!("discarding take failed: {err}");
            }
        }
        self.engine.shutdown();
    }
}

impl Drop for DrumMachine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for DrumMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrumMachine")
            .field("kit", &self.kit.name())
            .field("bpm", &self.bpm)
            .field("playing", &self.is_playing())
            .field("recording", &self.is_recording())
            .finish()
    }
}
