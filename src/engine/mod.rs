//! The audio engine: output device, render callback and trigger path.
//!
//! An [`Engine`] is created cold. The device is opened on [`Engine::init`]
//! (the machine calls it on the first start or pad press) and released on
//! [`Engine::shutdown`]; `init` may be called again afterwards.

pub mod clock;
pub mod host;
pub mod renderer;
pub mod scheduler;
pub mod synth;

use log::info;

pub use clock::FrameClock;
pub use host::{AudioHost, CpalHost, NoDevice, OfflineHost, OutputFormat, StreamGuard};
pub use renderer::{Renderer, VoiceCommand};
pub use scheduler::SchedulerHandle;
pub use synth::VoiceSynth;

use crate::{
    config::EngineConfig,
    dsp::noise::NoiseBuffer,
    kit::SoundParams,
    record::tap::{self, TapReader},
    voices::VoiceType,
    Error, Result,
};

/// Depth of the voice command queue into the render callback.
pub const COMMAND_CAPACITY: usize = 1024;

pub struct Engine {
    config: EngineConfig,
    host: Box<dyn AudioHost>,
    running: Option<Running>,
}

struct Running {
    format: OutputFormat,
    clock: FrameClock,
    synth: VoiceSynth,
    tap: TapSlot,
    _stream: StreamGuard,
}

enum TapSlot {
    Unsupported,
    Idle(TapReader),
    Taken,
}

impl Engine {
    /// Engine on the default output device.
    pub fn new(config: EngineConfig) -> Self {
        let host = CpalHost::new(config.buffer_size);
        Self::with_host(config, host)
    }

    pub fn with_host(config: EngineConfig, host: impl AudioHost + 'static) -> Self {
        Self {
            config,
            host: Box::new(host),
            running: None,
        }
    }

    /// Open the device and start rendering. Does nothing if already running.
    pub fn init(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Ok(());
        }

        let format = self.host.probe()?;
        let clock = FrameClock::new(format.sample_rate);
        let noise = NoiseBuffer::generate(
            format.sample_rate,
            self.config.noise_seconds,
            &mut rand::rng(),
        );

        let (tx, rx) = crossbeam_channel::bounded(COMMAND_CAPACITY);
        let mut renderer = Renderer::new(
            rx,
            clock.clone(),
            format.channels as usize,
            self.config.master_gain,
            self.config.max_voices,
        );

        let tap = if self.host.supports_tap() {
            let (writer, reader) =
                tap::tap(self.config.tap_block_frames, self.config.tap_ring_blocks);
            renderer = renderer.with_tap(writer);
            TapSlot::Idle(reader)
        } else {
            TapSlot::Unsupported
        };

        let stream = self.host.start(renderer)?;
        info!(
            "engine started at {} Hz, {} channels",
            format.sample_rate, format.channels
        );

        self.running = Some(Running {
            format,
            synth: VoiceSynth::new(tx, noise, clock.clone()),
            clock,
            tap,
            _stream: stream,
        });
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.running.as_ref().map(|r| r.format)
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.format().map(|f| f.sample_rate)
    }

    pub fn clock(&self) -> Option<&FrameClock> {
        self.running.as_ref().map(|r| &r.clock)
    }

    /// Current audio time, or `None` while the engine is down.
    pub fn now(&self) -> Option<f64> {
        self.clock().map(FrameClock::now)
    }

    pub fn synth(&self) -> Option<&VoiceSynth> {
        self.running.as_ref().map(|r| &r.synth)
    }

    /// Play a voice at audio time `at`, bringing the engine up first if needed.
    /// Returns whether the voice was queued.
    pub fn trigger(&mut self, voice: VoiceType, params: &SoundParams, at: f64) -> Result<bool> {
        self.init()?;
        Ok(self
            .synth()
            .is_some_and(|synth| synth.play(voice, params, at)))
    }

    /// Whether the running engine can tap its mix.
    pub fn supports_tap(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !matches!(r.tap, TapSlot::Unsupported))
    }

    /// Borrow the recording tap for a take, bringing the engine up first.
    pub fn take_tap(&mut self) -> Result<TapReader> {
        self.init()?;
        let running = self
            .running
            .as_mut()
            .ok_or_else(|| Error::engine("engine is not running"))?;

        match std::mem::replace(&mut running.tap, TapSlot::Taken) {
            TapSlot::Idle(reader) => Ok(reader),
            TapSlot::Unsupported => {
                running.tap = TapSlot::Unsupported;
                Err(Error::RecordingUnsupported(
                    "output host has no mix tap".into(),
                ))
            }
            TapSlot::Taken => Err(Error::RecordingUnsupported(
                "the mix tap is already in use".into(),
            )),
        }
    }

    /// Hand the tap back after a take.
    pub fn return_tap(&mut self, reader: TapReader) {
        if let Some(running) = &mut self.running {
            if matches!(running.tap, TapSlot::Taken) {
                running.tap = TapSlot::Idle(reader);
            }
        }
    }

    /// Stop the output and drop every voice. The engine can be re-initialized.
    pub fn shutdown(&mut self) {
        if let Some(running) = self.running.take() {
            running.synth.silence();
            info!("engine stopped at {:.3}s", running.clock.now());
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("format", &self.format())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
