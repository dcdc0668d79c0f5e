use crossbeam_channel::{Sender, TrySendError};
use log::debug;

use crate::{
    dsp::noise::NoiseBuffer,
    engine::{clock::FrameClock, renderer::VoiceCommand},
    kit::SoundParams,
    sequencing::TriggerSink,
    voices::{self, VoiceType},
};

/// Trigger front end of the render thread.
///
/// Builds the voice graph on the calling thread and queues it with its start
/// frame, so the device callback only ever sums ready-made nodes. Cheap to
/// clone; the scheduler and the machine each hold one.
#[derive(Clone)]
pub struct VoiceSynth {
    tx: Sender<VoiceCommand>,
    noise: NoiseBuffer,
    clock: FrameClock,
}

impl VoiceSynth {
    pub(crate) fn new(tx: Sender<VoiceCommand>, noise: NoiseBuffer, clock: FrameClock) -> Self {
        Self { tx, noise, clock }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn noise(&self) -> &NoiseBuffer {
        &self.noise
    }

    /// Play `voice` at audio time `at`. A time already in the past plays as
    /// soon as possible.
    ///
    /// Returns `false` when the trigger was skipped: unusable parameters, a
    /// full command queue, or a stopped renderer.
    pub fn play(&self, voice: VoiceType, params: &SoundParams, at: f64) -> bool {
        let sample_rate = self.clock.sample_rate() as f32;
        let built = match voices::build(voice, params, &self.noise, sample_rate) {
            Ok(built) => built,
            Err(err) => {
                debug!("skipping {voice:?} trigger: {err}");
                return false;
            }
        };

        let command = VoiceCommand::Play {
            voice: built,
            start_frame: self.clock.seconds_to_frame(at),
        };
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("voice queue full, dropping {voice:?} at {at:.3}s");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Cut every sounding voice.
    pub fn silence(&self) {
        let _ = self.tx.try_send(VoiceCommand::Silence);
    }
}

impl TriggerSink for VoiceSynth {
    fn trigger(&mut self, voice: VoiceType, params: &SoundParams, at: f64) {
        self.play(voice, params, at);
    }
}

impl std::fmt::Debug for VoiceSynth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceSynth")
            .field("sample_rate", &self.clock.sample_rate())
            .field("queued", &self.tx.len())
            .finish()
    }
}
