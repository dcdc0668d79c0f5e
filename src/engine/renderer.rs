/*
Voice Renderer
==============

Runs inside the device callback. Every callback it:

  1. drains queued voice commands (never blocks)
  2. renders in chunks of at most MAX_BLOCK_SIZE frames
  3. sums every voice that overlaps the chunk onto a mono bus
  4. applies the master gain
  5. copies the bus to every output channel
  6. hands the bus to the recording tap (if armed)
  7. advances the audio clock

Voices are placed with frame accuracy:

  chunk         [block_start ─────────────────────── block_end)
  voice               [start ────────────── end)
                       ▲ offset               ▲ dropped after this chunk

A voice whose start frame has already passed when its command arrives begins
at the start of the current chunk and still plays its full length.

The voice pool is preallocated to `max_voices`. When it is full, the voice
that started earliest is replaced.
*/

use crossbeam_channel::Receiver;

use crate::{
    engine::clock::FrameClock,
    graph::{GraphNode, RenderCtx},
    record::tap::TapWriter,
    voices::Voice,
    MAX_BLOCK_SIZE,
};

/// Messages from trigger callers to the render thread.
pub enum VoiceCommand {
    Play { voice: Voice, start_frame: u64 },
    Silence,
}

struct ActiveVoice {
    node: Box<dyn GraphNode>,
    start: u64,
    end: u64,
}

pub struct Renderer {
    commands: Receiver<VoiceCommand>,
    voices: Vec<ActiveVoice>,
    max_voices: usize,
    master_gain: f32,
    channels: usize,
    ctx: RenderCtx,
    clock: FrameClock,
    frame: u64,
    bus: Vec<f32>,
    scratch: Vec<f32>,
    tap: Option<TapWriter>,
}

impl Renderer {
    pub fn new(
        commands: Receiver<VoiceCommand>,
        clock: FrameClock,
        channels: usize,
        master_gain: f32,
        max_voices: usize,
    ) -> Self {
        let max_voices = max_voices.max(1);
        Self {
            commands,
            voices: Vec::with_capacity(max_voices),
            max_voices,
            master_gain,
            channels: channels.max(1),
            ctx: RenderCtx::new(clock.sample_rate() as f32),
            frame: clock.frames(),
            clock,
            bus: vec![0.0; MAX_BLOCK_SIZE],
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            tap: None,
        }
    }

    pub fn with_tap(mut self, tap: TapWriter) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.clock.sample_rate()
    }

    /// Voices currently held (sounding or waiting for their start frame).
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Fill an interleaved output buffer.
    pub fn render(&mut self, data: &mut [f32]) {
        let channels = self.channels;
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

            self.drain_commands();
            self.render_bus(frames);

            let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
            for (frame, &sample) in out.chunks_exact_mut(channels).zip(&self.bus[..frames]) {
                frame.fill(sample);
            }

            if let Some(tap) = &mut self.tap {
                tap.write(&self.bus[..frames]);
            }

            self.frame += frames as u64;
            self.clock.set_frames(self.frame);
            frames_written += frames;
        }

        data[total_frames * channels..].fill(0.0);
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                VoiceCommand::Play { voice, start_frame } => self.admit(voice, start_frame),
                VoiceCommand::Silence => self.voices.clear(),
            }
        }
    }

    fn admit(&mut self, voice: Voice, start_frame: u64) {
        let start = start_frame.max(self.frame);
        let length = (voice.seconds.max(0.0) as f64 * self.ctx.sample_rate as f64).round() as u64;
        let active = ActiveVoice {
            node: voice.node,
            start,
            end: start + length,
        };

        if self.voices.len() < self.max_voices {
            self.voices.push(active);
        } else if let Some(oldest) = self
            .voices
            .iter_mut()
            .min_by_key(|v| v.start)
        {
            *oldest = active;
        }
    }

    fn render_bus(&mut self, frames: usize) {
        let block_start = self.frame;
        let block_end = block_start + frames as u64;
        let bus = &mut self.bus[..frames];
        bus.fill(0.0);

        for voice in &mut self.voices {
            let from = voice.start.max(block_start);
            let to = voice.end.min(block_end);
            if to <= from {
                continue;
            }

            let offset = (from - block_start) as usize;
            let len = (to - from) as usize;
            let scratch = &mut self.scratch[..len];
            scratch.fill(0.0);
            voice.node.render_block(scratch, &self.ctx);

            for (o, s) in bus[offset..offset + len].iter_mut().zip(scratch.iter()) {
                *o += *s;
            }
        }

        for sample in bus.iter_mut() {
            *sample *= self.master_gain;
        }

        self.voices
            .retain(|v| v.end > block_end && (v.start >= block_end || v.node.is_active()));
    }
}
