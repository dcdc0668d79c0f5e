/*
Recording Tap
=============

The tap is a side channel off the master bus. It never writes to the device
output, so arming it does not change what you hear.

  render thread                          capture thread
  ─────────────                          ──────────────
  mix (mono, post gain)                  TapReader::pump
     │                                      ▲
     ▼                                      │ whole stereo blocks
  TapWriter::write ──► rtrb ring (f32) ─────┘
     interleaved L,R pairs

The render thread never blocks and never allocates here. Each callback block
is committed to the ring in one chunk, so the reader never sees half a block.
If the ring has no room for the whole block the block is dropped and counted
as an overrun; the take then has a gap, but the audio thread keeps time.
*/

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};

use super::capture::CaptureBuffer;
use crate::MAX_BLOCK_SIZE;

/// Build a tap delivering `block_frames`-frame stereo blocks, buffering up to
/// `ring_blocks` of them.
///
/// The writer commits one render chunk at a time, so each ring slot holds at
/// least [`MAX_BLOCK_SIZE`] frames however small the delivered blocks are.
pub fn tap(block_frames: usize, ring_blocks: usize) -> (TapWriter, TapReader) {
    let block_frames = block_frames.max(1);
    let slot_frames = block_frames.max(MAX_BLOCK_SIZE);
    let capacity = slot_frames * 2 * ring_blocks.max(2);
    let (producer, consumer) = RingBuffer::new(capacity);
    let armed = Arc::new(AtomicBool::new(false));
    let overruns = Arc::new(AtomicU64::new(0));

    let writer = TapWriter {
        producer,
        armed: armed.clone(),
        overruns: overruns.clone(),
    };
    let reader = TapReader {
        consumer,
        armed,
        overruns,
        block_frames,
        block: TapBlock::with_capacity(block_frames),
    };
    (writer, reader)
}

/// Render-thread half.
pub struct TapWriter {
    producer: Producer<f32>,
    armed: Arc<AtomicBool>,
    overruns: Arc<AtomicU64>,
}

impl TapWriter {
    /// Copy one mono block into the ring as (s, s) pairs while armed.
    pub fn write(&mut self, mono: &[f32]) {
        if mono.is_empty() || !self.armed.load(Ordering::Acquire) {
            return;
        }

        match self.producer.write_chunk_uninit(mono.len() * 2) {
            Ok(chunk) => {
                chunk.fill_from_iter(mono.iter().flat_map(|&s| [s, s]));
            }
            Err(_) => {
                self.overruns.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Reused per-channel delivery buffer.
#[derive(Debug, Default)]
pub struct TapBlock {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl TapBlock {
    fn with_capacity(frames: usize) -> Self {
        Self {
            left: Vec::with_capacity(frames),
            right: Vec::with_capacity(frames),
        }
    }

    pub fn frames(&self) -> usize {
        self.left.len()
    }
}

/// Capture-thread half.
pub struct TapReader {
    consumer: Consumer<f32>,
    armed: Arc<AtomicBool>,
    overruns: Arc<AtomicU64>,
    block_frames: usize,
    block: TapBlock,
}

impl TapReader {
    /// Start accepting audio. Anything left in the ring from an earlier take
    /// is discarded first.
    pub fn arm(&mut self) {
        self.discard();
        self.overruns.store(0, Ordering::Relaxed);
        self.armed.store(true, Ordering::Release);
    }

    /// Stop accepting audio. Blocks already in the ring stay readable.
    pub fn disarm(&mut self) {
        self.armed.store(false, Ordering::Release);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Shared arm flag, for disarming from a thread that does not own the reader.
    pub fn arm_flag(&self) -> Arc<AtomicBool> {
        self.armed.clone()
    }

    pub fn block_frames(&self) -> usize {
        self.block_frames
    }

    /// Blocks the writer had to drop since the last `arm`.
    pub fn overruns(&self) -> u64 {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Move every complete block into `sink`. Returns frames delivered.
    pub fn pump(&mut self, sink: &mut CaptureBuffer) -> usize {
        let mut delivered = 0;
        while self.consumer.slots() >= self.block_frames * 2 {
            delivered += self.deliver(self.block_frames, sink);
        }
        delivered
    }

    /// Deliver whatever is left as a final, possibly partial, block.
    pub fn flush(&mut self, sink: &mut CaptureBuffer) -> usize {
        let mut delivered = self.pump(sink);
        let frames = self.consumer.slots() / 2;
        if frames > 0 {
            delivered += self.deliver(frames, sink);
        }
        delivered
    }

    fn deliver(&mut self, frames: usize, sink: &mut CaptureBuffer) -> usize {
        let Ok(chunk) = self.consumer.read_chunk(frames * 2) else {
            return 0;
        };

        self.block.left.clear();
        self.block.right.clear();
        let (first, second) = chunk.as_slices();
        let mut samples = first.iter().chain(second.iter());
        while let (Some(&l), Some(&r)) = (samples.next(), samples.next()) {
            self.block.left.push(l);
            self.block.right.push(r);
        }
        chunk.commit_all();

        sink.push_block(&self.block.left, &self.block.right);
        self.block.frames()
    }

    fn discard(&mut self) {
        let stale = self.consumer.slots();
        if let Ok(chunk) = self.consumer.read_chunk(stale) {
            chunk.commit_all();
        }
    }
}
