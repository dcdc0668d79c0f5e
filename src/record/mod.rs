//! Capture of the mixed output into a WAV take.
//!
//! ```text
//! arm ──► tap armed ──► capture thread pumps blocks every few ms
//!                                    │
//! disarm ◄── join, flush the ring ◄──┘ ──► CaptureBuffer ──► WAV bytes
//! ```
//!
//! The recorder never caps a take on its own; the caller decides when to
//! stop (the machine facade stops at its configured maximum).

pub mod capture;
pub mod tap;
pub mod wav;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{RecvTimeoutError, Sender};
use log::{info, warn};

pub use capture::CaptureBuffer;
pub use tap::{TapBlock, TapReader, TapWriter};

use crate::{engine::Engine, Error, Result};

const THREAD_NAME: &str = "beatgrid-capture";
const PUMP_INTERVAL: Duration = Duration::from_millis(10);

/// One take in progress.
struct ActiveTake {
    armed: Arc<AtomicBool>,
    stop_tx: Sender<()>,
    worker: JoinHandle<(TapReader, CaptureBuffer)>,
    started_at: f64,
}

/// Arms and disarms the engine's recording tap.
#[derive(Default)]
pub struct Recorder {
    take: Option<ActiveTake>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.take.is_some()
    }

    /// Start a take. Arming while already armed keeps the running take.
    ///
    /// Fails with [`Error::RecordingUnsupported`] when the engine cannot tap
    /// its mix, or [`Error::EngineUnavailable`] when no device can be opened.
    pub fn arm(&mut self, engine: &mut Engine) -> Result<()> {
        if self.take.is_some() {
            return Ok(());
        }

        let mut reader = engine.take_tap()?;
        let sample_rate = engine
            .sample_rate()
            .unwrap_or(engine.config().fallback_sample_rate);
        let started_at = engine.now().unwrap_or(0.0);

        reader.arm();
        let armed = reader.arm_flag();
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let worker = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                let mut buffer = CaptureBuffer::new(sample_rate);
                loop {
                    reader.pump(&mut buffer);
                    match stop_rx.recv_timeout(PUMP_INTERVAL) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                (reader, buffer)
            })
            .map_err(|source| {
                armed.store(false, Ordering::Release);
                Error::Spawn {
                    name: THREAD_NAME,
                    source,
                }
            })?;

        info!("recording armed at {started_at:.3}s");
        self.take = Some(ActiveTake {
            armed,
            stop_tx,
            worker,
            started_at,
        });
        Ok(())
    }

    /// Finish the take and return it as WAV bytes.
    ///
    /// Without a take in progress this returns a valid WAV with no samples.
    pub fn disarm(&mut self, engine: &mut Engine) -> Result<Vec<u8>> {
        let Some(take) = self.take.take() else {
            let sample_rate = engine
                .sample_rate()
                .unwrap_or(engine.config().fallback_sample_rate);
            return wav::empty(sample_rate);
        };

        take.armed.store(false, Ordering::Release);
        let _ = take.stop_tx.send(());
        let (mut reader, mut buffer) = take
            .worker
            .join()
            .map_err(|_| Error::WorkerPanicked(THREAD_NAME))?;

        reader.flush(&mut buffer);
        let overruns = reader.overruns();
        engine.return_tap(reader);

        if overruns > 0 {
            warn!("recording dropped {overruns} blocks; the take has gaps");
        }
        info!(
            "recording finished: {} frames ({:.2}s) at {} Hz",
            buffer.frames(),
            buffer.seconds(),
            buffer.sample_rate()
        );
        buffer.into_wav()
    }

    /// Length of the current take on the audio clock, given the clock's `now`.
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.take.as_ref().map(|t| (now - t.started_at).max(0.0))
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("armed", &self.is_armed())
            .finish()
    }
}
