use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{RecvTimeoutError, Sender};
use log::{debug, warn};

use crate::{
    engine::{clock::FrameClock, synth::VoiceSynth},
    sequencing::{EventSender, SnapshotFeed, Transport},
    Error, Result,
};

const THREAD_NAME: &str = "beatgrid-scheduler";

/// A running look-ahead loop.
///
/// The thread owns its [`Transport`] and hands it back on `stop`, so the
/// cursor survives for inspection. The stop channel doubles as the wake
/// timer: each pass ends with a `recv_timeout(lookahead)`.
pub struct SchedulerHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<Transport>,
}

impl SchedulerHandle {
    pub fn spawn(
        mut transport: Transport,
        mut feed: SnapshotFeed,
        mut synth: VoiceSynth,
        clock: FrameClock,
        events: EventSender,
        lookahead: Duration,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let thread = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                debug!("scheduler running every {lookahead:?}");
                loop {
                    let now = clock.now();
                    let snapshot = feed.latest();
                    transport.schedule(now, snapshot, &mut synth, &events);

                    match stop_rx.recv_timeout(lookahead) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                transport.stop();
                transport
            })
            .map_err(|source| Error::Spawn {
                name: THREAD_NAME,
                source,
            })?;

        Ok(Self { stop_tx, thread })
    }

    /// Stop the loop and wait for it. Nothing is scheduled after this returns.
    pub fn stop(self) -> Result<Transport> {
        let _ = self.stop_tx.send(());
        self.thread.join().map_err(|_| {
            warn!("scheduler thread panicked");
            Error::WorkerPanicked(THREAD_NAME)
        })
    }
}
