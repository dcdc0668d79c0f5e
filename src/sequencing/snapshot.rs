use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::{kit::Kit, sequencing::grid::PatternGrid};

/// Immutable view of everything the scheduler reads during one pass.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub kit: Arc<Kit>,
    pub grid: Arc<PatternGrid>,
    pub bpm: f64,
}

/// Writer side: the machine publishes a fresh snapshot after every edit.
///
/// The channel holds a single slot. Publishing first throws away a snapshot
/// the scheduler has not picked up yet, so the reader only ever sees the
/// latest one.
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    tx: Sender<Snapshot>,
    stale: Receiver<Snapshot>,
}

/// Reader side, owned by the scheduler thread.
#[derive(Debug)]
pub struct SnapshotFeed {
    rx: Receiver<Snapshot>,
    current: Snapshot,
}

pub fn channel(initial: Snapshot) -> (SnapshotPublisher, SnapshotFeed) {
    let publisher = SnapshotPublisher::new();
    let feed = publisher.subscribe(initial);
    (publisher, feed)
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let (tx, stale) = crossbeam_channel::bounded(1);
        Self { tx, stale }
    }

    pub fn publish(&self, snapshot: Snapshot) {
        while self.stale.try_recv().is_ok() {}
        // Single writer: the slot was just emptied, so this only fails once
        // the feed is gone, and then nobody cares.
        let _ = self.tx.try_send(snapshot);
    }

    /// A reader starting from `current`. Only one feed should be live at a
    /// time; each scheduler run subscribes afresh.
    pub fn subscribe(&self, current: Snapshot) -> SnapshotFeed {
        while self.stale.try_recv().is_ok() {}
        SnapshotFeed {
            rx: self.stale.clone(),
            current,
        }
    }
}

impl SnapshotFeed {
    /// Pick up the newest published snapshot, if any, and return it.
    pub fn latest(&mut self) -> &Snapshot {
        if let Some(snapshot) = self.rx.try_iter().last() {
            self.current = snapshot;
        }
        &self.current
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}
