//! Pattern storage and the look-ahead transport that plays it.

/// Cosmetic cursor and pad events.
pub mod events;
/// The 8 × N step grid.
pub mod grid;
/// Latest-wins hand-off of kit, grid and tempo to the scheduler.
pub mod snapshot;
/// Step cursor and look-ahead scheduling pass.
pub mod transport;

pub use events::{EventSender, TransportEvent};
pub use grid::{bar_of, PatternGrid};
pub use snapshot::{Snapshot, SnapshotFeed, SnapshotPublisher};
pub use transport::{step_duration, PlayState, Transport, TriggerSink};
