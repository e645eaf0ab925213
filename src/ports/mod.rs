//! Ports (trait boundaries) for external dependencies.
//!
//! The engine owns these traits; adapters in [`crate::adapters`] and
//! [`crate::pipeline`] implement them.

pub mod move_source;
pub mod observer;
pub mod snapshot;
pub mod stats_store;

pub use move_source::MoveSource;
pub use observer::TrialObserver;
pub use snapshot::{Snapshot, SnapshotRepository};
pub use stats_store::{StatsRecord, StatsStore};
