//! Snapshot port - whole-table export and import of learned statistics.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::StatsRecord;
use crate::Result;

/// Copy of every revised position's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub records: Vec<StatsRecord>,
}

impl Snapshot {
    pub const VERSION: u32 = 1;

    pub fn new(records: Vec<StatsRecord>) -> Self {
        Self {
            version: Self::VERSION,
            records,
        }
    }
}

/// Port for writing and reading snapshots.
pub trait SnapshotRepository {
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialization fails.
    fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the file is missing or not a valid snapshot.
    fn load(&self, path: &Path) -> Result<Snapshot>;
}
