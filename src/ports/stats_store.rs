//! Stats store port - persistence of per-position learned statistics.
//!
//! Each board has at most one stored record, addressed by its canonical
//! [`BoardKey`]. The store is a best-effort memo: records are independent,
//! writes overwrite unconditionally, and nothing is transactional.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    tictactoe::{Board, Player},
    types::{BoardKey, ValuePair},
};

/// Learned statistics of one position, together with the derived fields
/// that make a stored file readable on its own.
///
/// Only `policy`, `value` and `revision_count` are read back when a position
/// is hydrated; the remaining fields are informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Legal moves, aligned with `policy`
    #[serde(default)]
    pub actions: Vec<usize>,
    /// Cell owners in board order
    #[serde(default)]
    pub board: Vec<Option<Player>>,
    pub policy: Vec<f64>,
    pub value: ValuePair,
    pub revision_count: u64,
    #[serde(default)]
    pub reward: ValuePair,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default)]
    pub winner: Option<Player>,
    #[serde(default)]
    pub last_to_play: Option<Player>,
    #[serde(default)]
    pub next_to_play: Option<Player>,
}

impl StatsRecord {
    /// Board the record describes, when the `board` field is present.
    pub fn board(&self) -> Option<Board> {
        Board::from_owners(&self.board).ok()
    }
}

/// Port for loading and saving per-board statistics.
///
/// # Examples
///
/// ```
/// use selfplay::adapters::InMemoryStore;
/// use selfplay::ports::StatsStore;
/// use selfplay::tictactoe::Board;
///
/// let store = InMemoryStore::new();
/// assert!(store.load(&Board::new().key())?.is_none());
/// # Ok::<(), selfplay::Error>(())
/// ```
pub trait StatsStore {
    /// Load the record stored for `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored. A record that cannot be
    /// parsed is discarded and also reported as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than a missing record.
    fn load(&self, key: &BoardKey) -> Result<Option<StatsRecord>>;

    /// Store `record` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, key: &BoardKey, record: &StatsRecord) -> Result<()>;

    /// Remove the record for `key`, if any.
    fn discard(&self, key: &BoardKey) -> Result<()>;

    /// Keys of all stored records, sorted.
    fn keys(&self) -> Result<Vec<BoardKey>>;

    /// Remove every stored record and return how many were removed.
    fn clear(&self) -> Result<usize>;
}
