//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, Player};

/// Canonical key of a board: one symbol per cell (`-`, `X`, `O`) in board
/// order.
///
/// The key names the board in the in-memory table and is also the file stem
/// of its persisted statistics.
///
/// # Examples
///
/// ```
/// use selfplay::tictactoe::Board;
/// use selfplay::types::BoardKey;
///
/// let key = Board::new().key();
/// assert_eq!(key.as_str(), "---------");
///
/// let parsed = BoardKey::parse("XO--X---O").unwrap();
/// assert_eq!(parsed.to_board().key(), parsed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardKey(String);

impl BoardKey {
    /// Parse and validate a key.
    ///
    /// # Errors
    ///
    /// Returns an error unless the string holds exactly 9 cell symbols.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let board = Board::from_key(s)?;
        Ok(Self::from_board(&board))
    }

    pub(crate) fn from_board(board: &Board) -> Self {
        BoardKey(board.cells().iter().map(|c| c.to_char()).collect())
    }

    /// Board described by this key.
    pub fn to_board(&self) -> Board {
        // Keys are only built from boards or validated strings.
        Board::from_key(&self.0).unwrap_or_default()
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for BoardKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scalar per player, stored as `[X, O]`.
///
/// Values in this crate are zero-sum: the O entry is the negation of the X
/// entry. Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuePair([f64; 2]);

impl ValuePair {
    pub const ZERO: ValuePair = ValuePair([0.0, 0.0]);

    pub const fn new(x: f64, o: f64) -> Self {
        ValuePair([x, o])
    }

    /// Pair with `x` for X and `-x` for O.
    pub fn zero_sum(x: f64) -> Self {
        ValuePair([x, -x])
    }

    /// Value seen from `player`'s side.
    pub fn for_player(&self, player: Player) -> f64 {
        self.0[player.index()]
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn o(&self) -> f64 {
        self.0[1]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<[f64; 2]> for ValuePair {
    fn from(values: [f64; 2]) -> Self {
        ValuePair(values)
    }
}

impl fmt::Display for ValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.0[0], self.0[1])
    }
}

/// Identity of a position inside a [`crate::engine::StateRegistry`].
///
/// Equal boards always resolve to the same id within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionId(pub(crate) usize);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tolerance on the sum of a probability distribution.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-4;
