//! A board together with its derived fields and learned statistics

use std::fmt;

use super::{
    policy::{uniform_policy, validate_distribution},
    value::reward,
};
use crate::{
    Error, Result,
    ports::StatsRecord,
    tictactoe::{Board, GameOutcome, Player},
    types::{BoardKey, ValuePair},
};

/// One reachable board and what has been learned about it.
///
/// Derived fields are computed once when the position is created. Learned
/// statistics (`policy`, `value`, `revision_count`) change only through
/// [`crate::engine::StateRegistry::revise`].
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    key: BoardKey,
    legal_moves: Vec<usize>,
    ply_count: usize,
    winner: Option<Player>,
    terminal: bool,
    reward: ValuePair,
    policy: Vec<f64>,
    value: ValuePair,
    revision_count: u64,
}

impl Position {
    /// Position with default statistics: uniform policy, reward as value.
    pub fn new(board: Board) -> Self {
        let winner = board.winner();
        let terminal = winner.is_some() || board.is_full();
        let legal_moves = if terminal {
            Vec::new()
        } else {
            board.empty_positions()
        };
        let reward = reward(winner);

        Position {
            key: board.key(),
            policy: uniform_policy(legal_moves.len()),
            value: reward,
            ply_count: board.occupied_count(),
            board,
            legal_moves,
            winner,
            terminal,
            reward,
            revision_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn key(&self) -> &BoardKey {
        &self.key
    }

    /// Empty cells in ascending order; empty once the game is over.
    pub fn legal_moves(&self) -> &[usize] {
        &self.legal_moves
    }

    pub fn is_legal(&self, mv: usize) -> bool {
        self.legal_moves.contains(&mv)
    }

    pub fn ply_count(&self) -> usize {
        self.ply_count
    }

    /// Player to move; `None` when terminal.
    pub fn to_move(&self) -> Option<Player> {
        if self.terminal {
            None
        } else {
            Some(Player::for_ply(self.ply_count))
        }
    }

    /// Player who made the previous move; `None` on the empty board.
    pub fn last_to_play(&self) -> Option<Player> {
        self.ply_count.checked_sub(1).map(Player::for_ply)
    }

    /// Winner, if any. `None` means draw or ongoing; see [`Self::is_terminal`].
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.terminal {
            return None;
        }
        Some(match self.winner {
            Some(player) => GameOutcome::Win(player),
            None => GameOutcome::Draw,
        })
    }

    pub fn reward(&self) -> ValuePair {
        self.reward
    }

    /// Probabilities aligned with [`Self::legal_moves`].
    pub fn policy(&self) -> &[f64] {
        &self.policy
    }

    pub fn value(&self) -> ValuePair {
        self.value
    }

    pub fn revision_count(&self) -> u64 {
        self.revision_count
    }

    /// Probability of playing `mv`, or `None` if it is not legal.
    pub fn probability_of(&self, mv: usize) -> Option<f64> {
        self.legal_moves
            .iter()
            .position(|&m| m == mv)
            .map(|i| self.policy[i])
    }

    /// Check that `record` can seed this position.
    pub(crate) fn check_record(&self, record: &StatsRecord) -> Result<()> {
        let mismatch = |reason: String| Error::MismatchedRecord {
            key: self.key.to_string(),
            reason,
        };
        if record.policy.len() != self.legal_moves.len() {
            return Err(mismatch(format!(
                "policy has {} entries for {} legal moves",
                record.policy.len(),
                self.legal_moves.len()
            )));
        }
        if !record.board.is_empty() && record.board() != Some(self.board) {
            return Err(mismatch("board field names a different board".to_string()));
        }
        if !record.value.is_finite() || record.policy.iter().any(|p| !p.is_finite()) {
            return Err(mismatch("non-finite statistics".to_string()));
        }
        if record.value.x() != -record.value.o() {
            return Err(mismatch(format!("value {} is not zero-sum", record.value)));
        }
        if !record.policy.is_empty()
            && let Err(err) = validate_distribution(&record.policy)
        {
            return Err(mismatch(err.to_string()));
        }
        Ok(())
    }

    /// Replace the learned statistics with those of `record`.
    pub(crate) fn seed_from(&mut self, record: &StatsRecord) {
        self.policy = record.policy.clone();
        self.value = record.value;
        self.revision_count = record.revision_count;
    }

    pub(crate) fn apply_revision(&mut self, policy: Vec<f64>, value: ValuePair) {
        self.policy = policy;
        self.value = value;
        self.revision_count += 1;
    }

    /// Everything worth writing to the store for this position.
    pub fn to_record(&self) -> StatsRecord {
        StatsRecord {
            actions: self.legal_moves.clone(),
            board: self.board.owners(),
            policy: self.policy.clone(),
            value: self.value,
            revision_count: self.revision_count,
            reward: self.reward,
            terminal: self.terminal,
            winner: self.winner,
            last_to_play: self.last_to_play(),
            next_to_play: self.to_move(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.to_move() {
            Some(player) => writeln!(f, "{player} to play")?,
            None => match self.winner {
                Some(player) => writeln!(f, "{player} wins")?,
                None => writeln!(f, "draw")?,
            },
        }
        write!(
            f,
            "value {} after {} revisions",
            self.value, self.revision_count
        )
    }
}
