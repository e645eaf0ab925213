//! Records of played trials

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a board, or `None` while the game is still running.
    pub fn of(board: &Board) -> Option<Self> {
        match board.winner() {
            Some(winner) => Some(GameOutcome::Win(winner)),
            None if board.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Move history of one trial, from the empty board to a terminal board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrialRecord {
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl TrialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: usize, player: Player) {
        self.moves.push(Move { position, player });
    }

    /// Replay the moves from the empty board.
    ///
    /// # Errors
    ///
    /// Returns error if a recorded move targets an occupied cell.
    pub fn final_board(&self) -> Result<Board, crate::Error> {
        self.moves
            .iter()
            .try_fold(Board::new(), |board, m| board.with_move(m.position, m.player))
    }
}
