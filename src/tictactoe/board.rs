//! Board representation and basic operations
//!
//! Cells are indexed row by row:
//!
//! ```text
//! 0|1|2
//! -----
//! 3|4|5
//! -----
//! 6|7|8
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::BoardKey;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// One-character symbol used in board keys and file names.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. `X` always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Slot of this player in a per-player pair (X = 0, O = 1).
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// Player whose turn it is after `plies` moves.
    pub fn for_ply(plies: usize) -> Player {
        if plies.is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable 3x3 grid of cells.
///
/// The side to move is not stored: it is derived from the number of occupied
/// cells, so two boards are equal exactly when their cells are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create the empty starting board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Parse a board from its key form, e.g. `"XO--X---O"`.
    ///
    /// Whitespace is ignored. Piece counts are not checked: any arrangement
    /// of cells is a valid board.
    ///
    /// # Errors
    ///
    /// Returns error if there are not exactly 9 cells or a character is not a
    /// valid cell symbol.
    pub fn from_key(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                key: s.to_string(),
                expected: BOARD_SIZE,
                got: chars.len(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                key: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Rebuild a board from per-cell owners, as stored in statistics files.
    pub fn from_owners(owners: &[Option<Player>]) -> Result<Self, crate::Error> {
        if owners.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                key: format!("{owners:?}"),
                expected: BOARD_SIZE,
                got: owners.len(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (cell, owner) in cells.iter_mut().zip(owners) {
            *cell = owner.map_or(Cell::Empty, Player::to_cell);
        }
        Ok(Board { cells })
    }

    /// Per-cell owners (`None` for empty cells).
    pub fn owners(&self) -> Vec<Option<Player>> {
        self.cells.iter().map(|c| c.to_player()).collect()
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one. X is checked before O.
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Place `player` on `pos` and return the new board.
    #[must_use = "with_move returns a new board; the original is unchanged"]
    pub fn with_move(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        if pos >= BOARD_SIZE || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove {
                position: pos,
                board: self.key().into_string(),
            });
        }

        let mut next = *self;
        next.cells[pos] = player.to_cell();
        Ok(next)
    }

    /// Canonical key: one symbol per cell, in board order.
    pub fn key(&self) -> BoardKey {
        BoardKey::from_board(self)
    }

    /// Symbols of one row, used by the console views.
    pub fn row(&self, row: usize) -> [char; 3] {
        let start = row * 3;
        [
            self.cells[start].to_char(),
            self.cells[start + 1].to_char(),
            self.cells[start + 2].to_char(),
        ]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let [a, b, c] = self.row(row);
            write!(f, " {a} | {b} | {c} ")?;
            if row < 2 {
                writeln!(f)?;
                writeln!(f, "-----------")?;
            }
        }
        Ok(())
    }
}
