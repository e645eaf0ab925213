//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BOARD_SIZE, Board, Cell, Player};
pub use game::{GameOutcome, Move, TrialRecord};
pub use lines::{LineAnalyzer, WINNING_LINES};
