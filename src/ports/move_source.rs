//! Move source port - where a non-engine player's moves come from

use crate::{Result, engine::Position};

/// Supplier of moves for an external player, typically a human at a terminal.
pub trait MoveSource {
    /// Ask for a move in `position`.
    ///
    /// The driver validates the answer and calls [`Self::reject_move`] before
    /// asking again when it is not legal.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InputClosed`] when no more input is available.
    fn request_move(&mut self, position: &Position) -> Result<usize>;

    /// Tell the source its last answer was not a legal move.
    fn reject_move(&mut self, _position: &Position, _mv: usize) -> Result<()> {
        Ok(())
    }

    /// Show the finished game.
    fn show_result(&mut self, _position: &Position) -> Result<()> {
        Ok(())
    }
}
