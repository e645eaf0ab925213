//! Terminal rewards and the one-ply value backup

use crate::{tictactoe::Player, types::ValuePair};

/// Reward pair for a winner: `(1, -1)` for X, `(-1, 1)` for O, `(0, 0)`
/// for a draw or an unfinished game.
pub fn reward(winner: Option<Player>) -> ValuePair {
    match winner {
        Some(Player::X) => ValuePair::new(1.0, -1.0),
        Some(Player::O) => ValuePair::new(-1.0, 1.0),
        None => ValuePair::ZERO,
    }
}

/// Policy-weighted expectation of the successors' X values, returned as a
/// zero-sum pair.
///
/// This is a single expectation step, not policy evaluation to a fixed
/// point: successors contribute whatever value they hold right now, and
/// information travels backwards one ply per revisit.
pub fn backup_value(policy: &[f64], next_values: &[ValuePair]) -> ValuePair {
    let expected: f64 = policy
        .iter()
        .zip(next_values)
        .map(|(p, v)| p * v.x())
        .sum();
    ValuePair::zero_sum(expected)
}
