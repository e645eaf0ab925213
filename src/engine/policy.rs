//! Move distributions over a position's legal moves
//!
//! Every function here works on slices aligned with a position's legal
//! moves: entry `i` of a policy belongs to `legal_moves[i]`, and entry `i` of
//! `next_values` is the value of the position reached by that move.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::Player,
    types::{DISTRIBUTION_TOLERANCE, ValuePair},
};

/// How a revision rebuilds a position's policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyScheme {
    /// `greedy * (1 - explore_factor) + uniform * explore_factor`
    Blended { explore_factor: f64 },
    /// Successor values raised to a power that grows with the revision count
    Weighted,
}

impl PolicyScheme {
    pub fn blended(explore_factor: f64) -> Result<Self> {
        check_explore_factor(explore_factor)?;
        Ok(PolicyScheme::Blended { explore_factor })
    }
}

impl Default for PolicyScheme {
    fn default() -> Self {
        PolicyScheme::Blended {
            explore_factor: 0.5,
        }
    }
}

/// Reject explore factors outside `[0, 1]`.
pub fn check_explore_factor(explore_factor: f64) -> Result<()> {
    if (0.0..=1.0).contains(&explore_factor) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("explore factor {explore_factor} must lie in [0, 1]"),
        })
    }
}

/// `1/n` for each of `n` moves.
pub fn uniform_policy(move_count: usize) -> Vec<f64> {
    if move_count == 0 {
        return Vec::new();
    }
    vec![1.0 / move_count as f64; move_count]
}

/// Split probability evenly among the moves whose successor is best for
/// `perspective`.
///
/// Ties are kept as ties; randomness only enters when a move is sampled.
pub fn greedy_policy(next_values: &[ValuePair], perspective: Player) -> Vec<f64> {
    let values: Vec<f64> = next_values
        .iter()
        .map(|v| v.for_player(perspective))
        .collect();
    let Some(max_val) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };

    let maximizers = values.iter().filter(|&&v| v == max_val).count();
    let share = 1.0 / maximizers as f64;
    values
        .iter()
        .map(|&v| if v == max_val { share } else { 0.0 })
        .collect()
}

/// Elementwise `greedy * (1 - explore_factor) + uniform * explore_factor`.
pub fn blend(greedy: &[f64], uniform: &[f64], explore_factor: f64) -> Vec<f64> {
    greedy
        .iter()
        .zip(uniform)
        .map(|(g, u)| g * (1.0 - explore_factor) + u * explore_factor)
        .collect()
}

/// Weight each move by `(v + 1)^sqrt(revisions + 1)`, `v` being the
/// successor's value for `perspective`, then normalize.
///
/// Sharpens towards the best moves as a position is revised more often.
/// Falls back to uniform when every successor is a certain loss.
pub fn weighted_policy(next_values: &[ValuePair], perspective: Player, revisions: u64) -> Vec<f64> {
    let exponent = ((revisions + 1) as f64).sqrt();
    let weights: Vec<f64> = next_values
        .iter()
        .map(|v| (v.for_player(perspective) + 1.0).max(0.0).powf(exponent))
        .collect();
    let norm: f64 = weights.iter().sum();
    if !norm.is_finite() || norm <= 0.0 {
        return uniform_policy(next_values.len());
    }
    weights.iter().map(|w| w / norm).collect()
}

/// Check that `policy` is a probability distribution: every entry in
/// `[0, 1]` and a total within [`DISTRIBUTION_TOLERANCE`] of one.
pub fn validate_distribution(policy: &[f64]) -> Result<()> {
    let violation = |reason: String| Error::PolicyInvariant {
        reason,
        policy: policy.to_vec(),
    };

    if policy.is_empty() {
        return Err(violation("empty distribution".to_string()));
    }
    if let Some(p) = policy.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(violation(format!("entry {p} outside [0, 1]")));
    }
    let total: f64 = policy.iter().sum();
    if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(violation(format!("entries sum to {total}")));
    }
    Ok(())
}

/// Walk the cumulative distribution and return the first move whose
/// cumulative probability reaches `ticket` (a draw from `[0, 1)`).
///
/// Returns the last move when rounding leaves the total just short of
/// `ticket`, and `None` when there are no moves.
pub fn sample_move(moves: &[usize], policy: &[f64], ticket: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (&mv, &p) in moves.iter().zip(policy) {
        cumulative += p;
        if ticket <= cumulative {
            return Some(mv);
        }
    }
    moves.last().copied()
}
