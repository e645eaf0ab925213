//! Observer port - hooks into the trial loop
//!
//! Observers collect progress, metrics or traces without the driver knowing
//! about output formats.

use crate::{Result, engine::Position, tictactoe::GameOutcome};

/// Observer of a training run.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_trials)` once
/// 2. For each trial:
///    - `on_trial_start(trial)`
///    - `on_move(...)` for every move, before it is applied
///    - `on_trial_end(trial, outcome)`, or `on_trial_aborted(trial, reason)`
///      when the trial was abandoned
/// 3. `on_training_end()` once
///
/// Trial indices are 0-based.
///
/// # Examples
///
/// ```
/// use selfplay::{ports::TrialObserver, tictactoe::GameOutcome};
///
/// struct DrawCounter(usize);
///
/// impl TrialObserver for DrawCounter {
///     fn on_trial_end(&mut self, _trial: usize, outcome: GameOutcome) -> selfplay::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.0 += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait TrialObserver: Send {
    fn on_training_start(&mut self, _total_trials: usize) -> Result<()> {
        Ok(())
    }

    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        Ok(())
    }

    /// Called with the position the move is made from and its policy as it
    /// stood when the move was chosen.
    fn on_move(&mut self, _trial: usize, _step: usize, _position: &Position, _mv: usize) -> Result<()> {
        Ok(())
    }

    fn on_trial_end(&mut self, _trial: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    fn on_trial_aborted(&mut self, _trial: usize, _reason: &str) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
