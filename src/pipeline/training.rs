//! Self-play trial driver

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    engine::{PolicyScheme, Position, StateRegistry, check_explore_factor},
    ports::{MoveSource, TrialObserver},
    tictactoe::{GameOutcome, Player, TrialRecord},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of trials to play
    pub trials: usize,

    /// How each revision rebuilds a policy
    pub scheme: PolicyScheme,

    /// Random seed
    pub seed: Option<u64>,

    /// Log aggregate tallies every this many trials
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            trials: 200,
            scheme: PolicyScheme::default(),
            seed: None,
            log_every: 200,
        }
    }
}

impl TrainingConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero logging interval or
    /// an explore factor outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.log_every == 0 {
            return Err(Error::InvalidConfiguration {
                message: "log interval must be a positive integer".to_string(),
            });
        }
        if let PolicyScheme::Blended { explore_factor } = self.scheme {
            check_explore_factor(explore_factor)?;
        }
        Ok(())
    }
}

/// Who picks the moves for one side.
pub enum Controller {
    /// Sample from the position's policy
    Engine,
    /// Ask an outside source, typically a person
    External(Box<dyn MoveSource>),
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Trials attempted, aborted ones included
    pub trials: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Trials abandoned after a policy invariant violation
    pub aborted: usize,
    /// Positions known to the registry at the end of the run
    pub positions: usize,
}

impl TrainingResult {
    /// Trials that reached a terminal position.
    pub fn completed(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    pub fn draw_rate(&self) -> f64 {
        match self.completed() {
            0 => 0.0,
            n => self.draws as f64 / n as f64,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

#[derive(Debug, Default)]
struct Tally {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    aborted: usize,
}

impl Tally {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Plays trials against a [`StateRegistry`].
///
/// Every trial starts from the empty board and repeats revise, choose,
/// apply until the position is terminal. Both sides are driven by the
/// engine unless a [`Controller::External`] is installed for one of them.
pub struct TrialDriver {
    config: TrainingConfig,
    observers: Vec<Box<dyn TrialObserver>>,
    controllers: [Controller; 2],
    rng: StdRng,
}

impl TrialDriver {
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Ok(Self {
            config,
            observers: Vec::new(),
            controllers: [Controller::Engine, Controller::Engine],
            rng,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Add an observer to the driver
    pub fn with_observer(mut self, observer: Box<dyn TrialObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Hand `player`'s moves to `controller`.
    pub fn with_controller(mut self, player: Player, controller: Controller) -> Self {
        self.controllers[player.index()] = controller;
        self
    }

    /// Play the configured number of trials.
    ///
    /// A trial that hits a policy invariant violation is abandoned and
    /// counted in [`TrainingResult::aborted`]; any other error ends the run.
    pub fn run(&mut self, registry: &mut StateRegistry) -> Result<TrainingResult> {
        let trials = self.config.trials;
        let mut tally = Tally::default();

        for observer in &mut self.observers {
            observer.on_training_start(trials)?;
        }

        for trial in 0..trials {
            for observer in &mut self.observers {
                observer.on_trial_start(trial)?;
            }

            match self.play_trial(registry, trial) {
                Ok(TrialRecord {
                    outcome: Some(outcome),
                    ..
                }) => {
                    tally.record(outcome);
                    for observer in &mut self.observers {
                        observer.on_trial_end(trial, outcome)?;
                    }
                }
                Ok(_) => log::warn!("trial {trial} stopped before a terminal position"),
                Err(err) if err.is_trial_fatal() => {
                    log::warn!("trial {trial} aborted: {err}");
                    tally.aborted += 1;
                    let reason = err.to_string();
                    for observer in &mut self.observers {
                        observer.on_trial_aborted(trial, &reason)?;
                    }
                }
                Err(err) => return Err(err),
            }

            let done = trial + 1;
            if done.is_multiple_of(self.config.log_every) {
                log::info!(
                    "{done} trials: {} X wins, {} O wins, {} draws",
                    tally.x_wins,
                    tally.o_wins,
                    tally.draws
                );
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        if tally.aborted > 0 {
            log::warn!("{} of {trials} trials aborted", tally.aborted);
        }

        Ok(TrainingResult {
            trials,
            x_wins: tally.x_wins,
            o_wins: tally.o_wins,
            draws: tally.draws,
            aborted: tally.aborted,
            positions: registry.len(),
        })
    }

    /// Play a single trial from the empty board.
    ///
    /// The terminal position is revised too, which leaves it unchanged.
    pub fn play_trial(&mut self, registry: &mut StateRegistry, trial: usize) -> Result<TrialRecord> {
        let mut id = registry.initial()?;
        let mut record = TrialRecord::new();

        loop {
            registry.revise_with(id, self.config.scheme)?;
            let position = registry.position(id)?;
            let Some(mover) = position.to_move() else {
                break;
            };

            let mv = match &mut self.controllers[mover.index()] {
                Controller::Engine => registry
                    .choose_move(id, &mut self.rng)?
                    .ok_or_else(|| Error::NoLegalMoves {
                        board: position.key().to_string(),
                    })?,
                Controller::External(source) => ask(source.as_mut(), position)?,
            };

            for observer in &mut self.observers {
                observer.on_move(trial, record.moves.len(), position, mv)?;
            }
            record.push(mv, mover);
            id = registry.apply_move(id, mv)?;
        }

        let position = registry.position(id)?;
        record.outcome = position.outcome();
        for controller in &mut self.controllers {
            if let Controller::External(source) = controller {
                source.show_result(position)?;
            }
        }
        log::debug!("trial {trial} finished: {:?}", record.outcome);
        Ok(record)
    }
}

/// Ask until `source` names a legal move.
fn ask(source: &mut dyn MoveSource, position: &Position) -> Result<usize> {
    loop {
        let mv = source.request_move(position)?;
        if position.is_legal(mv) {
            return Ok(mv);
        }
        log::debug!("rejected move {mv} on {}", position.key());
        source.reject_move(position, mv)?;
    }
}
