//! Observers for training runs
//!
//! Observers allow composable data collection during training without coupling
//! the driver to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    engine::Position,
    ports::TrialObserver,
    tictactoe::{GameOutcome, Player},
};

/// Observation of a single move during a trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    pub step: usize,
    /// Board key before the move
    pub board: String,
    pub player: Player,
    pub mv: usize,
    /// `(move, probability)` for every legal move when the move was chosen
    pub policy: Vec<(usize, f64)>,
    /// X value of the position when the move was chosen
    pub value: f64,
}

/// Complete observation of a trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub trial: usize,
    /// `"X"`, `"O"` or `"draw"`; `"aborted"` for abandoned trials
    pub outcome: String,
    pub steps: Vec<StepObservation>,
    pub total_moves: usize,
}

fn outcome_label(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Win(player) => player.to_string(),
        GameOutcome::Draw => "draw".to_string(),
    }
}

/// Progress bar observer - Shows training progress
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl TrialObserver for ProgressObserver {
    fn on_training_start(&mut self, total_trials: usize) -> Result<()> {
        let pb = ProgressBar::new(total_trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_trial_end(&mut self, trial: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(trial as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_trial_aborted(&mut self, trial: usize, _reason: &str) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(trial as u64 + 1);
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and trial lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    aborted: usize,
    move_counts: Vec<usize>,
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_trials: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub aborted: usize,
    pub draw_rate: f64,
    pub avg_trial_length: f64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_trials(&self) -> usize {
        self.move_counts.len()
    }

    /// Share of completed trials that were drawn
    pub fn draw_rate(&self) -> f64 {
        let completed = self.x_wins + self.o_wins + self.draws;
        if completed == 0 {
            0.0
        } else {
            self.draws as f64 / completed as f64
        }
    }

    /// Average number of moves per trial
    pub fn avg_trial_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_trials: self.total_trials(),
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            aborted: self.aborted,
            draw_rate: self.draw_rate(),
            avg_trial_length: self.avg_trial_length(),
        }
    }
}

impl TrialObserver for MetricsObserver {
    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(&mut self, _trial: usize, _step: usize, _position: &Position, _mv: usize) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_trial_end(&mut self, _trial: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        Ok(())
    }

    fn on_trial_aborted(&mut self, _trial: usize, _reason: &str) -> Result<()> {
        self.aborted += 1;
        Ok(())
    }
}

/// JSONL observer - Writes one JSON line per trial
pub struct JsonlObserver<W: Write + Send = BufWriter<File>> {
    writer: W,
    current_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonlObserver<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            current_steps: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_observation(&mut self, trial: usize, outcome: String) -> Result<()> {
        let observation = Observation {
            trial,
            outcome,
            total_moves: self.current_steps.len(),
            steps: std::mem::take(&mut self.current_steps),
        };
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> TrialObserver for JsonlObserver<W> {
    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_move(&mut self, _trial: usize, step: usize, position: &Position, mv: usize) -> Result<()> {
        let Some(player) = position.to_move() else {
            return Ok(());
        };
        self.current_steps.push(StepObservation {
            step,
            board: position.key().to_string(),
            player,
            mv,
            policy: position
                .legal_moves()
                .iter()
                .copied()
                .zip(position.policy().iter().copied())
                .collect(),
            value: position.value().x(),
        });
        Ok(())
    }

    fn on_trial_end(&mut self, trial: usize, outcome: GameOutcome) -> Result<()> {
        self.write_observation(trial, outcome_label(outcome))
    }

    fn on_trial_aborted(&mut self, trial: usize, _reason: &str) -> Result<()> {
        self.write_observation(trial, "aborted".to_string())
    }
}
