//! Self-play policy iteration for tic-tac-toe
//!
//! This crate provides:
//! - A tic-tac-toe board model with move validation and win detection
//! - An arena registry holding one canonical position per board
//! - Blended greedy/uniform (and revision-weighted) policy revision with a
//!   one-ply value backup
//! - Per-position statistics persisted as JSON files, reloaded on first use
//! - A trial driver with pluggable observers and move sources
//!
//! # Examples
//!
//! ```
//! use selfplay::{adapters::NullStore, engine::StateRegistry, pipeline::{TrainingConfig, TrialDriver}};
//!
//! let mut registry = StateRegistry::new(NullStore);
//! let mut driver = TrialDriver::new(TrainingConfig { trials: 20, seed: Some(1), ..Default::default() })?;
//! let result = driver.run(&mut registry)?;
//! assert_eq!(result.x_wins + result.o_wins + result.draws, 20);
//! # Ok::<(), selfplay::Error>(())
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod types;

pub use engine::{PolicyScheme, Position, StateRegistry};
pub use error::{Error, Result};
pub use types::{BoardKey, PositionId, ValuePair};
