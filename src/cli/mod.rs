//! Command-line interface for training, playing and inspecting the engine.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
