//! Subcommands of the `selfplay` binary

pub mod clear;
pub mod play;
pub mod show;
pub mod snapshot;
pub mod train;
