//! Clear command - delete persisted statistics

use anyhow::{Context, Result};
use clap::Parser;

use crate::{app::App, ports::StatsStore};

#[derive(Parser, Debug)]
#[command(about = "Delete all persisted statistics")]
pub struct ClearArgs {}

pub fn execute(_args: ClearArgs, app: App) -> Result<()> {
    let dir = app.states_dir();
    let removed = app
        .stats_store()
        .clear()
        .with_context(|| format!("Failed to clear {}", dir.display()))?;
    println!("Removed {removed} state files from {}", dir.display());
    Ok(())
}
