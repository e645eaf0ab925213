//! Export and import commands - whole-table snapshots

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(about = "Write every stored position to a MessagePack snapshot")]
pub struct ExportArgs {
    /// Snapshot file to create
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Load a MessagePack snapshot into the state directory")]
pub struct ImportArgs {
    /// Snapshot file to read
    #[arg(long, short = 'i')]
    pub input: PathBuf,
}

pub fn export(args: ExportArgs, app: App) -> Result<()> {
    let mut registry = app.registry();
    let stored = registry.hydrate_all()?;
    let snapshot = registry.snapshot();

    app.snapshot_repository()
        .save(&snapshot, &args.output)
        .with_context(|| format!("Failed to write snapshot {}", args.output.display()))?;
    println!(
        "Exported {} of {stored} stored positions to {}",
        snapshot.records.len(),
        args.output.display()
    );
    Ok(())
}

pub fn import(args: ImportArgs, app: App) -> Result<()> {
    let snapshot = app
        .snapshot_repository()
        .load(&args.input)
        .with_context(|| format!("Failed to read snapshot {}", args.input.display()))?;

    let mut registry = app.registry();
    let applied = registry.restore(&snapshot)?;
    println!(
        "Imported {applied} of {} positions into {}",
        snapshot.records.len(),
        app.states_dir().display()
    );
    Ok(())
}
