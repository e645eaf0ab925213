//! selfplay CLI - self-play policy iteration for tic-tac-toe
//!
//! Train the engine against itself, play against it, and inspect or move
//! the statistics it keeps on disk.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use selfplay::{
    app::{App, Home},
    cli::{commands, logging},
};

#[derive(Parser)]
#[command(name = "selfplay")]
#[command(version, about = "Self-play policy iteration for tic-tac-toe", long_about = None)]
struct Cli {
    /// Directory holding config.json and states/ (default: $SELFPLAY_HOME or ./.selfplay)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write debug logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run self-play training trials
    Train(commands::train::TrainArgs),

    /// Play against the engine on the terminal
    Play(commands::play::PlayArgs),

    /// Show the learned statistics of a board
    Show(commands::show::ShowArgs),

    /// Delete all persisted statistics
    Clear(commands::clear::ClearArgs),

    /// Write stored statistics to a MessagePack snapshot
    Export(commands::snapshot::ExportArgs),

    /// Load a MessagePack snapshot into the state directory
    Import(commands::snapshot::ImportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose), cli.log_file.as_deref())?;

    let app = App::open(Home::resolve(cli.home.as_deref()))?;
    log::debug!("home directory {}", app.home().root().display());

    match cli.command {
        Commands::Train(args) => commands::train::execute(args, app),
        Commands::Play(args) => commands::play::execute(args, app),
        Commands::Show(args) => commands::show::execute(args, app),
        Commands::Clear(args) => commands::clear::execute(args, app),
        Commands::Export(args) => commands::snapshot::export(args, app),
        Commands::Import(args) => commands::snapshot::import(args, app),
    }
}
