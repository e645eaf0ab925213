//! Train command - run self-play trials

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::EngineArgs,
        output::{format_number, print_kv, print_section},
    },
    pipeline::{JsonlObserver, MetricsObserver, ProgressObserver, TrainingResult},
};

#[derive(Parser, Debug)]
#[command(about = "Run self-play training trials")]
pub struct TrainArgs {
    /// Number of trials
    #[arg(long, short = 'n', default_value_t = 200)]
    pub trials: usize,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Log tallies every K trials
    #[arg(long)]
    pub log_every: Option<usize>,

    /// Write one JSON line per trial to this file
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Keep statistics in memory only
    #[arg(long)]
    pub ephemeral: bool,
}

pub fn execute(args: TrainArgs, app: App) -> Result<()> {
    let mut config = args.engine.apply(app.config().clone());
    if let Some(log_every) = args.log_every {
        config = config.with_log_every(log_every);
    }
    let app = app.reconfigure(config)?;

    let mut registry = if args.ephemeral {
        app.ephemeral_registry()
    } else {
        app.registry()
    };

    let mut driver = app
        .driver(args.trials)?
        .with_observer(Box::new(MetricsObserver::new()));
    if !args.no_progress {
        driver = driver.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observations file {}", path.display()))?;
        driver = driver.with_observer(Box::new(observer));
    }

    let result = driver.run(&mut registry).context("Training failed")?;
    print_result(&app, &result, args.ephemeral);

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn print_result(app: &App, result: &TrainingResult, ephemeral: bool) {
    print_section("Training complete");
    print_kv("Trials", &format_number(result.trials));
    print_kv("X wins", &format_number(result.x_wins));
    print_kv("O wins", &format_number(result.o_wins));
    print_kv("Draws", &format_number(result.draws));
    print_kv("Draw rate", &format!("{:.1}%", result.draw_rate() * 100.0));
    if result.aborted > 0 {
        print_kv("Aborted", &format_number(result.aborted));
    }
    print_kv("Positions", &format_number(result.positions));
    if !ephemeral {
        print_kv("State directory", &app.states_dir().display().to_string());
    }
}
