//! Show command - inspect one board's statistics

use anyhow::{Context, Result};
use clap::Parser;

use crate::{app::App, cli::output::render_position, types::BoardKey};

#[derive(Parser, Debug)]
#[command(about = "Show the learned statistics of a board")]
pub struct ShowArgs {
    /// Board as 9 symbols in board order, e.g. "X---O----" (`-` or `.` for empty)
    #[arg(default_value = "---------")]
    pub board: String,
}

pub fn execute(args: ShowArgs, app: App) -> Result<()> {
    let key = BoardKey::parse(&args.board)
        .with_context(|| format!("Invalid board '{}'", args.board))?;

    let mut registry = app.registry();
    let id = registry.get_or_create(key.to_board())?;
    let next_values = registry.next_values(id)?;
    let position = registry.position(id)?;

    println!("{}", render_position(position, &next_values));
    Ok(())
}
