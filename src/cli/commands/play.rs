//! Play command - a person against the engine

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    adapters::ConsoleMoveSource,
    app::App,
    cli::config::EngineArgs,
    pipeline::Controller,
    tictactoe::{GameOutcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the engine on the terminal")]
pub struct PlayArgs {
    /// Side the person plays (x moves first)
    #[arg(long, default_value = "x", value_parser = parse_player_token)]
    pub human: Player,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    #[command(flatten)]
    pub engine: EngineArgs,
}

pub(crate) fn parse_player_token(value: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Player::X),
        "o" | "second" => Ok(Player::O),
        other => Err(anyhow!("invalid player '{other}' (expected 'x' or 'o')")),
    }
}

pub fn execute(args: PlayArgs, app: App) -> Result<()> {
    let config = args.engine.apply(app.config().clone());
    let app = app.reconfigure(config)?;
    let mut registry = app.registry();

    let mut driver = app.driver(args.games)?.with_controller(
        args.human,
        Controller::External(Box::new(ConsoleMoveSource::stdio())),
    );

    println!("You are {}. Cells are numbered 0-8, left to right, top to bottom.", args.human);
    for game in 0..args.games {
        let record = driver.play_trial(&mut registry, game)?;
        let verdict = match record.outcome {
            Some(GameOutcome::Win(winner)) if winner == args.human => "You win!",
            Some(GameOutcome::Win(_)) => "The engine wins.",
            Some(GameOutcome::Draw) => "Draw.",
            None => "Game abandoned.",
        };
        println!("{verdict}\n");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_token() {
        assert_eq!(parse_player_token("X").unwrap(), Player::X);
        assert_eq!(parse_player_token(" o ").unwrap(), Player::O);
        assert_eq!(parse_player_token("second").unwrap(), Player::O);
        assert!(parse_player_token("z").is_err());
    }
}
