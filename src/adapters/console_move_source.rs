//! Moves typed by a person at a terminal.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::{Result, engine::Position, error::Error, ports::MoveSource};

/// Reads one cell index (0-8) per line.
///
/// Lines that are not numbers are re-prompted here; numbers that are not
/// legal moves go back to the driver, which rejects them.
pub struct ConsoleMoveSource<R, W> {
    input: R,
    output: W,
}

impl ConsoleMoveSource<StdinLock<'static>, Stdout> {
    /// Source wired to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleMoveSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, position: &Position) -> Result<()> {
        let symbol = position.to_move().map_or('?', |p| p.symbol());
        writeln!(self.output, "{}", position.board())?;
        write!(self.output, "{symbol} move? ")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> MoveSource for ConsoleMoveSource<R, W> {
    fn request_move(&mut self, position: &Position) -> Result<usize> {
        loop {
            self.prompt(position)?;
            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
                operation: "read move from input".to_string(),
                source,
            })?;
            if read == 0 {
                return Err(Error::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(mv) => return Ok(mv),
                Err(_) => writeln!(self.output, "enter a cell number from 0 to 8")?,
            }
        }
    }

    fn reject_move(&mut self, _position: &Position, mv: usize) -> Result<()> {
        writeln!(self.output, "cell {mv} is not available")?;
        Ok(())
    }

    fn show_result(&mut self, position: &Position) -> Result<()> {
        writeln!(self.output, "{position}")?;
        Ok(())
    }
}
