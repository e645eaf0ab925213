//! Error types for the selfplay crate

use thiserror::Error;

/// Main error type for the selfplay crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell {position} is not a legal move on board '{board}'")]
    InvalidMove { position: usize, board: String },

    #[error("policy invariant violated ({reason}): {policy:?}")]
    PolicyInvariant { reason: String, policy: Vec<f64> },

    #[error("no legal moves available on board '{board}'")]
    NoLegalMoves { board: String },

    #[error("unknown position id {id}")]
    UnknownPosition { id: usize },

    #[error("board key '{key}' must have exactly {expected} cells, got {got}")]
    InvalidBoardLength {
        key: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid character '{character}' at position {position} in board key '{key}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        key: String,
    },

    #[error("stored statistics for '{key}' do not fit the board: {reason}")]
    MismatchedRecord { key: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("move input closed before a legal move was given")]
    InputClosed,

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Whether the error aborts only the trial it happened in.
    ///
    /// Policy invariant violations point at malformed value backups for a
    /// single position; the training loop drops the trial and carries on.
    pub fn is_trial_fatal(&self) -> bool {
        matches!(self, Error::PolicyInvariant { .. })
    }
}
