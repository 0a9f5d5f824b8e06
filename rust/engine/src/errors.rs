use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid player id: {id} (table has {count} players)")]
    InvalidPlayerId { id: usize, count: usize },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Shoe is empty")]
    EmptyShoe,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Player name must not be empty")]
    InvalidName,
}

/// Failures while writing or reading a session file.
/// The engine state is never mutated when one of these is returned from a load.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Session file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Session file {} cannot be restored: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}
