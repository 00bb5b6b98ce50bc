//! Error types for Notula

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid note ID: {0}")]
    InvalidNoteId(String),

    #[error("invalid updates")]
    InvalidUpdates,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
