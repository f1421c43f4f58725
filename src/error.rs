//! Error types for Devdeck
//!
//! The session core never fails: ignored events are reported as outcomes,
//! not errors. These variants cover the edges (scripts, files, JSON, config).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevdeckError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Session has been shut down")]
    SessionClosed,

    #[error("Path not found: {0}")]
    PathNotFound(String),
}

pub type Result<T> = std::result::Result<T, DevdeckError>;
