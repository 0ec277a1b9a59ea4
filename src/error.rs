use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("Executable not found on PATH: {0}")]
    MissingExecutable(String),

    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend not reachable: {0}")]
    Unreachable(reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
