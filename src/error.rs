//! Library error type

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown symptom or history flag: {0}")]
    UnknownFlag(String),

    #[error("Unknown sample filter: {0} (expected all, learned or original)")]
    UnknownFilter(String),

    #[error("Seeding failed: {0}")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
