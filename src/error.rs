use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::textgen::TextGenError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of the collaborators around the engine. Rendering itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    TextGen(#[from] TextGenError),
    #[error("failed to parse document: {0}")]
    Document(String),
    #[error("{0}")]
    Theme(String),
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
