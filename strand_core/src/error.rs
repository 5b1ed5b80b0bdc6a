use thiserror::Error;

use crate::schema::SchemaError;
use crate::translator::ParseError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("String already exists in the system: {0}")]
    Conflict(String),

    #[error("String does not exist in the system: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(anyhow::Error),
}

impl Error {
    /// Wrap a backend failure as a storage error.
    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Self::Storage(err.into())
    }
}
