//! Interchange error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur reading or writing case files.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row that does not describe a case.
    #[error("Malformed row {row} in {}: {message}", path.display())]
    MalformedRow {
        path: PathBuf,
        row: usize,
        message: String,
    },
}

impl InterchangeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InterchangeError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        InterchangeError::Csv {
            path: path.into(),
            source,
        }
    }
}
