//! Discovery error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering tests.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// File could not be read.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not valid Go.
    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u32,
        message: String,
    },

    /// Directory walk failed.
    #[error("Walk error: {0}")]
    Walk(String),
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ignore::Error> for DiscoveryError {
    fn from(err: ignore::Error) -> Self {
        DiscoveryError::Walk(err.to_string())
    }
}
