use thiserror::Error;

use crate::interchange::InterchangeError;
use crate::remote::RemoteError;

/// Errors that can occur while syncing cases, runs and results.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Interchange(#[from] InterchangeError),

    /// The remote answered without a usable run ID.
    #[error("Run ID {0} is not a valid run")]
    InvalidRun(u64),

    #[error("No test cases to upload")]
    NothingToUpload,

    #[error("Section not found: {0}")]
    SectionNotFound(String),
}
