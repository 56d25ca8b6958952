//! Reconciles discovered cases with the remote catalog: case index, case
//! upload, run creation and result posting.

mod error;
mod index;
mod orchestrator;
mod upload;

pub use error::SyncError;
pub use index::CaseIdIndex;
pub use orchestrator::{run_name, Orchestrator, RunId};
pub use upload::{upload_cases, UploadReport};
