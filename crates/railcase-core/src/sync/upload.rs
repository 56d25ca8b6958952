//! Case upload.

use tracing::{info, warn};

use super::error::SyncError;
use crate::cases::CaseRecord;
use crate::remote::{Case, Catalog};

/// Outcome of an upload.
#[derive(Debug, Default, Clone)]
pub struct UploadReport {
    /// Cases the service created.
    pub created: Vec<Case>,

    /// `(title, reason)` for every case that was not created.
    pub failed: Vec<(String, String)>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create every record in `section_id`, one request each.
///
/// A failed case is logged and recorded in the report; the upload moves on
/// to the next record.
pub async fn upload_cases(
    catalog: &dyn Catalog,
    section_id: u64,
    records: &[CaseRecord],
) -> Result<UploadReport, SyncError> {
    if records.is_empty() {
        return Err(SyncError::NothingToUpload);
    }

    let mut report = UploadReport::default();
    for record in records {
        match catalog.add_case(section_id, record).await {
            Ok(case) if case.id != 0 => {
                info!(title = %record.title, case_id = case.id, "created case");
                report.created.push(case);
            }
            Ok(_) => {
                warn!(title = %record.title, "case response carried no case ID");
                report
                    .failed
                    .push((record.title.clone(), "response carried no case ID".to_string()));
            }
            Err(e) => {
                warn!(title = %record.title, error = %e, "failed to create case");
                report.failed.push((record.title.clone(), e.to_string()));
            }
        }
    }

    info!(
        section_id,
        created = report.created.len(),
        failed = report.failed.len(),
        "upload finished"
    );
    Ok(report)
}
