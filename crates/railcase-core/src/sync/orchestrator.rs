//! Creates runs and posts results.

use std::fmt;
use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use super::error::SyncError;
use super::index::CaseIdIndex;
use super::upload::{upload_cases, UploadReport};
use crate::config::DEFAULT_RUN_NAME_PREFIX;
use crate::interchange::{read_case_file, DelimitedCodec};
use crate::remote::{Catalog, ResultBatch, RunRequest, TitledResult};

/// ID of a created run. Zero means the service gave no usable ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub u64);

impl RunId {
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `<prefix>-<env>-<secs>`, or `<prefix>-<secs>` without an environment.
pub fn run_name(prefix: &str, env: &str, unix_secs: i64) -> String {
    if env.is_empty() {
        format!("{}-{}", prefix, unix_secs)
    } else {
        format!("{}-{}-{}", prefix, env, unix_secs)
    }
}

/// Drives run creation, result posting and case uploads against a catalog.
pub struct Orchestrator<'a> {
    catalog: &'a dyn Catalog,
    run_name_prefix: String,
}

impl<'a> Orchestrator<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self {
            catalog,
            run_name_prefix: DEFAULT_RUN_NAME_PREFIX.to_string(),
        }
    }

    /// Sets the prefix of generated run names.
    pub fn with_run_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.run_name_prefix = prefix.into();
        self
    }

    /// Create a run over the given cases.
    ///
    /// In lenient mode an undecodable response yields `RunId(0)`; check
    /// [`RunId::is_valid`] before using it.
    pub async fn create_run(
        &self,
        env: &str,
        project_id: u64,
        suite_id: u64,
        case_ids: &[u64],
        description: &str,
    ) -> Result<RunId, SyncError> {
        let name = run_name(&self.run_name_prefix, env, Utc::now().timestamp());
        let request = RunRequest::new(suite_id, name, case_ids.to_vec(), description);

        let run = self.catalog.add_run(project_id, &request).await?;
        let run_id = RunId(run.id);
        if run_id.is_valid() {
            info!(run_id = run.id, name = %request.name, cases = case_ids.len(), "created run");
        } else {
            warn!(name = %request.name, "run response carried no run ID");
        }

        Ok(run_id)
    }

    /// Post a batch of results to a run.
    pub async fn post_results(&self, run_id: RunId, results: &ResultBatch) -> Result<(), SyncError> {
        if !run_id.is_valid() {
            return Err(SyncError::InvalidRun(run_id.0));
        }
        if results.is_empty() {
            info!(%run_id, "no results to post");
            return Ok(());
        }

        self.catalog.add_results_for_cases(run_id.0, results).await?;
        info!(%run_id, results = results.len(), "posted results");
        Ok(())
    }

    /// Resolve title-keyed results through `index` and post them.
    ///
    /// Returns the titles that had no case in the index; they are skipped.
    pub async fn post_titled_results(
        &self,
        run_id: RunId,
        index: &CaseIdIndex,
        titled: Vec<TitledResult>,
    ) -> Result<Vec<String>, SyncError> {
        let (batch, missing) = index.resolve_results(titled);
        for title in &missing {
            warn!(%title, "no case for result, skipping");
        }
        self.post_results(run_id, &batch).await?;
        Ok(missing)
    }

    /// Upload a case file into the section named `section_name`.
    pub async fn upload_file(
        &self,
        codec: &DelimitedCodec,
        path: &Path,
        section_name: &str,
        project_id: u64,
        suite_id: u64,
    ) -> Result<UploadReport, SyncError> {
        let records = read_case_file(codec, path)?;
        let section_id = self
            .catalog
            .section_id_by_name(section_name, project_id, suite_id)
            .await?
            .ok_or_else(|| SyncError::SectionNotFound(section_name.to_string()))?;

        info!(file = %path.display(), section = section_name, section_id, cases = records.len(), "uploading cases");
        upload_cases(self.catalog, section_id, &records).await
    }
}
