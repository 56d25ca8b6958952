//! Client for the remote test-management catalog (TestRail API v2).

mod client;
mod error;
mod models;

pub use client::{RawResponse, TestRailClient};
pub use error::RemoteError;
pub use models::{
    status, Case, Project, ResultBatch, ResultRecord, Run, RunRequest, Section, Suite,
    TitledResult,
};

use async_trait::async_trait;
use tracing::warn;

use crate::cases::CaseRecord;

/// Operations against a remote case catalog.
///
/// This abstraction lets the sync layer run against the HTTP client or a
/// substitute in tests.
///
/// # Example
///
/// ```ignore
/// use railcase_core::remote::{Catalog, TestRailClient};
///
/// let client = TestRailClient::new("https://rail.example.com", "qa", "secret")?;
/// let suite_id = client.suite_id_by_name("SMOKETEST", 34).await?;
/// ```
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a project by ID.
    async fn get_project(&self, project_id: u64) -> Result<Project, RemoteError>;

    /// List the suites of a project.
    async fn get_suites(&self, project_id: u64) -> Result<Vec<Suite>, RemoteError>;

    /// List the sections of a suite.
    async fn get_sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>, RemoteError>;

    /// List the cases of a suite.
    async fn get_cases(&self, project_id: u64, suite_id: u64) -> Result<Vec<Case>, RemoteError>;

    /// Create a case in a section.
    async fn add_case(&self, section_id: u64, case: &CaseRecord) -> Result<Case, RemoteError>;

    /// Create a run in a project.
    async fn add_run(&self, project_id: u64, run: &RunRequest) -> Result<Run, RemoteError>;

    /// Post a batch of results to a run.
    async fn add_results_for_cases(&self, run_id: u64, results: &ResultBatch)
        -> Result<(), RemoteError>;

    /// Resolve a suite name to its ID.
    ///
    /// An empty suite list or a missing name is [`RemoteError::NotFound`].
    async fn suite_id_by_name(&self, name: &str, project_id: u64) -> Result<u64, RemoteError> {
        let suites = self.get_suites(project_id).await?;
        find_last_by_name(&suites, name, "suite", |s| s.name.as_str())
            .map(|s| s.id)
            .ok_or_else(|| RemoteError::not_found("suite", name))
    }

    /// Resolve a section name to its ID; `Ok(None)` when absent.
    async fn section_id_by_name(
        &self,
        name: &str,
        project_id: u64,
        suite_id: u64,
    ) -> Result<Option<u64>, RemoteError> {
        let sections = self.get_sections(project_id, suite_id).await?;
        Ok(find_last_by_name(&sections, name, "section", |s| s.name.as_str()).map(|s| s.id))
    }
}

/// Linear scan for an exact name; the last match wins.
pub(crate) fn find_last_by_name<'a, T>(
    items: &'a [T],
    name: &str,
    kind: &str,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let matches: Vec<&T> = items.iter().filter(|item| name_of(*item) == name).collect();
    if matches.len() > 1 {
        warn!(kind, name, count = matches.len(), "duplicate names, using the last one");
    }
    matches.last().copied()
}
