//! Request and response shapes of the TestRail API.

use serde::{Deserialize, Serialize};

/// Standard TestRail result status IDs.
pub mod status {
    pub const PASSED: u32 = 1;
    pub const BLOCKED: u32 = 2;
    pub const UNTESTED: u32 = 3;
    pub const RETEST: u32 = 4;
    pub const FAILED: u32 = 5;
}

/// A project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub announcement: Option<String>,
    pub completed_on: Option<i64>,
    pub is_completed: bool,
    pub show_announcement: bool,
    pub suite_mode: u32,
    pub url: String,
}

/// A test suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub id: u64,
    pub name: String,
}

/// A section inside a suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
}

/// A case in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: u64,
    pub title: String,
}

/// A test run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `get_suites` answers with a bare array; some deployments wrap it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SuiteListing {
    Bare(Vec<Suite>),
    Wrapped { suites: Vec<Suite> },
}

impl Default for SuiteListing {
    fn default() -> Self {
        SuiteListing::Bare(Vec::new())
    }
}

impl SuiteListing {
    pub(crate) fn into_suites(self) -> Vec<Suite> {
        match self {
            SuiteListing::Bare(suites) | SuiteListing::Wrapped { suites } => suites,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SectionsResponse {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CasesResponse {
    #[serde(default)]
    pub cases: Vec<Case>,
}

/// Body of `add_run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub suite_id: u64,
    pub name: String,
    pub include_all: bool,
    pub case_ids: Vec<u64>,
    pub description: String,
}

impl RunRequest {
    /// A run limited to the given cases.
    pub fn new(
        suite_id: u64,
        name: impl Into<String>,
        case_ids: Vec<u64>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            suite_id,
            name: name.into(),
            include_all: false,
            case_ids,
            description: description.into(),
        }
    }
}

/// Outcome of one case in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub case_id: u64,
    pub status_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defects: Option<String>,
    #[serde(rename = "assignedto_id", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
}

impl ResultRecord {
    pub fn new(case_id: u64, status_id: u32) -> Self {
        Self {
            case_id,
            status_id,
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Body of `add_results_for_cases`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBatch {
    pub results: Vec<ResultRecord>,
}

impl ResultBatch {
    pub fn new(results: Vec<ResultRecord>) -> Self {
        Self { results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

/// A result keyed by case title, resolved to a [`ResultRecord`] through a
/// case index before posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledResult {
    pub title: String,
    pub status_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defects: Option<String>,
    #[serde(rename = "assignedto_id", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
}

impl TitledResult {
    /// Attach a case ID, dropping the title.
    pub fn with_case_id(self, case_id: u64) -> ResultRecord {
        ResultRecord {
            case_id,
            status_id: self.status_id,
            comment: self.comment,
            version: self.version,
            elapsed: self.elapsed,
            defects: self.defects,
            assigned_to_id: self.assigned_to_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_wire_shape() {
        let req = RunRequest::new(5279, "orbitalqa-run-1700000000", vec![1, 2, 3], "nightly \"smoke\"");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "suite_id": 5279,
                "name": "orbitalqa-run-1700000000",
                "include_all": false,
                "case_ids": [1, 2, 3],
                "description": "nightly \"smoke\""
            })
        );
    }

    #[test]
    fn test_result_optional_fields_omitted() {
        let batch = ResultBatch::new(vec![ResultRecord::new(7, status::PASSED)]);
        let json = serde_json::to_string(&batch).unwrap();
        assert_eq!(json, r#"{"results":[{"case_id":7,"status_id":1}]}"#);
    }

    #[test]
    fn test_assigned_to_wire_name() {
        let mut record = ResultRecord::new(7, status::FAILED).with_comment("boom");
        record.assigned_to_id = Some(12);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["assignedto_id"], 12);
        assert_eq!(json["comment"], "boom");
    }

    #[test]
    fn test_suite_listing_shapes() {
        let bare: SuiteListing = serde_json::from_str(r#"[{"id":1,"name":"A"}]"#).unwrap();
        assert_eq!(bare.into_suites().len(), 1);
        let wrapped: SuiteListing =
            serde_json::from_str(r#"{"offset":0,"suites":[{"id":1,"name":"A"},{"id":2,"name":"B"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_suites().len(), 2);
    }

    #[test]
    fn test_project_tolerates_nulls() {
        let project: Project = serde_json::from_str(
            r#"{"id":34,"name":"Orbital","announcement":null,"completed_on":null,"is_completed":false,"suite_mode":3,"url":"https://x/index.php?/projects/overview/34"}"#,
        )
        .unwrap();
        assert_eq!(project.id, 34);
        assert_eq!(project.name, "Orbital");
        assert!(project.announcement.is_none());
    }
}
