//! Case record type.

use serde::{Deserialize, Serialize};

use crate::classify::Platform;

/// One test case, shaped like the remote `add_case` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Test identifier, e.g. `TestLogin/bad password`.
    pub title: String,

    pub type_id: u32,

    pub priority_id: u32,

    /// Estimated duration, e.g. `3m`.
    pub estimate: String,

    #[serde(rename = "custom_operating_system")]
    pub platform: Platform,

    /// Doc comment of the test function.
    #[serde(rename = "custom_test_case_description")]
    pub description: String,
}

/// Fixed fields stamped onto every built case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDefaults {
    pub type_id: u32,
    pub priority_id: u32,
    pub estimate: String,
}

impl Default for CaseDefaults {
    fn default() -> Self {
        use crate::config::{DEFAULT_ESTIMATE, DEFAULT_PRIORITY_ID, DEFAULT_TYPE_ID};
        Self {
            type_id: DEFAULT_TYPE_ID,
            priority_id: DEFAULT_PRIORITY_ID,
            estimate: DEFAULT_ESTIMATE.to_string(),
        }
    }
}

/// How descriptions are rendered into case records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionStyle {
    /// The doc comment as is.
    #[default]
    Plain,
    /// `<file name>:<doc comment>`.
    FileQualified,
}
