//! Builds case records from discovered tests.

use tracing::debug;

use super::record::{CaseDefaults, CaseRecord, DescriptionStyle};
use crate::classify::classify;
use crate::discovery::ParsedTestFile;

/// Turns parsed test files into case records.
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    defaults: CaseDefaults,
    style: DescriptionStyle,
}

impl CaseBuilder {
    pub fn new(defaults: CaseDefaults, style: DescriptionStyle) -> Self {
        Self { defaults, style }
    }

    /// One record per discovered test, in discovery order.
    ///
    /// Sub-tests take the doc comment of their top-level function. Titles
    /// are not deduplicated.
    pub fn build_file(&self, file: &ParsedTestFile) -> Vec<CaseRecord> {
        file.tests
            .iter()
            .map(|test| {
                let doc = file.doc_for(test.identifier.root()).unwrap_or_default();
                let platform = classify(doc);
                debug!(title = %test.identifier, %platform, "built case");

                CaseRecord {
                    title: test.identifier.to_string(),
                    type_id: self.defaults.type_id,
                    priority_id: self.defaults.priority_id,
                    estimate: self.defaults.estimate.clone(),
                    platform,
                    description: self.render_description(file.file_name(), doc),
                }
            })
            .collect()
    }

    /// Records for several files, concatenated.
    pub fn build_all(&self, files: &[ParsedTestFile]) -> Vec<CaseRecord> {
        files.iter().flat_map(|f| self.build_file(f)).collect()
    }

    fn render_description(&self, file_name: &str, doc: &str) -> String {
        match self.style {
            DescriptionStyle::Plain => doc.to_string(),
            DescriptionStyle::FileQualified => format!("{}:{}", file_name, doc),
        }
    }
}
