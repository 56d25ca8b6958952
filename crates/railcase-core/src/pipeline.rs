//! End-to-end case generation: scan a tree, build records, write a case file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cases::{CaseBuilder, CaseRecord};
use crate::classify::Platform;
use crate::config::{Config, ConfigError};
use crate::discovery::{DiscoveryError, Scanner};
use crate::interchange::{write_json_lines, DelimitedCodec, InterchangeError};

/// Errors from the generation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Interchange(#[from] InterchangeError),
}

/// Format of the generated case file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Six-column delimited rows.
    #[default]
    Delimited,
    /// One JSON case object per line.
    JsonLines,
}

/// Counts from one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub cases: usize,
    pub mac: usize,
    pub linux: usize,
}

impl ScanSummary {
    fn tally(files: usize, records: &[CaseRecord]) -> Self {
        let mut summary = Self {
            files,
            cases: records.len(),
            ..Default::default()
        };
        for record in records {
            match record.platform {
                Platform::Mac => summary.mac += 1,
                Platform::Linux => summary.linux += 1,
                Platform::Default => {}
            }
        }
        summary
    }
}

/// Scan `root` and build one case record per discovered test.
pub fn discover_cases(config: &Config, root: &Path) -> Result<(usize, Vec<CaseRecord>), PipelineError> {
    let files = Scanner::new(&config.scan).scan(root)?;
    let builder = CaseBuilder::new(config.cases.defaults(), config.cases.description_style);
    Ok((files.len(), builder.build_all(&files)))
}

/// Scan `root` and write the resulting case file to `output`.
///
/// Nothing is written if the scan fails.
pub fn generate_case_file(
    config: &Config,
    root: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<ScanSummary, PipelineError> {
    let (files, records) = discover_cases(config, root)?;

    match format {
        OutputFormat::Delimited => {
            let codec = DelimitedCodec::new(config.interchange.delimiter_byte()?);
            codec.write_file(output, &records)?;
        }
        OutputFormat::JsonLines => {
            write_json_lines(output, &records)?;
        }
    }

    let summary = ScanSummary::tally(files, &records);
    info!(
        root = %root.display(),
        output = %output.display(),
        files = summary.files,
        cases = summary.cases,
        "wrote case file"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::CaseDefaults;

    fn record(platform: Platform) -> CaseRecord {
        let defaults = CaseDefaults::default();
        CaseRecord {
            title: "TestX".into(),
            type_id: defaults.type_id,
            priority_id: defaults.priority_id,
            estimate: defaults.estimate,
            platform,
            description: String::new(),
        }
    }

    #[test]
    fn test_summary_tally() {
        let records = vec![
            record(Platform::Mac),
            record(Platform::Linux),
            record(Platform::Linux),
            record(Platform::Default),
        ];
        let summary = ScanSummary::tally(2, &records);
        assert_eq!(
            summary,
            ScanSummary {
                files: 2,
                cases: 4,
                mac: 1,
                linux: 2
            }
        );
    }
}
