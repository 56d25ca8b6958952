pub mod cases;
pub mod classify;
pub mod config;
pub mod discovery;
pub mod interchange;
pub mod pipeline;
pub mod remote;
pub mod sync;

pub use cases::{CaseBuilder, CaseRecord, DescriptionStyle};
pub use classify::{classify, Platform};
pub use config::{Config, ConfigError, RemoteConfig, ScanConfig, Strictness};
pub use discovery::{DiscoveryError, ParsedTestFile, Scanner, TestIdentifier};
pub use interchange::{DelimitedCodec, InterchangeError};
pub use pipeline::{generate_case_file, OutputFormat, PipelineError, ScanSummary};
pub use remote::{Catalog, RemoteError, TestRailClient};
pub use sync::{CaseIdIndex, Orchestrator, RunId, SyncError, UploadReport};
