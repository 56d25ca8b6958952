//! Core parser trait for test discovery.

use super::error::DiscoveryError;
use super::result::ParsedTestFile;

/// Language-specific test extractor.
///
/// Implement this trait for each language whose test files should become
/// cases. A parser is responsible for:
///
/// 1. **Declarations**: every function with its leading doc comment
/// 2. **Tests**: functions matching the test prefix
/// 3. **Sub-tests**: named sub-tests invoked from a test body
pub trait TestParser: Send + Sync {
    /// Parse a test file and extract its tests.
    ///
    /// # Arguments
    /// * `path` - Path of the file (used in errors and output)
    /// * `content` - Source code content
    fn parse_file(&self, path: &str, content: &str) -> Result<ParsedTestFile, DiscoveryError>;

    /// Human-readable language name.
    fn language_name(&self) -> &'static str;

    /// File name suffix that marks a test file, e.g. `_test.go`.
    fn file_suffix(&self) -> &str;

    /// Check if this parser handles the given file name.
    fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(self.file_suffix())
    }
}
