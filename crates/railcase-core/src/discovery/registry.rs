//! Parser registry for mapping test files to parsers.

use std::sync::Arc;

use super::go::GoParser;
use super::traits::TestParser;
use crate::config::ScanConfig;

/// Registry of test parsers.
///
/// Maps test file naming conventions to their parsers. The first registered
/// parser whose suffix matches a file name wins.
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn TestParser>>,
}

impl ParserRegistry {
    /// Create a registry with the built-in Go parser using default conventions.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(GoParser::new()));
        registry
    }

    /// Create a registry whose Go parser follows the scan configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(GoParser::with_conventions(
            config.test_prefix.clone(),
            config.file_suffix.clone(),
        )));
        registry
    }

    /// Create a registry with no parsers.
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser.
    pub fn register(&mut self, parser: Arc<dyn TestParser>) {
        self.parsers.push(parser);
    }

    /// Get the parser for a file name, if it is a test file.
    pub fn parser_for_file(&self, file_name: &str) -> Option<Arc<dyn TestParser>> {
        self.parsers
            .iter()
            .find(|p| p.matches(file_name))
            .cloned()
    }

    /// Check if any parser handles the given file name.
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.parsers.iter().any(|p| p.matches(file_name))
    }

    /// List registered parsers with their file suffixes.
    pub fn list_parsers(&self) -> Vec<(&'static str, &str)> {
        self.parsers
            .iter()
            .map(|p| (p.language_name(), p.file_suffix()))
            .collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
