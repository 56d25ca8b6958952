//! Directory walker that feeds test files to their parsers.

use ignore::WalkBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::error::DiscoveryError;
use super::registry::ParserRegistry;
use super::result::ParsedTestFile;
use crate::config::ScanConfig;

/// Recursively discovers tests under a directory.
///
/// The walk is fail-fast: the first unreadable or unparsable test file
/// aborts the scan.
pub struct Scanner {
    registry: ParserRegistry,
    exclude_dirs: Vec<String>,
    respect_gitignore: bool,
}

impl Scanner {
    /// Create a scanner following the scan configuration.
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_registry(ParserRegistry::from_config(config), config)
    }

    /// Create a scanner with a custom parser registry.
    pub fn with_registry(registry: ParserRegistry, config: &ScanConfig) -> Self {
        Self {
            registry,
            exclude_dirs: config.exclude_dirs.clone(),
            respect_gitignore: config.respect_gitignore,
        }
    }

    /// Parse every test file under `root`, in file-name order.
    ///
    /// File paths in the results are relative to `root`.
    pub fn scan(&self, root: &Path) -> Result<Vec<ParsedTestFile>, DiscoveryError> {
        let mut files = Vec::new();
        let excluded = self.exclude_dirs.clone();

        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(self.respect_gitignore)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(is_dir
                    && entry.depth() > 0
                    && excluded
                        .iter()
                        .any(|d| entry.file_name().to_str() == Some(d.as_str())))
            })
            .build();

        for entry in walker {
            let entry = entry?;
            let file_path = entry.path();

            // Symlinked test files are read through the link; a dangling
            // one fails the scan like any other unreadable file.
            if !entry
                .file_type()
                .map(|t| t.is_file() || t.is_symlink())
                .unwrap_or(false)
            {
                continue;
            }

            let relative_path = file_path
                .strip_prefix(root)
                .unwrap_or(file_path)
                .to_string_lossy()
                .to_string();

            if let Some(parsed) = self.parse_path(file_path, &relative_path)? {
                files.push(parsed);
            }
        }

        let tests: usize = files.iter().map(|f| f.tests.len()).sum();
        info!(root = %root.display(), files = files.len(), tests, "scan complete");

        Ok(files)
    }

    /// Parse a single file; `Ok(None)` when it is not a test file.
    pub fn scan_file(&self, path: &Path) -> Result<Option<ParsedTestFile>, DiscoveryError> {
        self.parse_path(path, &path.to_string_lossy())
    }

    fn parse_path(
        &self,
        path: &Path,
        display_path: &str,
    ) -> Result<Option<ParsedTestFile>, DiscoveryError> {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return Ok(None),
        };

        let Some(parser) = self.registry.parser_for_file(file_name) else {
            return Ok(None);
        };

        debug!(file = display_path, language = parser.language_name(), "parsing test file");
        let content = fs::read_to_string(path).map_err(|e| DiscoveryError::io(path, e))?;
        let parsed = parser.parse_file(display_path, &content)?;
        info!(file = display_path, tests = parsed.tests.len(), "extracted tests");

        Ok(Some(parsed))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}
