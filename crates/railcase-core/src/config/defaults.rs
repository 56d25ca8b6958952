//! Default values for railcase configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Remote Defaults
// ============================================================================

/// Default TestRail project ID.
pub const DEFAULT_PROJECT_ID: u64 = 34;

/// Default TestRail suite ID.
pub const DEFAULT_SUITE_ID: u64 = 5279;

/// Default request deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path segment between the base URL and an API endpoint.
pub const API_PREFIX: &str = "index.php?/api/v2";

// ============================================================================
// Scan Defaults
// ============================================================================

/// Suffix that marks a file as a Go test file.
pub const DEFAULT_TEST_FILE_SUFFIX: &str = "_test.go";

/// Prefix a function name must start with to count as a test.
pub const DEFAULT_TEST_PREFIX: &str = "Test";

/// Default directories to skip while scanning.
///
/// Only directories that never hold the module's own tests.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Vendored dependencies
    "vendor",
    // Go fixture data is never compiled as tests
    "testdata",
];

// ============================================================================
// Case Defaults
// ============================================================================

/// Default case type ID.
pub const DEFAULT_TYPE_ID: u32 = 1;

/// Default case priority ID.
pub const DEFAULT_PRIORITY_ID: u32 = 3;

/// Default case estimate.
pub const DEFAULT_ESTIMATE: &str = "3m";

// ============================================================================
// Interchange Defaults
// ============================================================================

/// Default column delimiter for the delimited case file.
pub const DEFAULT_DELIMITER: char = ',';

/// Default output file for `scan`.
pub const DEFAULT_OUTPUT_FILE: &str = "testcases.csv";

// ============================================================================
// Run Defaults
// ============================================================================

/// Prefix for generated run names.
pub const DEFAULT_RUN_NAME_PREFIX: &str = "orbitalqa-run";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "railcase.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "railcase";

/// File name under the user config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";
