//! Configuration management for railcase.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `railcase.toml` file
//! 3. User config `~/.config/railcase/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

use crate::cases::{CaseDefaults, DescriptionStyle};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote test-management service.
    pub remote: RemoteConfig,

    /// Source tree scanning.
    pub scan: ScanConfig,

    /// Case record defaults.
    pub cases: CasesConfig,

    /// Interchange file settings.
    pub interchange: InterchangeConfig,

    /// Run creation settings.
    pub run: RunConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./railcase.toml` (project local)
    /// 2. `~/.config/railcase/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("RAILCASE_BASE_URL") {
            self.remote.base_url = Some(url);
        }
        if let Ok(user) = std::env::var("RAILCASE_USER") {
            self.remote.user = Some(user);
        }
        if let Ok(password) = std::env::var("RAILCASE_PASSWORD") {
            self.remote.password = Some(password);
        }
        if let Ok(id) = std::env::var("RAILCASE_PROJECT_ID") {
            if let Ok(n) = id.parse() {
                self.remote.project_id = n;
            }
        }
        if let Ok(id) = std::env::var("RAILCASE_SUITE_ID") {
            if let Ok(n) = id.parse() {
                self.remote.suite_id = n;
            }
        }
        if let Ok(secs) = std::env::var("RAILCASE_TIMEOUT_SECS") {
            if let Ok(n) = secs.parse() {
                self.remote.timeout_secs = n;
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// How the remote client reacts to bad statuses and undecodable bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Non-success statuses and decode failures are errors.
    #[default]
    Strict,
    /// Log the anomaly and carry on with whatever could be decoded.
    Lenient,
}

/// Remote test-management service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the TestRail instance.
    pub base_url: Option<String>,

    /// Basic-auth user.
    pub user: Option<String>,

    /// Basic-auth password or API key.
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Project holding the case catalog.
    pub project_id: u64,

    /// Suite holding the case catalog.
    pub suite_id: u64,

    /// Per-request deadline in seconds.
    pub timeout_secs: u64,

    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,

    /// Error policy for statuses and response bodies.
    pub strictness: Strictness,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user: None,
            password: None,
            project_id: DEFAULT_PROJECT_ID,
            suite_id: DEFAULT_SUITE_ID,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: true,
            strictness: Strictness::default(),
        }
    }
}

impl RemoteConfig {
    /// Get the base URL from config or the legacy environment variable.
    pub fn base_url_or_env(&self) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| std::env::var("ORBITAL_TEST_RAIL").ok())
            .map(|url| url.trim_end_matches('/').to_string())
    }

    /// Get the user from config or the legacy environment variable.
    pub fn user_or_env(&self) -> Option<String> {
        self.user
            .clone()
            .or_else(|| std::env::var("TESTRAIL_USER").ok())
    }

    /// Get the password from config or the legacy environment variable.
    pub fn password_or_env(&self) -> Option<String> {
        self.password
            .clone()
            .or_else(|| std::env::var("TESTRAIL_PASSWORD").ok())
    }
}

/// Source tree scanning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name suffix of test files.
    pub file_suffix: String,

    /// Function name prefix of test functions (case-sensitive).
    pub test_prefix: String,

    /// Directories to skip.
    pub exclude_dirs: Vec<String>,

    /// Honour `.gitignore` files while walking.
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_suffix: DEFAULT_TEST_FILE_SUFFIX.to_string(),
            test_prefix: DEFAULT_TEST_PREFIX.to_string(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

/// Case record configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CasesConfig {
    pub type_id: u32,
    pub priority_id: u32,
    pub estimate: String,
    pub description_style: DescriptionStyle,
}

impl Default for CasesConfig {
    fn default() -> Self {
        Self {
            type_id: DEFAULT_TYPE_ID,
            priority_id: DEFAULT_PRIORITY_ID,
            estimate: DEFAULT_ESTIMATE.to_string(),
            description_style: DescriptionStyle::default(),
        }
    }
}

impl CasesConfig {
    /// Fixed fields stamped onto every built case.
    pub fn defaults(&self) -> CaseDefaults {
        CaseDefaults {
            type_id: self.type_id,
            priority_id: self.priority_id,
            estimate: self.estimate.clone(),
        }
    }
}

/// Interchange file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterchangeConfig {
    /// Column delimiter of the delimited case file.
    pub delimiter: char,
}

impl Default for InterchangeConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl InterchangeConfig {
    /// The delimiter as a single byte, as the CSV reader wants it.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::Invalid(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

/// Run creation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Prefix of generated run names.
    pub name_prefix: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_RUN_NAME_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote.project_id, DEFAULT_PROJECT_ID);
        assert_eq!(config.scan.test_prefix, DEFAULT_TEST_PREFIX);
        assert_eq!(config.cases.estimate, DEFAULT_ESTIMATE);
        assert_eq!(config.remote.strictness, Strictness::Strict);
    }

    #[test]
    fn test_password_not_serialized() {
        let mut config = Config::default();
        config.remote.password = Some("hunter2".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("hunter2"));
        assert!(toml_str.contains("[remote]"));
        assert!(toml_str.contains("[scan]"));
    }

    #[test]
    fn test_delimiter_byte() {
        let mut config = InterchangeConfig::default();
        assert_eq!(config.delimiter_byte().unwrap(), b',');

        config.delimiter = '§';
        assert!(config.delimiter_byte().is_err());
    }
}
