//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CONNECTAPI_CONFIG";
/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "CONNECTAPI_API_URL";
/// Environment variable overriding the credential file.
pub const TOKEN_FILE_ENV: &str = "CONNECTAPI_TOKEN_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/connectapi/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Backend base URL, e.g. "https://connectapi.example/api".
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// File holding the stored user token.
    #[serde(default)]
    pub credential_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// HTTP request timeout in seconds; `0` disables it.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Number of trending APIs shown on the page.
    #[serde(default)]
    pub trending_limit: Option<usize>,

    /// Drop settlements of superseded searches instead of applying them.
    #[serde(default)]
    pub discard_stale_responses: Option<bool>,

    /// Send the stored token as a bearer `Authorization` header.
    #[serde(default)]
    pub auth_header: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Backend base URL.
    pub api_base_url: String,
    /// File holding the stored user token.
    pub credential_path: PathBuf,
    /// Path to log file.
    pub log_file_path: PathBuf,
    /// HTTP request timeout in seconds; `0` disables it.
    pub request_timeout_secs: u64,
    /// Number of trending APIs shown.
    pub trending_limit: usize,
    /// Selects [`crate::state::ResponseOrdering::LatestIssuedOnly`].
    pub discard_stale_responses: bool,
    /// Send the token as a bearer header.
    pub auth_header: bool,
}

impl ResolvedConfig {
    /// [`Self::request_timeout_secs`] as a `Duration`, `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            credential_path: default_credential_path(),
            log_file_path: default_log_path(),
            request_timeout_secs: 30,
            trending_limit: crate::state::DEFAULT_TRENDING_LIMIT,
            discard_stale_responses: false,
            auth_header: true,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/connectapi/connectapi.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("connectapi").join("connectapi.log")
    } else {
        PathBuf::from("connectapi.log")
    }
}

/// Resolve default credential path, `<data_dir>/connectapi/userToken`.
///
/// Falls back to `userToken` in the current directory.
pub fn default_credential_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("connectapi").join("userToken")
    } else {
        PathBuf::from("userToken")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/connectapi/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("connectapi").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CONNECTAPI_CONFIG` environment variable
/// 3. Default path `~/.config/connectapi/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
        credential_path: config.credential_path.unwrap_or(defaults.credential_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        trending_limit: config.trending_limit.unwrap_or(defaults.trending_limit),
        discard_stale_responses: config
            .discard_stale_responses
            .unwrap_or(defaults.discard_stale_responses),
        auth_header: config.auth_header.unwrap_or(defaults.auth_header),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CONNECTAPI_API_URL`: Override backend base URL
/// - `CONNECTAPI_TOKEN_FILE`: Override credential file
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.is_empty() {
            config.api_base_url = url;
        }
    }

    if let Ok(path) = std::env::var(TOKEN_FILE_ENV) {
        if !path.is_empty() {
            config.credential_path = PathBuf::from(path);
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    api_url_override: Option<String>,
    credential_override: Option<PathBuf>,
    discard_stale_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(url) = api_url_override {
        config.api_base_url = url;
    }

    if let Some(path) = credential_override {
        config.credential_path = path;
    }

    if let Some(discard) = discard_stale_override {
        config.discard_stale_responses = discard;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
