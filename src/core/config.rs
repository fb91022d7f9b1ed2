//! # Configuration
//!
//! Settings for the shell around the reader, with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.wikiterm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The navigation core never reads any of this.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WikitermConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub article_path: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_ARTICLE_PATH: &str = "/wiki/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_LOG_FILE: &str = "wikiterm.log";

pub fn default_user_agent() -> String {
    format!("wikiterm/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub article_path: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub log_level: log::LevelFilter,
    pub log_file: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&WikitermConfig::default(), |_| None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.wikiterm`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wikiterm"))
}

/// Returns the path to `~/.wikiterm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.wikiterm/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WikitermConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WikitermConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WikitermConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(WikitermConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<WikitermConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WikitermConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# wikiterm configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "wikiterm.log"          # Path relative to ~/.wikiterm/

# [source]
# base_url = "https://en.wikipedia.org"   # Or set WIKITERM_BASE_URL
# article_path = "/wiki/"
# user_agent = "wikiterm/0.1.0"
# timeout_secs = 15
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &WikitermConfig) -> ResolvedConfig {
    resolve_with(config, |key| std::env::var(key).ok())
}

/// Resolution with an injectable environment lookup.
fn resolve_with(config: &WikitermConfig, env: impl Fn(&str) -> Option<String>) -> ResolvedConfig {
    // Base URL: env → config → default
    let base_url = env("WIKITERM_BASE_URL")
        .or_else(|| config.source.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let article_path = config
        .source
        .article_path
        .clone()
        .unwrap_or_else(|| DEFAULT_ARTICLE_PATH.to_string());

    // Log level: env → config → default. Unknown names fall back to the default.
    let level_name = env("WIKITERM_LOG_LEVEL")
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let log_level = level_name.parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using {}", level_name, DEFAULT_LOG_LEVEL);
        log::LevelFilter::Debug
    });

    // Log file: relative paths live in ~/.wikiterm/
    let log_file = {
        let name = config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let path = PathBuf::from(name);
        match config_dir() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    };

    ResolvedConfig {
        base_url,
        article_path,
        user_agent: config
            .source
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent),
        timeout_secs: config.source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        log_level,
        log_file,
    }
}
