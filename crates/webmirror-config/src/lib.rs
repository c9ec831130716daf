//! Configuration management for WebMirror
//!
//! This crate provides the immutable, validated configuration value the sync
//! engine is constructed with. Values come from three layers: built-in
//! defaults, an optional TOML configuration file, and explicit overrides
//! (CLI flags, `WEBMIRROR_*` environment variables). Validation normalizes
//! the target directory and listing URL before any network activity starts.
//!
//! # Examples
//!
//! ```rust
//! use webmirror_config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .url("https://live.sysinternals.com")
//!     .build()
//!     .expect("configuration should validate");
//!
//! assert!(config.remote.url.ends_with('/'));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Built-in listing URL used when none is configured
pub const DEFAULT_URL: &str = "https://live.sysinternals.com/";

/// Ignore-file name inside the target directory
pub const DEFAULT_IGNORE_FILE: &str = ".syncignore";

/// Status-file name inside the target directory
pub const DEFAULT_STATUS_FILE: &str = ".syncstatus";

/// Main configuration structure for WebMirror
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote listing configuration
    pub remote: RemoteConfig,
    /// Local target and state-file configuration
    pub local: LocalConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            local: LocalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Remote listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Listing URL; empty selects the built-in default
    pub url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Optional per-request timeout in seconds; `None` keeps transport defaults
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: format!("webmirror/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

/// Local target and state-file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Target directory the remote listing is mirrored into; empty selects
    /// the current working directory
    pub directory: PathBuf,
    /// Name of the exclusion-pattern file inside the target directory
    pub ignore_file: String,
    /// Name of the sync-status file inside the target directory
    pub status_file: String,
    /// Staging directory for in-flight downloads; `None` selects a
    /// `webmirror` folder under the system temp directory
    pub cache_dir: Option<PathBuf>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            status_file: DEFAULT_STATUS_FILE.to_string(),
            cache_dir: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no flag or `RUST_LOG` overrides it
    pub level: String,
    /// Enable colored terminal output
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            colored_output: true,
        }
    }
}

impl Config {
    /// Validate and normalize the configuration.
    ///
    /// - An empty directory resolves to the current working directory; the
    ///   resolved directory must exist.
    /// - An empty URL resolves to [`DEFAULT_URL`]; the URL must parse, must
    ///   be `http`/`https`, and gains a trailing slash so listed filenames
    ///   resolve beneath it.
    pub fn validated(mut self) -> ConfigResult<Self> {
        self.local.directory = resolve_directory(self.local.directory)?;
        self.remote.url = resolve_url(&self.remote.url)?;
        Ok(self)
    }

    /// Path of the ignore file inside the target directory
    pub fn ignore_path(&self) -> PathBuf {
        self.local.directory.join(&self.local.ignore_file)
    }

    /// Path of the status file inside the target directory
    pub fn status_path(&self) -> PathBuf {
        self.local.directory.join(&self.local.status_file)
    }

    /// Resolved staging directory for in-flight downloads
    pub fn cache_dir(&self) -> PathBuf {
        self.local
            .cache_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("webmirror"))
    }
}

fn resolve_directory(directory: PathBuf) -> ConfigResult<PathBuf> {
    let directory = if directory.as_os_str().is_empty() {
        std::env::current_dir().map_err(|e| {
            ConfigError::validation(format!("cannot determine current directory: {e}"))
        })?
    } else {
        directory
    };

    if !directory.is_dir() {
        return Err(ConfigError::validation(format!(
            "target directory does not exist: {}",
            directory.display()
        )));
    }

    directory.canonicalize().map_err(|e| {
        ConfigError::validation(format!(
            "cannot resolve target directory {}: {e}",
            directory.display()
        ))
    })
}

fn resolve_url(raw: &str) -> ConfigResult<String> {
    let raw = if raw.is_empty() { DEFAULT_URL } else { raw };

    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::invalid_value("remote.url", format!("{raw} is not a valid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_value(
            "remote.url",
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    let mut normalized = parsed.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.remote.url, DEFAULT_URL);
        assert_eq!(config.local.ignore_file, ".syncignore");
        assert_eq!(config.local.status_file, ".syncstatus");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validated_rejects_missing_directory() {
        let mut config = Config::default();
        config.local.directory = PathBuf::from("/definitely/not/a/real/path");

        assert!(config.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_malformed_url() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.local.directory = temp_dir.path().to_path_buf();
        config.remote.url = "not a url".to_string();

        assert!(config.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_non_http_scheme() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.local.directory = temp_dir.path().to_path_buf();
        config.remote.url = "file:///etc/passwd".to_string();

        assert!(config.validated().is_err());
    }

    #[test]
    fn test_validated_normalizes_url() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.local.directory = temp_dir.path().to_path_buf();
        config.remote.url = "https://example.com/tools".to_string();

        let config = config.validated().unwrap();
        assert_eq!(config.remote.url, "https://example.com/tools/");
    }

    #[test]
    fn test_empty_url_selects_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.local.directory = temp_dir.path().to_path_buf();
        config.remote.url = String::new();

        let config = config.validated().unwrap();
        assert_eq!(config.remote.url, DEFAULT_URL);
    }

    #[test]
    fn test_state_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.local.directory = temp_dir.path().to_path_buf();

        let config = config.validated().unwrap();
        assert!(config.ignore_path().ends_with(".syncignore"));
        assert!(config.status_path().ends_with(".syncstatus"));
    }
}
