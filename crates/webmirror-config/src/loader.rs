//! Configuration loader utilities

use crate::{Config, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Configuration loader with common loading patterns
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from default locations.
    ///
    /// The first existing file among the default paths wins; when none
    /// exists the built-in defaults are used. `WEBMIRROR_*` environment
    /// variables override file values either way.
    pub fn load_default() -> ConfigResult<Config> {
        let mut config = match Self::config_exists() {
            Some(path) => Self::read_file(&path)?,
            None => Config::default(),
        };

        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Configuration file not found",
                ),
            });
        }

        let mut config = Self::read_file(path)?;
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(config: &Config, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(config).map_err(|e| {
            ConfigError::serialization(format!("Failed to serialize to TOML: {e}"))
        })?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> ConfigResult<()> {
        let config = Config::default();
        Self::save_to_file(&config, path)
    }

    /// Check if a configuration file exists in default locations
    pub fn config_exists() -> Option<PathBuf> {
        Self::default_config_paths()
            .into_iter()
            .find(|path| path.exists())
    }

    fn read_file(path: &Path) -> ConfigResult<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get default configuration file paths in order of preference
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        paths.push(PathBuf::from("webmirror.toml"));
        paths.push(PathBuf::from(".webmirror.toml"));

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("webmirror").join("config.toml"));
        }

        paths
    }
}

/// Override selected configuration values from `WEBMIRROR_*` variables
fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var("WEBMIRROR_URL") {
        if !url.is_empty() {
            config.remote.url = url;
        }
    }

    if let Ok(directory) = std::env::var("WEBMIRROR_DIRECTORY") {
        if !directory.is_empty() {
            config.local.directory = PathBuf::from(directory);
        }
    }
}

// Cross-platform config directory detection without an extra dependency
mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME").ok().map(|home| {
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
            })
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|home| PathBuf::from(home).join(".config"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
