//! Configuration builder for layering overrides onto loaded values

use crate::{Config, ConfigResult};
use std::path::PathBuf;

/// Builder that applies explicit overrides (typically CLI flags) on top of a
/// loaded configuration, then validates the result
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder seeded with the built-in defaults
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create a builder seeded with an already loaded configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Override the listing URL
    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.remote.url = url.into();
        self
    }

    /// Override the target directory
    pub fn directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.config.local.directory = directory.into();
        self
    }

    /// Override the User-Agent header
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.remote.user_agent = user_agent.into();
        self
    }

    /// Override the per-request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.remote.timeout_secs = Some(secs);
        self
    }

    /// Override the staging directory
    pub fn cache_dir<P: Into<PathBuf>>(mut self, cache_dir: P) -> Self {
        self.config.local.cache_dir = Some(cache_dir.into());
        self
    }

    /// Override the default log level
    pub fn log_level<S: Into<String>>(mut self, level: S) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Validate and produce the final immutable configuration
    pub fn build(self) -> ConfigResult<Config> {
        self.config.validated()
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
