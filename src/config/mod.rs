mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            server_url: default_server_url(),
            endpoint: default_endpoint(),
            request_timeout_sec: None,
            completion_delay_ms: default_completion_delay_ms(),
            tick_ms: default_tick_ms(),
            preferences_path: None,
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.server_url).map_err(|e| {
            ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if !self.endpoint.starts_with('/') {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }

        Ok(())
    }

    /// Full URL of the plan endpoint
    pub fn plan_url(&self) -> String {
        format!(
            "{}{}",
            self.server_url.trim_end_matches('/'),
            self.endpoint
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_sec.map(Duration::from_secs)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
