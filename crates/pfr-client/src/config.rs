//! Client configuration: service location and transport timeout.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_S: f64 = 30.0;
/// Overrides `base_url` when set.
pub const ENV_SERVICE_URL: &str = "PFR_SIM_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root, without the `/simulate` suffix.
    pub base_url: String,
    /// Whole-request timeout in seconds. `None` waits indefinitely.
    pub timeout_s: Option<f64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_s: Some(DEFAULT_TIMEOUT_S),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from a YAML file. Missing keys fall back to defaults.
    pub fn from_yaml_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ClientError::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ClientResult<Self> {
        let config: ClientConfig =
            serde_yaml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the `PFR_SIM_URL` environment variable.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_SERVICE_URL) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is empty".to_string()));
        }
        if let Some(t) = self.timeout_s {
            if !t.is_finite() || t <= 0.0 {
                return Err(ClientError::Config(format!(
                    "timeout_s must be a positive number of seconds, got {t}"
                )));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_s.map(Duration::from_secs_f64)
    }

    /// Full URL of the simulate endpoint.
    pub fn simulate_url(&self) -> String {
        format!("{}/simulate", self.base_url.trim_end_matches('/'))
    }

    /// Full URL of the service root.
    pub fn info_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}
