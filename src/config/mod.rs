// ABOUTME: Process configuration for the webhook receiver and pipeline.
// ABOUTME: Layers defaults, an optional YAML file, and PORT/KIND_CLUSTER_NAME env vars.

mod tools;
mod workload;

pub use tools::ToolsConfig;
pub use workload::WorkloadConfig;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_CLUSTER_NAME: &str = "hello-go-cluster";
pub const DEFAULT_MARKER: &str = "k8s/deployment.yaml";

pub const PORT_ENV: &str = "PORT";
pub const CLUSTER_NAME_ENV: &str = "KIND_CLUSTER_NAME";

/// Everything the server and pipeline need, resolved once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cluster_name")]
    pub cluster_name: String,

    /// Path, relative to the project root, whose presence marks that root.
    #[serde(default = "default_marker")]
    pub marker: PathBuf,

    #[serde(default)]
    pub workload: WorkloadConfig,

    #[serde(default = "default_rollout_timeout", with = "humantime_serde")]
    pub rollout_timeout: Duration,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_cluster_name() -> String {
    DEFAULT_CLUSTER_NAME.to_string()
}

fn default_marker() -> PathBuf {
    PathBuf::from(DEFAULT_MARKER)
}

fn default_rollout_timeout() -> Duration {
    Duration::from_secs(60)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            cluster_name: default_cluster_name(),
            marker: default_marker(),
            workload: WorkloadConfig::default(),
            rollout_timeout: default_rollout_timeout(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Load `path` if given, then apply environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Apply `PORT` and `KIND_CLUSTER_NAME`. Empty values count as unset.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(port) = env_var(PORT_ENV) {
            self.port = port.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("{PORT_ENV} must be a port number, got {port:?}"))
            })?;
        }

        if let Some(cluster_name) = env_var(CLUSTER_NAME_ENV) {
            self.cluster_name = cluster_name;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cluster_name.trim().is_empty() {
            return Err(Error::InvalidConfig("cluster name cannot be empty".into()));
        }
        if self.cluster_name.starts_with('-') {
            return Err(Error::InvalidConfig(format!(
                "cluster name cannot start with '-': {}",
                self.cluster_name
            )));
        }
        if self.marker.as_os_str().is_empty() || self.marker.is_absolute() {
            return Err(Error::InvalidConfig(format!(
                "marker must be a non-empty relative path, got {}",
                self.marker.display()
            )));
        }
        if self.rollout_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "rollout timeout must be greater than zero".into(),
            ));
        }
        self.tools.validate()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
