// ABOUTME: Application-wide error types for deploy-hook.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::deploy::DeployError;
use crate::types::ParseImageRefError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid image: {0}")]
    InvalidImage(#[from] ParseImageRefError),

    #[error("deployment failed: {0}")]
    Deploy(#[from] DeployError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
