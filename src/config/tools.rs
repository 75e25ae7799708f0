// ABOUTME: External tool binaries invoked by the pipeline.
// ABOUTME: Image runtime, kind-style cluster loader, and workload controller.

use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Pulls and tags images.
    #[serde(default = "default_image_tool")]
    pub image: String,
    /// Loads local images into the cluster.
    #[serde(default = "default_cluster_tool")]
    pub cluster: String,
    /// Updates the workload and watches its rollout.
    #[serde(default = "default_workload_tool")]
    pub workload: String,
}

fn default_image_tool() -> String {
    "docker".to_string()
}

fn default_cluster_tool() -> String {
    "kind".to_string()
}

fn default_workload_tool() -> String {
    "kubectl".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            image: default_image_tool(),
            cluster: default_cluster_tool(),
            workload: default_workload_tool(),
        }
    }
}

impl ToolsConfig {
    pub fn validate(&self) -> Result<()> {
        for (role, program) in [
            ("image", &self.image),
            ("cluster", &self.cluster),
            ("workload", &self.workload),
        ] {
            if program.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{role} tool cannot be empty")));
            }
        }
        Ok(())
    }
}
