// ABOUTME: Target workload for image updates.
// ABOUTME: Names the Deployment and the container whose image gets replaced.

use crate::types::{LocalImageRef, WorkloadName};
use serde::Deserialize;

pub const DEFAULT_WORKLOAD: WorkloadName = WorkloadName::from_static("hello");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadConfig {
    #[serde(default = "default_name")]
    pub deployment: WorkloadName,
    #[serde(default = "default_name")]
    pub container: WorkloadName,
}

fn default_name() -> WorkloadName {
    DEFAULT_WORKLOAD
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            deployment: default_name(),
            container: default_name(),
        }
    }
}

impl WorkloadConfig {
    /// Resource argument for kubectl, e.g. `deployment/hello`.
    pub fn resource(&self) -> String {
        format!("deployment/{}", self.deployment)
    }

    /// Container image assignment for `kubectl set image`, e.g. `hello=app:v1`.
    pub fn image_assignment(&self, image: &LocalImageRef) -> String {
        format!("{}={}", self.container, image)
    }
}
