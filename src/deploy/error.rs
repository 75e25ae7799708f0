// ABOUTME: Error types for the deployment pipeline with the SNAFU pattern.
// ABOUTME: Every fatal failure identifies the stage that produced it.

use snafu::Snafu;
use std::fmt;
use std::path::PathBuf;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ProjectRoot,
    Pull,
    Tag,
    Load,
    SetImage,
    Rollout,
}

impl Stage {
    /// Stable identifier used in logs and error responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ProjectRoot => "project-root",
            Stage::Pull => "pull",
            Stage::Tag => "tag",
            Stage::Load => "load",
            Stage::SetImage => "set-image",
            Stage::Rollout => "rollout",
        }
    }

    /// Whether failure at this stage aborts the pipeline.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Stage::Rollout)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ProjectRoot => "project root discovery",
            Stage::Pull => "image pull",
            Stage::Tag => "image tag",
            Stage::Load => "cluster image load",
            Stage::SetImage => "workload image update",
            Stage::Rollout => "rollout status",
        };
        f.write_str(label)
    }
}

/// Errors that abort a deployment.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DeployError {
    #[snafu(display("failed to determine working directory: {source}"))]
    WorkingDir { source: std::io::Error },

    #[snafu(display(
        "project root not found ({} not found in {} or any parent)",
        marker.display(),
        start.display()
    ))]
    ProjectRootNotFound { start: PathBuf, marker: PathBuf },

    /// External tool failed; `detail` carries its exit status and output.
    #[snafu(display("{stage} failed: {detail}"))]
    Tool { stage: Stage, detail: String },
}

impl DeployError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            DeployError::WorkingDir { .. } | DeployError::ProjectRootNotFound { .. } => {
                Stage::ProjectRoot
            }
            DeployError::Tool { stage, .. } => *stage,
        }
    }
}
