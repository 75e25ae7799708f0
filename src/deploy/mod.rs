// ABOUTME: Deployment pipeline for promoting a published image into the local cluster.
// ABOUTME: Project root discovery, stage sequencing, and stage-tagged errors.

mod error;
mod pipeline;
mod project_root;

pub use error::{DeployError, Stage};
pub use pipeline::{Deployed, Pipeline, ROLLOUT_GRACE};
pub use project_root::find_project_root;
