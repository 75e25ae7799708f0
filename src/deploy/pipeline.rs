// ABOUTME: Image promotion pipeline: pull, tag, load into kind, update, watch rollout.
// ABOUTME: Stages run strictly in order; the first fatal failure stops the run.

use super::error::{DeployError, Stage, ToolSnafu, WorkingDirSnafu};
use super::project_root::find_project_root;
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Warning};
use crate::runner::{CommandOutput, CommandRunner, Invocation};
use crate::types::{ImageRef, LocalImageRef};
use snafu::ResultExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Extra time the rollout process gets beyond its own `--timeout` before it is killed.
pub const ROLLOUT_GRACE: Duration = Duration::from_secs(10);

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct Deployed {
    pub image: ImageRef,
    pub local_image: LocalImageRef,
    pub project_root: PathBuf,
    /// Non-fatal problems, e.g. a rollout that did not settle in time.
    pub warnings: Vec<Warning>,
}

/// Drives the external tools for one image update at a time.
///
/// Holds no per-run state; concurrent calls to [`Pipeline::update`] are
/// independent and may race on the cluster.
pub struct Pipeline {
    config: Config,
    runner: Arc<dyn CommandRunner>,
    search_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("search_dir", &self.search_dir)
            .finish()
    }
}

impl Pipeline {
    pub fn new(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            search_dir: None,
        }
    }

    /// Start project root discovery here instead of the process working directory.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = Some(dir.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Promote `image` into the cluster and point the workload at it.
    pub async fn update(&self, image: &ImageRef) -> Result<Deployed, DeployError> {
        let start = match self.search_dir {
            Some(ref dir) => dir.clone(),
            None => std::env::current_dir().context(WorkingDirSnafu)?,
        };
        let project_root = find_project_root(&start, &self.config.marker)?;
        tracing::info!(project_root = %project_root.display(), "Using project root");

        let local_image = image.local();
        let tools = &self.config.tools;
        let workload = &self.config.workload;
        let mut diag = Diagnostics::default();

        tracing::info!(%image, "Pulling image");
        let pull = Invocation::new(&tools.image).args(["pull", image.as_str()]);
        if let Some(out) = settle(self.run_stage(Stage::Pull, pull).await, &mut diag)? {
            tracing::info!(output = %out.output.trim_end(), "Image pulled");
        }

        tracing::info!(%local_image, "Tagging image");
        let tag = Invocation::new(&tools.image).args(["tag", image.as_str(), local_image.as_str()]);
        if settle(self.run_stage(Stage::Tag, tag).await, &mut diag)?.is_some() {
            tracing::info!("Image tagged");
        }

        tracing::info!(cluster = %self.config.cluster_name, %local_image, "Loading image into cluster");
        let load = Invocation::new(&tools.cluster).args([
            "load",
            "docker-image",
            local_image.as_str(),
            "--name",
            self.config.cluster_name.as_str(),
        ]);
        if let Some(out) = settle(self.run_stage(Stage::Load, load).await, &mut diag)? {
            tracing::info!(output = %out.output.trim_end(), "Image loaded into cluster");
        }

        let set_image = Invocation::new(&tools.workload)
            .args(["set", "image"])
            .arg(workload.resource())
            .arg(workload.image_assignment(&local_image))
            .current_dir(&project_root);
        if let Some(out) = settle(self.run_stage(Stage::SetImage, set_image).await, &mut diag)? {
            tracing::info!(output = %out.output.trim_end(), "Deployment image updated");
        }

        let timeout = self.config.rollout_timeout;
        let rollout = Invocation::new(&tools.workload)
            .args(["rollout", "status"])
            .arg(workload.resource())
            .arg(format!("--timeout={}s", timeout.as_secs().max(1)))
            .current_dir(&project_root)
            .timeout(timeout + ROLLOUT_GRACE);
        if settle(self.run_stage(Stage::Rollout, rollout).await, &mut diag)?.is_some() {
            tracing::info!("Rollout complete");
        }

        Ok(Deployed {
            image: image.clone(),
            local_image,
            project_root,
            warnings: diag.into_warnings(),
        })
    }

    async fn run_stage(
        &self,
        stage: Stage,
        invocation: Invocation,
    ) -> Result<CommandOutput, DeployError> {
        tracing::debug!(stage = stage.as_str(), command = %invocation, "Running stage");

        match self.runner.run(&invocation).await {
            Ok(output) if output.success() => Ok(output),
            Ok(output) => ToolSnafu {
                stage,
                detail: format!(
                    "{}, output: {}",
                    describe_exit(output.exit_code),
                    output.output
                ),
            }
            .fail(),
            Err(e) => ToolSnafu {
                stage,
                detail: e.to_string(),
            }
            .fail(),
        }
    }
}

/// Propagate failures of fatal stages; record the rest as warnings.
fn settle(
    result: Result<CommandOutput, DeployError>,
    diag: &mut Diagnostics,
) -> Result<Option<CommandOutput>, DeployError> {
    match result {
        Ok(output) => Ok(Some(output)),
        Err(e) if e.stage().is_fatal() => Err(e),
        Err(e) => {
            diag.warn(Warning::rollout_status(e.to_string()));
            Ok(None)
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}
