// ABOUTME: Command runner backed by real child processes.
// ABOUTME: Captures stdout and stderr and enforces an optional timeout.

use super::{CommandOutput, CommandRunner, Invocation, RunError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Spawns each invocation with `tokio::process` and waits for it to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, RunError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = invocation.workdir {
            cmd.current_dir(dir);
        }

        tracing::debug!(command = %invocation, workdir = ?invocation.workdir, "Running command");

        let child = cmd.spawn().map_err(|source| RunError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        // Dropping the wait future on timeout kills the child
        let output = match invocation.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| RunError::TimedOut {
                    program: invocation.program.clone(),
                    timeout,
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|source| RunError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            exit_code: output.status.code(),
            output: combined,
        })
    }
}
