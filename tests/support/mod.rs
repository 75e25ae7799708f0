// ABOUTME: Test support utilities.
// ABOUTME: Provides a recording fake command runner and project directory helpers.

use async_trait::async_trait;
use deploy_hook::runner::{CommandOutput, CommandRunner, Invocation, RunError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("deploy_hook=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Create `k8s/deployment.yaml` under `dir`.
#[allow(dead_code)]
pub fn write_marker(dir: &Path) {
    fs::create_dir_all(dir.join("k8s")).unwrap();
    fs::write(
        dir.join("k8s/deployment.yaml"),
        "apiVersion: apps/v1\nkind: Deployment\n",
    )
    .unwrap();
}

#[derive(Debug, Clone)]
enum Reply {
    Exit(i32, String),
    TimedOut,
}

/// Records every invocation and answers from a script.
///
/// Replies are keyed by `"<program> <first arg>"`, e.g. `"docker pull"`.
/// Unscripted commands exit 0 with `ok` as output.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<Invocation>>,
    replies: HashMap<String, Reply>,
}

#[allow(dead_code)]
impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, key: &str, code: i32, output: &str) -> Self {
        self.replies
            .insert(key.to_string(), Reply::Exit(code, output.to_string()));
        self
    }

    pub fn time_out(mut self, key: &str) -> Self {
        self.replies.insert(key.to_string(), Reply::TimedOut);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, RunError> {
        self.calls.lock().push(invocation.clone());

        let key = match invocation.args.first() {
            Some(first) => format!("{} {}", invocation.program, first),
            None => invocation.program.clone(),
        };

        match self.replies.get(&key) {
            Some(Reply::Exit(code, output)) => Ok(CommandOutput {
                exit_code: Some(*code),
                output: output.clone(),
            }),
            Some(Reply::TimedOut) => Err(RunError::TimedOut {
                program: invocation.program.clone(),
                timeout: invocation.timeout.unwrap_or(Duration::from_secs(70)),
            }),
            None => Ok(CommandOutput {
                exit_code: Some(0),
                output: "ok\n".to_string(),
            }),
        }
    }
}
