// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be reported.

/// Collects non-fatal warnings during a pipeline run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a rollout status warning.
    pub fn rollout_status(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::RolloutStatus,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Rollout did not report completion; the image update is already applied.
    RolloutStatus,
}
