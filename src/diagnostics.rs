// ABOUTME: Diagnostics accumulator for non-fatal warnings during a publish.
// ABOUTME: Timeouts and failed deployments are reported here instead of aborting.

/// Collects non-fatal warnings during publish operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The attempt ceiling was reached while the deployment was still running.
    pub fn poll_timeout() -> Self {
        Self {
            kind: WarningKind::PollTimeout,
            message: "Maximum status polling time exceeded. Deployment is still in progress."
                .to_string(),
        }
    }

    /// The status endpoint settled on something other than `200 OK`.
    pub fn deployment_failed(status: u16, reason: &str) -> Self {
        Self {
            kind: WarningKind::DeploymentFailed,
            message: format!("Deployment failed with status code={status} reason={reason}"),
        }
    }
}

/// Categories of warnings that can occur during a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Polling stopped at the attempt ceiling; the deployment may still finish.
    PollTimeout,
    /// The deployment finished with a non-success status.
    DeploymentFailed,
}
