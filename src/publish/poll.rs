// ABOUTME: Bounded status polling as an explicit state machine.
// ABOUTME: Sleeping is injected so the loop can be driven without real delays.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::diagnostics::Warning;
use crate::scm::{ScmApi, ScmError, StatusLine};

/// Pause before every status request.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Attempt ceiling; with the default interval this bounds the wait to 20 minutes.
pub const DEFAULT_MAX_POLLS: u32 = 600;

/// Interval and attempt ceiling for the status loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLLS,
        }
    }
}

impl PollPolicy {
    /// Longest time spent sleeping before the loop gives up.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// What a single status response says about the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentStatus {
    /// `202 Accepted`: still being processed.
    InProgress,
    /// `200 OK`: finished successfully.
    Succeeded,
    /// Any other status: finished unsuccessfully.
    Failed(StatusLine),
}

impl DeploymentStatus {
    pub fn classify(line: StatusLine) -> Self {
        match line.status {
            StatusCode::ACCEPTED => DeploymentStatus::InProgress,
            StatusCode::OK => DeploymentStatus::Succeeded,
            _ => DeploymentStatus::Failed(line),
        }
    }
}

/// Position of the status loop after some number of polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Pending { attempts: u32 },
    Succeeded { attempts: u32 },
    FailedTerminal { attempts: u32, status: StatusLine },
    TimedOut { attempts: u32 },
}

impl PollState {
    pub fn start() -> Self {
        PollState::Pending { attempts: 0 }
    }

    /// Fold one status response into the state. Settled states never change.
    pub fn advance(self, status: DeploymentStatus, policy: &PollPolicy) -> Self {
        let PollState::Pending { attempts } = self else {
            return self;
        };
        let attempts = attempts + 1;

        match status {
            DeploymentStatus::InProgress if attempts >= policy.max_attempts => {
                PollState::TimedOut { attempts }
            }
            DeploymentStatus::InProgress => PollState::Pending { attempts },
            DeploymentStatus::Succeeded => PollState::Succeeded { attempts },
            DeploymentStatus::Failed(status) => PollState::FailedTerminal { attempts, status },
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            PollState::Pending { attempts }
            | PollState::Succeeded { attempts }
            | PollState::FailedTerminal { attempts, .. }
            | PollState::TimedOut { attempts } => *attempts,
        }
    }

    /// The final outcome, or `None` while still pending.
    pub fn outcome(&self) -> Option<PollOutcome> {
        match self {
            PollState::Pending { .. } => None,
            PollState::Succeeded { attempts } => Some(PollOutcome::Succeeded {
                attempts: *attempts,
            }),
            PollState::FailedTerminal { attempts, status } => Some(PollOutcome::Failed {
                attempts: *attempts,
                status: status.status.as_u16(),
                reason: status.reason.clone(),
            }),
            PollState::TimedOut { attempts } => Some(PollOutcome::TimedOut {
                attempts: *attempts,
            }),
        }
    }
}

/// How the status loop ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PollOutcome {
    Succeeded {
        attempts: u32,
    },
    Failed {
        attempts: u32,
        status: u16,
        reason: String,
    },
    TimedOut {
        attempts: u32,
    },
}

impl PollOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Succeeded { attempts }
            | PollOutcome::Failed { attempts, .. }
            | PollOutcome::TimedOut { attempts } => *attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Succeeded { .. })
    }

    /// Warning to surface for this outcome; success is silent.
    pub fn warning(&self) -> Option<Warning> {
        match self {
            PollOutcome::Succeeded { .. } => None,
            PollOutcome::TimedOut { .. } => Some(Warning::poll_timeout()),
            PollOutcome::Failed { status, reason, .. } => {
                Some(Warning::deployment_failed(*status, reason))
            }
        }
    }
}

/// Source of the pause between status polls.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleep, probe, repeat until the deployment settles or the ceiling is hit.
///
/// Every probe is preceded by one interval, so a deployment that finishes
/// after `k` in-progress answers costs `k + 1` requests and sleeps.
///
/// # Errors
///
/// A transport failure on any probe ends the loop immediately.
pub async fn poll_until_settled<A, Z>(
    api: &A,
    policy: &PollPolicy,
    sleeper: &Z,
) -> Result<PollOutcome, ScmError>
where
    A: ScmApi + ?Sized,
    Z: Sleeper + ?Sized,
{
    let mut state = PollState::start();

    loop {
        sleeper.sleep(policy.interval).await;
        let line = api.deployment_status().await?;
        info!(
            attempt = state.attempts() + 1,
            max = policy.max_attempts,
            "deployment status {}",
            line
        );

        state = state.advance(DeploymentStatus::classify(line), policy);
        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }
    }
}
