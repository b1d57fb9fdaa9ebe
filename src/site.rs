// ABOUTME: Application descriptor returned after a publish.
// ABOUTME: Combines the target identity with the SCM's latest deployment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::publish::PollOutcome;
use crate::types::{AppName, ScmUri, SlotName};

/// Current state of the published web app, as seen after the status loop.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDescriptor {
    pub app: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    pub scm_uri: String,
    /// How the status loop ended; `None` when no publish ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PollOutcome>,
    pub latest_deployment: Option<DeploymentRecord>,
}

/// Identity of the publish target, carried through to the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    pub app: AppName,
    pub slot: Option<SlotName>,
    pub resource_group: Option<String>,
    pub scm_uri: ScmUri,
}

impl SiteIdentity {
    pub fn new(app: AppName, scm_uri: ScmUri) -> Self {
        Self {
            app,
            slot: None,
            resource_group: None,
            scm_uri,
        }
    }

    /// `app` or `app/slot`, for progress and log lines.
    pub fn display_name(&self) -> String {
        match &self.slot {
            Some(slot) => format!("{}/{}", self.app, slot),
            None => self.app.to_string(),
        }
    }
}

impl SiteDescriptor {
    pub fn new(
        identity: &SiteIdentity,
        outcome: Option<PollOutcome>,
        latest_deployment: Option<DeploymentRecord>,
    ) -> Self {
        Self {
            app: identity.app.to_string(),
            slot: identity.slot.as_ref().map(ToString::to_string),
            resource_group: identity.resource_group.clone(),
            scm_uri: identity.scm_uri.to_string(),
            outcome,
            latest_deployment,
        }
    }
}

/// Deployment entry reported by `GET /api/deployments/latest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentRecord {
    pub id: Option<String>,
    pub status: Option<i32>,
    pub status_text: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub deployer: Option<String>,
    pub message: Option<String>,
    pub progress: Option<String>,
    pub received_time: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub last_success_end_time: Option<DateTime<Utc>>,
    pub complete: bool,
    pub active: bool,
    pub is_temp: bool,
    pub is_readonly: bool,
    pub url: Option<String>,
    pub log_url: Option<String>,
    pub site_name: Option<String>,
}

/// Numeric deployment status codes used by the SCM service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    Pending,
    Building,
    Deploying,
    Failed,
    Success,
    Other(i32),
}

impl From<i32> for DeploymentState {
    fn from(code: i32) -> Self {
        match code {
            0 => DeploymentState::Pending,
            1 => DeploymentState::Building,
            2 => DeploymentState::Deploying,
            3 => DeploymentState::Failed,
            4 => DeploymentState::Success,
            other => DeploymentState::Other(other),
        }
    }
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentState::Pending => f.write_str("pending"),
            DeploymentState::Building => f.write_str("building"),
            DeploymentState::Deploying => f.write_str("deploying"),
            DeploymentState::Failed => f.write_str("failed"),
            DeploymentState::Success => f.write_str("success"),
            DeploymentState::Other(code) => write!(f, "status {code}"),
        }
    }
}

impl DeploymentRecord {
    pub fn state(&self) -> Option<DeploymentState> {
        self.status.map(DeploymentState::from)
    }
}
