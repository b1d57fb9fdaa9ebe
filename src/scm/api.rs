// ABOUTME: Capability trait for the SCM deployment API.
// ABOUTME: Lets the publish flow run against HTTP or an in-memory fake.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;
use tokio::fs::File;

use super::ScmError;
use crate::site::DeploymentRecord;
use crate::types::ArchiveKind;

/// Status code and reason phrase of a status poll response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub status: StatusCode,
    pub reason: String,
}

impl StatusLine {
    /// Build a status line using the standard reason phrase for the code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        StatusCode::from_u16(code).ok().map(Self::new)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.reason)
    }
}

/// Deployment operations offered by an app's SCM endpoint.
#[async_trait]
pub trait ScmApi: Send + Sync {
    /// Upload an archive for asynchronous deployment.
    ///
    /// The file handle is consumed and closed once the request body is sent.
    async fn upload(
        &self,
        kind: ArchiveKind,
        archive: File,
        len: u64,
    ) -> Result<StatusCode, ScmError>;

    /// Probe the status of the most recent deployment.
    async fn deployment_status(&self) -> Result<StatusLine, ScmError>;

    /// Fetch the most recent deployment record, if the endpoint reports one.
    async fn latest_deployment(&self) -> Result<Option<DeploymentRecord>, ScmError>;
}
