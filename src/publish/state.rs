// ABOUTME: Publication state types for the type state pattern.
// ABOUTME: Later states carry what the previous step learned.

use reqwest::StatusCode;

use super::PollOutcome;

/// Archive validated, nothing sent yet.
/// Available actions: `upload()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Prepared;

/// Archive accepted for upload by the SCM endpoint.
/// Available actions: `await_completion()`
#[derive(Debug, Clone, Copy)]
pub struct Uploaded {
    pub(crate) upload_status: StatusCode,
}

impl Uploaded {
    /// Status the upload request answered with. Not used to judge success.
    pub fn upload_status(&self) -> StatusCode {
        self.upload_status
    }
}

/// Status loop finished, one way or another.
/// Available actions: `describe()`
#[derive(Debug, Clone)]
pub struct Settled {
    pub(crate) outcome: PollOutcome,
}

impl Settled {
    pub fn outcome(&self) -> &PollOutcome {
        &self.outcome
    }
}
