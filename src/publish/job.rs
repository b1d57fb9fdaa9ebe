// ABOUTME: Runs a whole publish on a background tokio task.
// ABOUTME: The caller keeps control and collects the result when it wants it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

use super::error::PublishError;
use super::poll::{PollPolicy, Sleeper};
use super::publication::{Publication, publish};
use super::state::Prepared;
use crate::diagnostics::{Diagnostics, Warning};
use crate::scm::ScmApi;
use crate::site::SiteDescriptor;

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

/// Result of a finished background publish.
#[derive(Debug)]
pub struct JobReport {
    pub site: SiteDescriptor,
    pub warnings: Vec<Warning>,
}

/// Handle to a publish running on its own task.
#[derive(Debug)]
pub struct PublishJob {
    id: u64,
    handle: JoinHandle<Result<JobReport, PublishError>>,
}

impl PublishJob {
    /// Start the publish. Must be called from within a tokio runtime.
    pub fn spawn<A, Z>(
        api: Arc<A>,
        sleeper: Arc<Z>,
        policy: PollPolicy,
        publication: Publication<Prepared>,
    ) -> Self
    where
        A: ScmApi + 'static,
        Z: Sleeper + 'static,
    {
        let id = NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(async move {
            let mut diagnostics = Diagnostics::default();
            let site = publish(
                api.as_ref(),
                sleeper.as_ref(),
                &policy,
                publication,
                &mut diagnostics,
            )
            .await?;

            Ok(JobReport {
                site,
                warnings: diagnostics.warnings().to_vec(),
            })
        });

        tracing::debug!("started publish job {}", id);
        Self { id, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the publish to finish.
    ///
    /// # Errors
    ///
    /// Returns the publish's own error, or `PublishError::Job` if the task
    /// panicked or was aborted.
    pub async fn wait(self) -> Result<JobReport, PublishError> {
        self.handle
            .await
            .map_err(|e| PublishError::Job(e.to_string()))?
    }
}
