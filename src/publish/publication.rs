// ABOUTME: Publication struct and its state transitions.
// ABOUTME: Each transition consumes self and returns the next state on success.

use std::path::PathBuf;
use tokio::fs::File;
use tracing::{debug, info};

use super::error::PublishError;
use super::poll::{PollPolicy, Sleeper, poll_until_settled};
use super::state::{Prepared, Settled, Uploaded};
use crate::diagnostics::Diagnostics;
use crate::scm::ScmApi;
use crate::site::{SiteDescriptor, SiteIdentity};
use crate::types::Archive;

/// One archive publish to one app, parameterized by its current state.
#[derive(Debug)]
pub struct Publication<S> {
    pub(crate) identity: SiteIdentity,
    pub(crate) archive: Archive,
    pub(crate) state: S,
}

impl<S> Publication<S> {
    pub fn identity(&self) -> &SiteIdentity {
        &self.identity
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn transition<T>(self, state: T) -> Publication<T> {
        Publication {
            identity: self.identity,
            archive: self.archive,
            state,
        }
    }
}

// =============================================================================
// Prepared -> Uploaded
// =============================================================================

impl Publication<Prepared> {
    /// Validate the archive kind. Nothing touches the network or the file yet.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidArchive` for an empty path or an extension
    /// other than zip, war or jar.
    pub fn prepare(
        identity: SiteIdentity,
        archive_path: impl Into<PathBuf>,
    ) -> Result<Self, PublishError> {
        let archive = Archive::new(archive_path)?;
        Ok(Self::new(identity, archive))
    }

    pub fn new(identity: SiteIdentity, archive: Archive) -> Self {
        Publication {
            identity,
            archive,
            state: Prepared,
        }
    }

    /// Stream the archive to the deploy endpoint matching its kind.
    ///
    /// The upload response is recorded but not judged; the status loop decides
    /// whether the deployment worked.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveUnreadable`/`NotAFile` if the file cannot be opened, or
    /// `Upload` if the request fails at the transport level.
    #[must_use = "publication state must be used"]
    pub async fn upload<A: ScmApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<Publication<Uploaded>, PublishError> {
        let path = self.archive.path();
        let unreadable = |source| PublishError::ArchiveUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).await.map_err(unreadable)?;
        let metadata = file.metadata().await.map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(PublishError::NotAFile(path.to_path_buf()));
        }

        info!(
            archive = %self.archive,
            kind = %self.archive.kind(),
            bytes = metadata.len(),
            "uploading archive to {}",
            self.identity.display_name()
        );

        let upload_status = api
            .upload(self.archive.kind(), file, metadata.len())
            .await
            .map_err(PublishError::Upload)?;
        debug!("upload returned {}", upload_status);

        Ok(self.transition(Uploaded { upload_status }))
    }
}

// =============================================================================
// Uploaded -> Settled
// =============================================================================

impl Publication<Uploaded> {
    /// Poll the deployment status until it settles or the ceiling is reached.
    ///
    /// A timeout or a non-success terminal status is recorded in `diagnostics`
    /// and does not fail the transition.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::StatusPoll` if a status request fails outright.
    #[must_use = "publication state must be used"]
    pub async fn await_completion<A, Z>(
        self,
        api: &A,
        policy: &PollPolicy,
        sleeper: &Z,
        diagnostics: &mut Diagnostics,
    ) -> Result<Publication<Settled>, PublishError>
    where
        A: ScmApi + ?Sized,
        Z: Sleeper + ?Sized,
    {
        let outcome = poll_until_settled(api, policy, sleeper)
            .await
            .map_err(PublishError::StatusPoll)?;

        if let Some(warning) = outcome.warning() {
            diagnostics.warn(warning);
        }

        Ok(self.transition(Settled { outcome }))
    }
}

// =============================================================================
// Settled -> SiteDescriptor
// =============================================================================

impl Publication<Settled> {
    /// Fetch the current app state. Runs whatever the status loop concluded.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Describe` if the SCM endpoint is unreachable.
    pub async fn describe<A: ScmApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<SiteDescriptor, PublishError> {
        let latest = api
            .latest_deployment()
            .await
            .map_err(PublishError::Describe)?;

        Ok(SiteDescriptor::new(
            &self.identity,
            Some(self.state.outcome),
            latest,
        ))
    }
}

/// Run a prepared publication to the end: upload, wait, describe.
///
/// # Errors
///
/// Any fatal step aborts the run; see the individual transitions.
pub async fn publish<A, Z>(
    api: &A,
    sleeper: &Z,
    policy: &PollPolicy,
    publication: Publication<Prepared>,
    diagnostics: &mut Diagnostics,
) -> Result<SiteDescriptor, PublishError>
where
    A: ScmApi + ?Sized,
    Z: Sleeper + ?Sized,
{
    publication
        .upload(api)
        .await?
        .await_completion(api, policy, sleeper, diagnostics)
        .await?
        .describe(api)
        .await
}
