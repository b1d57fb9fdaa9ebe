// ABOUTME: Error types for the publish flow.
// ABOUTME: Only fatal failures live here; soft outcomes become warnings.

use std::path::PathBuf;

use crate::scm::ScmError;
use crate::types::ArchiveKindError;

/// Errors that abort a publish. No app descriptor is returned after any of these.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Archive path is empty or its extension is not zip, war or jar.
    #[error("invalid archive: {0}")]
    InvalidArchive(#[from] ArchiveKindError),

    /// The archive could not be opened or inspected.
    #[error("cannot read archive {path}: {source}")]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive path exists but is not a regular file.
    #[error("archive is not a regular file: {0}")]
    NotAFile(PathBuf),

    /// Sending the archive failed.
    #[error("upload failed: {0}")]
    Upload(#[source] ScmError),

    /// A status poll failed at the transport level.
    #[error("deployment status check failed: {0}")]
    StatusPoll(#[source] ScmError),

    /// Fetching the app state after the status loop failed.
    #[error("failed to fetch app state: {0}")]
    Describe(#[source] ScmError),

    /// A background publish task panicked or was cancelled.
    #[error("publish job failed: {0}")]
    Job(String),
}
