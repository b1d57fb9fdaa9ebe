// ABOUTME: Error types for SCM API calls.
// ABOUTME: Every variant is a transport-level failure and aborts the publish.

/// Errors from talking to the SCM endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or its response could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
