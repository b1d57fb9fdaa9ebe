// ABOUTME: Access to a web app's SCM deployment API.
// ABOUTME: Exports the ScmApi capability trait and its HTTP implementation.

mod api;
mod client;
mod error;

pub use api::{ScmApi, StatusLine};
pub use client::{DEPLOYMENT_STATUS_PATH, ScmClient, UPLOAD_CONTENT_TYPE};
pub use error::ScmError;
