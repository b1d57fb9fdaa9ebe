// ABOUTME: Archive publish flow using the type state pattern.
// ABOUTME: Prepare, upload, await completion, then describe the resulting app.

mod error;
mod job;
mod poll;
mod publication;
mod state;

pub use error::PublishError;
pub use job::{JobReport, PublishJob};
pub use poll::{
    DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL, DeploymentStatus, PollOutcome, PollPolicy,
    PollState, Sleeper, TokioSleeper, poll_until_settled,
};
pub use publication::{Publication, publish};
pub use state::{Prepared, Settled, Uploaded};
