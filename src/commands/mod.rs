// ABOUTME: Command module aggregator for the scmpush CLI.
// ABOUTME: Re-exports publish, status and jobs command handlers.

mod jobs;
mod publish;
mod status;

pub use jobs::list_jobs;
pub use publish::publish;
pub use status::status;
