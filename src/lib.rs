// ABOUTME: Library root for scmpush - exposes the publish flow and its parts.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod credentials;
pub mod diagnostics;
pub mod error;
pub mod jobs;
pub mod output;
pub mod publish;
pub mod scm;
pub mod site;
pub mod types;
