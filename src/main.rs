// ABOUTME: Entry point for the scmpush CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use scmpush::config::{self, Config};
use scmpush::error::Result;
use scmpush::output::{Output, OutputMode};
use scmpush::publish::PublishError;
use scmpush::types::Archive;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli.command, mode).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, mode: OutputMode) -> Result<()> {
    let output = Output::new(mode);

    match command {
        Commands::Init {
            app,
            scm_uri,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, app.as_deref(), scm_uri.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Publish {
            archive_path,
            slot,
            as_job,
        } => {
            // Reject unknown archive types before anything else happens
            let archive = Archive::new(archive_path).map_err(PublishError::from)?;
            let config = load_config(slot.as_deref())?;
            commands::publish(config, archive, as_job, output).await
        }
        Commands::Status { slot } => {
            let config = load_config(slot.as_deref())?;
            commands::status(config, output).await
        }
        Commands::Jobs => commands::list_jobs(output),
    }
}

/// Discover the config in the working directory and apply the slot, if any.
fn load_config(slot: Option<&str>) -> Result<Config> {
    let cwd = env::current_dir()?;
    let config = Config::discover(&cwd)?;

    match slot {
        Some(name) => config.for_slot(name),
        None => Ok(config),
    }
}
