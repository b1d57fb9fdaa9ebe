// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scmpush")]
#[command(about = "Publish ZIP, WAR and JAR archives to a web app's SCM endpoint")]
#[command(version)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a scmpush.yml configuration file
    Init {
        /// Web app name
        #[arg(long)]
        app: Option<String>,

        /// SCM endpoint of the app (defaults to the azurewebsites.net address)
        #[arg(long)]
        scm_uri: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Upload an archive and wait for the deployment to finish
    Publish {
        /// The archive to deploy. ZIP, WAR, and JAR are supported.
        archive_path: PathBuf,

        /// Deployment slot (defined in config)
        #[arg(short, long)]
        slot: Option<String>,

        /// Run the publish in the background and return immediately
        #[arg(long)]
        as_job: bool,
    },

    /// Show the latest deployment of the app
    Status {
        /// Deployment slot (defined in config)
        #[arg(short, long)]
        slot: Option<String>,
    },

    /// List background publish jobs
    Jobs,
}
