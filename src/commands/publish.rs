// ABOUTME: Publish command implementation.
// ABOUTME: Runs upload, status polling and app lookup, or hands them to a background job.

use scmpush::config::Config;
use scmpush::diagnostics::Diagnostics;
use scmpush::error::Result;
use scmpush::jobs::{JOB_ID_ENV_VAR, JobStore};
use scmpush::output::Output;
use scmpush::publish::{PollPolicy, Publication, TokioSleeper};
use scmpush::scm::ScmClient;
use scmpush::types::Archive;
use std::env;
use std::ffi::OsString;

/// Publish an archive to the configured app (or slot).
pub async fn publish(
    config: Config,
    archive: Archive,
    as_job: bool,
    mut output: Output,
) -> Result<()> {
    let publication = Publication::new(config.identity(), archive);
    let credentials = config.resolve_credentials()?;

    if as_job {
        return start_job(&config, publication.archive(), &output).await;
    }

    output.start_timer();
    if let Ok(job_id) = env::var(JOB_ID_ENV_VAR) {
        tracing::info!("running as background job {}", job_id);
    }
    let policy = PollPolicy::default();
    let mut diag = Diagnostics::default();
    let client = ScmClient::new(&credentials)?;

    output.progress(&format!(
        "Publishing {} to {} ({} deploy)",
        publication.archive(),
        publication.identity().display_name(),
        publication.archive().kind()
    ));

    output.progress("  → Uploading archive...");
    let uploaded = publication.upload(&client).await?;

    output.progress(&format!(
        "  → Waiting for deployment (up to {} minutes)...",
        policy.max_wait().as_secs() / 60
    ));
    let settled = uploaded
        .await_completion(&client, &policy, &TokioSleeper, &mut diag)
        .await?;
    let succeeded = settled.state().outcome().is_success();

    output.progress("  → Fetching app state...");
    let site = settled.describe(&client).await?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    output.site(&site);

    if succeeded {
        output.success("Publish complete!");
    } else {
        output.success("Publish finished with warnings");
    }
    Ok(())
}

/// Re-launch this binary detached to run the same publish in the background.
async fn start_job(config: &Config, archive: &Archive, output: &Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let program = env::current_exe()?;
    let store = JobStore::new(&cwd);

    let args = job_args(archive, config);
    let job = store
        .spawn_detached(&program, &args, &config.identity(), archive.path())
        .await?;

    output.progress(&format!("Started job {} (pid {})", job.id, job.pid));
    output.progress(&format!("  → Log: {}", store.log_path(&job.id).display()));
    output.success(&format!("Job {} running in the background", job.id));
    Ok(())
}

/// Arguments for the detached publish: same archive and slot, JSON output and
/// debug logging into the job log.
fn job_args(archive: &Archive, config: &Config) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--json".into(),
        "--verbose".into(),
        "publish".into(),
        archive.path().as_os_str().to_owned(),
    ];
    if let Some(ref slot) = config.slot {
        args.push("--slot".into());
        args.push(slot.as_str().into());
    }
    args
}
