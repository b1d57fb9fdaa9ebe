// ABOUTME: Jobs command implementation.
// ABOUTME: Lists background publishes started with --as-job.

use scmpush::error::Result;
use scmpush::jobs::JobStore;
use scmpush::output::{Output, OutputMode};
use std::env;

pub fn list_jobs(output: Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let store = JobStore::new(&cwd);
    let jobs = store.list()?;

    if output.mode() == OutputMode::Json {
        for job in &jobs {
            println!("{}", serde_json::to_string(job)?);
        }
        return Ok(());
    }

    if jobs.is_empty() {
        output.success("No background jobs");
        return Ok(());
    }

    for job in &jobs {
        let target = match job.slot {
            Some(ref slot) => format!("{}/{}", job.app, slot),
            None => job.app.clone(),
        };
        println!(
            "{}  pid {}  {}  {}  {}",
            job.id,
            job.pid,
            job.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            target,
            job.archive.display()
        );
    }
    Ok(())
}
