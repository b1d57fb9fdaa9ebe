// ABOUTME: Background publish jobs for the CLI's --as-job mode.
// ABOUTME: Re-launches scmpush detached and keeps job records under .scmpush/jobs/.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::site::SiteIdentity;

/// Job records and logs, relative to the project directory.
pub const JOBS_DIR: &str = ".scmpush/jobs";

/// Set in the environment of a detached publish so it can tell it is a job.
pub const JOB_ID_ENV_VAR: &str = "SCMPUSH_JOB_ID";

/// Who started a background publish, and what it publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub id: String,
    /// Process ID of the detached publish.
    pub pid: u32,
    /// Hostname of the machine running the job.
    pub holder: String,
    pub started_at: DateTime<Utc>,
    pub app: String,
    #[serde(default)]
    pub slot: Option<String>,
    pub archive: PathBuf,
}

impl JobInfo {
    pub fn new(id: String, pid: u32, identity: &SiteIdentity, archive: &Path) -> Self {
        Self {
            id,
            pid,
            holder: gethostname::gethostname().to_string_lossy().into_owned(),
            started_at: Utc::now(),
            app: identity.app.to_string(),
            slot: identity.slot.as_ref().map(ToString::to_string),
            archive: archive.to_path_buf(),
        }
    }
}

/// Job ids sort by start time; the pid keeps ids from one second apart.
pub fn new_job_id(now: DateTime<Utc>) -> String {
    format!("{}-{}", now.format("%Y%m%dT%H%M%S"), std::process::id())
}

/// On-disk store of job records and logs.
#[derive(Debug, Clone)]
pub struct JobStore {
    dir: PathBuf,
}

impl JobStore {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            dir: project_dir.join(JOBS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    pub fn log_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.log"))
    }

    pub fn save(&self, info: &JobInfo) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(info)?;
        std::fs::write(self.record_path(&info.id), json)?;
        Ok(())
    }

    /// All readable job records, newest first. Corrupt records are skipped.
    pub fn list(&self) -> Result<Vec<JobInfo>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut jobs = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let parsed = std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|content| serde_json::from_str::<JobInfo>(&content).map_err(Error::from));
            match parsed {
                Ok(info) => jobs.push(info),
                Err(e) => tracing::warn!("Skipping job record {}: {}", path.display(), e),
            }
        }

        jobs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(jobs)
    }

    /// Launch `program args...` detached, logging to the job's log file.
    ///
    /// The child gets no stdin and its own process group, so it outlives the
    /// terminal that started it. Returns once the child is running.
    pub async fn spawn_detached(
        &self,
        program: &Path,
        args: &[OsString],
        identity: &SiteIdentity,
        archive: &Path,
    ) -> Result<JobInfo> {
        std::fs::create_dir_all(&self.dir)?;

        let id = new_job_id(Utc::now());
        let log = std::fs::File::create(self.log_path(&id))?;
        let log_err = log.try_clone()?;

        let mut command = Command::new(program);
        command
            .args(args)
            .env(JOB_ID_ENV_VAR, &id)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err));
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn()?;
        let pid = child
            .id()
            .ok_or_else(|| Error::Job("background publish exited before it started".to_string()))?;

        tracing::info!("Started background publish {} (pid {})", id, pid);

        let info = JobInfo::new(id, pid, identity, archive);
        self.save(&info)?;
        Ok(info)
    }
}
