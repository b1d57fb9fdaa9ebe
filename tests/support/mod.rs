// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory SCM endpoint and a recording sleeper.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use scmpush::publish::Sleeper;
use scmpush::scm::{ScmApi, ScmError, StatusLine};
use scmpush::site::DeploymentRecord;
use scmpush::types::ArchiveKind;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("scmpush=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Everything the fake endpoint and sleeper observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Upload {
        kind: ArchiveKind,
        len: u64,
        bytes: Vec<u8>,
    },
    Sleep(Duration),
    Status,
    Latest,
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Scripted SCM endpoint.
///
/// Status polls answer with the queued codes in order, then with
/// `default_status` once the queue is drained.
pub struct FakeScm {
    events: EventLog,
    statuses: Mutex<VecDeque<u16>>,
    default_status: u16,
    fail_upload: bool,
    fail_status: bool,
    fail_latest: bool,
    latest: Option<DeploymentRecord>,
}

impl FakeScm {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            statuses: Mutex::new(VecDeque::new()),
            default_status: 200,
            fail_upload: false,
            fail_status: false,
            fail_latest: false,
            latest: None,
        }
    }

    pub fn with_statuses(self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.statuses.lock().extend(codes);
        self
    }

    pub fn with_default_status(mut self, code: u16) -> Self {
        self.default_status = code;
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    /// Status probes fail at the transport level.
    pub fn failing_status(mut self) -> Self {
        self.fail_status = true;
        self
    }

    /// The deployment record lookup fails at the transport level.
    pub fn failing_latest(mut self) -> Self {
        self.fail_latest = true;
        self
    }

    pub fn with_latest(mut self, record: DeploymentRecord) -> Self {
        self.latest = Some(record);
        self
    }
}

#[async_trait]
impl ScmApi for FakeScm {
    async fn upload(
        &self,
        kind: ArchiveKind,
        mut archive: File,
        len: u64,
    ) -> Result<StatusCode, ScmError> {
        if self.fail_upload {
            return Err(transport_error().await);
        }

        let mut bytes = Vec::new();
        archive.read_to_end(&mut bytes).await.unwrap();
        self.events.lock().push(Event::Upload { kind, len, bytes });
        Ok(StatusCode::ACCEPTED)
    }

    async fn deployment_status(&self) -> Result<StatusLine, ScmError> {
        self.events.lock().push(Event::Status);
        if self.fail_status {
            return Err(transport_error().await);
        }
        let code = self
            .statuses
            .lock()
            .pop_front()
            .unwrap_or(self.default_status);
        Ok(StatusLine::from_code(code).unwrap())
    }

    async fn latest_deployment(&self) -> Result<Option<DeploymentRecord>, ScmError> {
        self.events.lock().push(Event::Latest);
        if self.fail_latest {
            return Err(transport_error().await);
        }
        Ok(self.latest.clone())
    }
}

/// Records requested sleeps instead of waiting.
pub struct RecordingSleeper {
    events: EventLog,
}

impl RecordingSleeper {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.events.lock().push(Event::Sleep(duration));
    }
}

/// A genuine reqwest transport error, produced without touching the network.
pub async fn transport_error() -> ScmError {
    let url = "http://".to_string();
    let source = reqwest::Client::new().get(&url).send().await.unwrap_err();
    ScmError::Request { url, source }
}

/// Write an archive with the given name and contents under `dir`.
pub fn write_archive(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn count(events: &[Event], wanted: fn(&Event) -> bool) -> usize {
    events.iter().filter(|e| wanted(e)).count()
}
