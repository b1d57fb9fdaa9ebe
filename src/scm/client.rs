// ABOUTME: reqwest-backed client for the SCM deployment API.
// ABOUTME: Streams archives to the deploy endpoints and reads deployment status.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client, StatusCode};
use tokio::fs::File;
use tracing::debug;

use super::{ScmApi, ScmError, StatusLine};
use crate::credentials::PublishingCredentials;
use crate::site::DeploymentRecord;
use crate::types::{ArchiveKind, ScmUri};

/// Status of the most recent deployment; `202` while it is still running.
pub const DEPLOYMENT_STATUS_PATH: &str = "/api/deployments/latest";

/// Content type sent with the raw archive body.
///
/// The body is the archive bytes, not a multipart envelope. Deploy endpoints in
/// the field accept this pairing, so it is kept as-is for wire compatibility.
pub const UPLOAD_CONTENT_TYPE: &str = "multipart/form-data";

/// HTTP client bound to one app's SCM endpoint and credentials.
pub struct ScmClient {
    http: Client,
    scm_uri: ScmUri,
    authorization: String,
}

impl std::fmt::Debug for ScmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScmClient")
            .field("scm_uri", &self.scm_uri)
            .finish_non_exhaustive()
    }
}

impl ScmClient {
    pub fn new(credentials: &PublishingCredentials) -> Result<Self, ScmError> {
        let http = Client::builder()
            .user_agent(concat!("scmpush/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ScmError::Client)?;
        debug!(
            "SCM client for {} as {}",
            credentials.scm_uri(),
            credentials.username()
        );

        Ok(Self {
            http,
            scm_uri: credentials.scm_uri().clone(),
            authorization: credentials.authorization(),
        })
    }

    pub fn upload_url(&self, kind: ArchiveKind) -> String {
        self.scm_uri.join(kind.upload_path())
    }

    pub fn status_url(&self) -> String {
        self.scm_uri.join(DEPLOYMENT_STATUS_PATH)
    }

    async fn get_status(&self) -> Result<reqwest::Response, ScmError> {
        let url = self.status_url();
        debug!("GET {}", url);

        self.http
            .get(&url)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(|source| ScmError::Request { url, source })
    }
}

#[async_trait]
impl ScmApi for ScmClient {
    async fn upload(
        &self,
        kind: ArchiveKind,
        archive: File,
        len: u64,
    ) -> Result<StatusCode, ScmError> {
        let url = self.upload_url(kind);
        debug!("POST {} ({} bytes)", url, len);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, UPLOAD_CONTENT_TYPE)
            .header(CONTENT_LENGTH, len)
            .body(Body::from(archive))
            .send()
            .await
            .map_err(|source| ScmError::Request { url, source })?;

        debug!("upload answered {}", response.status());
        Ok(response.status())
    }

    async fn deployment_status(&self) -> Result<StatusLine, ScmError> {
        let response = self.get_status().await?;
        Ok(StatusLine::new(response.status()))
    }

    async fn latest_deployment(&self) -> Result<Option<DeploymentRecord>, ScmError> {
        let response = self.get_status().await?;
        let status = response.status();

        if !status.is_success() {
            debug!("no deployment record available ({})", status);
            return Ok(None);
        }

        let body = response.text().await.map_err(|source| ScmError::Request {
            url: self.status_url(),
            source,
        })?;

        match serde_json::from_str::<DeploymentRecord>(&body) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                debug!("unreadable deployment record: {}", e);
                Ok(None)
            }
        }
    }
}
