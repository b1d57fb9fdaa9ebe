// ABOUTME: Publishing credentials for an app's SCM endpoint.
// ABOUTME: Builds the HTTP Basic authorization value sent with every request.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

use crate::types::ScmUri;

/// Username/password pair plus the SCM address they unlock.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishingCredentials {
    username: String,
    password: String,
    scm_uri: ScmUri,
}

impl PublishingCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>, scm_uri: ScmUri) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            scm_uri,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn scm_uri(&self) -> &ScmUri {
        &self.scm_uri
    }

    /// `Authorization` header value: `Basic base64(username:password)`.
    pub fn authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

// Keep the password out of logs and error reports.
impl fmt::Debug for PublishingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishingCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("scm_uri", &self.scm_uri)
            .finish()
    }
}
