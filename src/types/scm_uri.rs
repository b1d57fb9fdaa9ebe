// ABOUTME: Base address of a web app's SCM (deployment) endpoint.
// ABOUTME: Parsed as a URL, normalized, then used to build the deployment API URLs.

use std::fmt;
use thiserror::Error;
use url::{ParseError, Url};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScmUriError {
    #[error("SCM URI cannot be empty")]
    Empty,

    #[error("SCM URI must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("SCM URI has no host: {0}")]
    MissingHost(String),

    #[error("SCM URI cannot carry a query or fragment: {0}")]
    UnexpectedSuffix(String),

    #[error("invalid SCM URI {input}: {reason}")]
    Invalid { input: String, reason: ParseError },
}

/// An http(s) base address without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScmUri(Url);

impl ScmUri {
    pub fn parse(input: &str) -> Result<Self, ScmUriError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ScmUriError::Empty);
        }

        let url = Url::parse(input).map_err(|reason| match reason {
            ParseError::RelativeUrlWithoutBase => ScmUriError::UnsupportedScheme(input.to_string()),
            ParseError::EmptyHost => ScmUriError::MissingHost(input.to_string()),
            reason => ScmUriError::Invalid {
                input: input.to_string(),
                reason,
            },
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScmUriError::UnsupportedScheme(input.to_string()));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ScmUriError::MissingHost(input.to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ScmUriError::UnexpectedSuffix(input.to_string()));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Append an absolute API path (`/api/...`) to the base address.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.as_str(), path)
    }
}

impl fmt::Display for ScmUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
