// ABOUTME: Deployable archive reference and its deployment kind.
// ABOUTME: The kind is chosen by file extension: war, or zip/jar.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchiveKindError {
    #[error("archive path cannot be empty")]
    EmptyPath,

    #[error("unknown archive type: {0} (expected .zip, .war or .jar)")]
    Unknown(PathBuf),
}

/// How the SCM endpoint ingests an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Java web archive, unpacked by the server into the web root as an application.
    War,
    /// ZIP (or JAR) archive extracted as the site content.
    Zip,
}

impl ArchiveKind {
    /// Select the kind from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, ArchiveKindError> {
        if path.as_os_str().is_empty() {
            return Err(ArchiveKindError::EmptyPath);
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("war") => Ok(ArchiveKind::War),
            Some("zip") | Some("jar") => Ok(ArchiveKind::Zip),
            _ => Err(ArchiveKindError::Unknown(path.to_path_buf())),
        }
    }

    /// Upload endpoint path, relative to the SCM base address.
    pub fn upload_path(&self) -> &'static str {
        match self {
            ArchiveKind::War => "/api/wardeploy?isAsync=true",
            ArchiveKind::Zip => "/api/zipdeploy?isAsync=true",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::War => write!(f, "war"),
            ArchiveKind::Zip => write!(f, "zip"),
        }
    }
}

/// A local archive whose kind has already been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    path: PathBuf,
    kind: ArchiveKind,
}

impl Archive {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ArchiveKindError> {
        let path = path.into();
        let kind = ArchiveKind::from_path(&path)?;
        Ok(Self { path, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }
}

impl fmt::Display for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
