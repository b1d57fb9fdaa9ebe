// ABOUTME: Validated domain types for publish targets and archives.
// ABOUTME: Parsing happens once at the boundary so the rest of the crate trusts its inputs.

mod app_name;
mod archive;
mod scm_uri;

pub use app_name::{AppName, NameError, SlotName};
pub use archive::{Archive, ArchiveKind, ArchiveKindError};
pub use scm_uri::{ScmUri, ScmUriError};
