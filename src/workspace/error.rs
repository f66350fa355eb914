//! Error types for workspace and artifact operations.

use crate::pail::domain::PailId;
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Errors returned by [`super::WorkspaceHelper`].
#[derive(Debug, Clone, Error)]
pub enum WorkspaceError {
    /// A per-pail workspace was requested for a pail without a directory.
    #[error("pail {0} has no directory to hold a workspace")]
    PailNotFound(PailId),

    /// The copy target directory does not exist.
    #[error("artifact target directory '{0}' does not exist")]
    TargetMissing(Utf8PathBuf),

    /// The path is absolute, climbs out of the root, or the artifact name is
    /// not a single segment.
    #[error("invalid relative path '{0}'")]
    InvalidPath(String),

    /// An underlying filesystem operation failed.
    #[error("i/o failure at '{path}': {cause}")]
    Io {
        /// Path relative to the store root.
        path: Utf8PathBuf,
        /// Underlying failure.
        cause: Arc<std::io::Error>,
    },
}

impl WorkspaceError {
    /// Wraps an I/O failure at `path`.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            cause: Arc::new(err),
        }
    }
}
