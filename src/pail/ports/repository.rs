//! Repository port for pail document persistence.

use crate::pail::domain::{PailDocument, PailId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for pail repository operations.
pub type PailRepositoryResult<T> = Result<T, PailRepositoryError>;

/// Pail document persistence contract.
///
/// A record is stored at a location derived solely from its identifier.
/// Lookups treat a missing record as `None`, never as an error.
pub trait PailRepository: Send + Sync {
    /// Writes the full document for `id`, creating the record location when
    /// it does not exist yet and replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns [`PailRepositoryError`] when the document cannot be encoded
    /// or written.
    fn save(&self, id: PailId, document: &PailDocument) -> PailRepositoryResult<()>;

    /// Finds the document stored for `id`.
    ///
    /// Returns `None` when no record exists.
    fn find_by_id(&self, id: PailId) -> PailRepositoryResult<Option<PailDocument>>;

    /// Removes the record for `id` together with everything stored beneath
    /// it.
    ///
    /// Returns `false` when no record existed.
    fn remove(&self, id: PailId) -> PailRepositoryResult<bool>;

    /// Returns the identifiers of all stored records, sorted.
    fn list_ids(&self) -> PailRepositoryResult<Vec<PailId>>;
}

/// Errors returned by pail repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PailRepositoryError {
    /// An underlying filesystem operation failed.
    #[error("i/o failure for pail {id}: {cause}")]
    Io {
        /// Record the operation targeted.
        id: PailId,
        /// Underlying failure.
        cause: Arc<std::io::Error>,
    },

    /// The record root could not be accessed.
    #[error("i/o failure on pail root: {0}")]
    Root(Arc<std::io::Error>),

    /// A stored document is not valid JSON, or a document failed to encode.
    #[error("malformed document for pail {id}: {cause}")]
    Serialization {
        /// Record whose document is malformed.
        id: PailId,
        /// Underlying decode or encode failure.
        cause: Arc<serde_json::Error>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PailRepositoryError {
    /// Wraps an I/O failure on a record.
    #[must_use]
    pub fn io(id: PailId, err: std::io::Error) -> Self {
        Self::Io {
            id,
            cause: Arc::new(err),
        }
    }

    /// Wraps an I/O failure on the record root.
    #[must_use]
    pub fn root(err: std::io::Error) -> Self {
        Self::Root(Arc::new(err))
    }

    /// Wraps an encoding or decoding failure.
    #[must_use]
    pub fn serialization(id: PailId, err: serde_json::Error) -> Self {
        Self::Serialization {
            id,
            cause: Arc::new(err),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
