//! Name index port mapping names to pail identifiers.

use crate::pail::domain::{PailId, PailName};
use std::sync::Arc;
use thiserror::Error;

/// Result type for name index operations.
pub type NameIndexResult<T> = Result<T, NameIndexError>;

/// Name to pail mapping contract.
///
/// A name points at exactly one pail at a time; several names may point at
/// the same pail.
#[cfg_attr(test, mockall::automock)]
pub trait NameIndex: Send + Sync {
    /// Points `name` at `id`, replacing any previous mapping for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NameIndexError::NotALink`] when `name` is occupied by
    /// something other than a name, or [`NameIndexError::Io`] when the
    /// mapping cannot be written.
    fn set(&self, name: &PailName, id: PailId) -> NameIndexResult<()>;

    /// Removes the mapping for `name`.
    ///
    /// Returns `false` when `name` was not mapped.
    ///
    /// # Errors
    ///
    /// Returns [`NameIndexError::NotALink`] when `name` is occupied by
    /// something other than a name.
    fn remove(&self, name: &PailName) -> NameIndexResult<bool>;

    /// Returns the pail `name` currently points at.
    ///
    /// Returns `None` when `name` is not mapped.
    fn resolve(&self, name: &PailName) -> NameIndexResult<Option<PailId>>;

    /// Returns every name currently pointing at `id`, sorted.
    fn links_for(&self, id: PailId) -> NameIndexResult<Vec<PailName>>;

    /// Returns `true` when anything occupies `name`, mapped or not.
    fn is_taken(&self, name: &PailName) -> NameIndexResult<bool>;
}

/// Errors returned by name index implementations.
#[derive(Debug, Clone, Error)]
pub enum NameIndexError {
    /// The name is occupied by an entry that is not a name mapping.
    #[error("'{0}' exists but is not a pail name")]
    NotALink(PailName),

    /// An underlying filesystem operation failed.
    #[error("i/o failure for name '{name}': {cause}")]
    Io {
        /// Name the operation targeted.
        name: String,
        /// Underlying failure.
        cause: Arc<std::io::Error>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NameIndexError {
    /// Wraps an I/O failure on a name, or on the root when `name` is empty.
    #[must_use]
    pub fn io(name: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            name: name.into(),
            cause: Arc::new(err),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
