//! Port contracts for pail persistence and naming.
//!
//! Ports define infrastructure-agnostic interfaces used by pail services.

pub mod name_index;
pub mod repository;

pub use name_index::{NameIndex, NameIndexError, NameIndexResult};
pub use repository::{PailRepository, PailRepositoryError, PailRepositoryResult};

#[cfg(test)]
pub use name_index::MockNameIndex;
