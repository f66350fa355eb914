//! In-memory pail repository for service tests.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::pail::{
    domain::{PailDocument, PailId},
    ports::{PailRepository, PailRepositoryError, PailRepositoryResult},
};

/// Thread-safe in-memory pail repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPailRepository {
    documents: Arc<RwLock<BTreeMap<PailId, PailDocument>>>,
}

impl InMemoryPailRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> PailRepositoryError {
    PailRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl PailRepository for InMemoryPailRepository {
    fn save(&self, id: PailId, document: &PailDocument) -> PailRepositoryResult<()> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert(id, document.clone());
        Ok(())
    }

    fn find_by_id(&self, id: PailId) -> PailRepositoryResult<Option<PailDocument>> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.get(&id).cloned())
    }

    fn remove(&self, id: PailId) -> PailRepositoryResult<bool> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        Ok(documents.remove(&id).is_some())
    }

    fn list_ids(&self) -> PailRepositoryResult<Vec<PailId>> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.keys().copied().collect())
    }
}
