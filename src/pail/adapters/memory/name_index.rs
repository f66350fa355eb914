//! In-memory name index for service tests.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::pail::{
    domain::{PailId, PailName},
    ports::{NameIndex, NameIndexError, NameIndexResult},
};

/// Thread-safe in-memory name index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNameIndex {
    names: Arc<RwLock<BTreeMap<PailName, PailId>>>,
}

impl InMemoryNameIndex {
    /// Creates an empty in-memory name index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> NameIndexError {
    NameIndexError::persistence(std::io::Error::other(err.to_string()))
}

impl NameIndex for InMemoryNameIndex {
    fn set(&self, name: &PailName, id: PailId) -> NameIndexResult<()> {
        let mut names = self.names.write().map_err(poisoned)?;
        names.insert(name.clone(), id);
        Ok(())
    }

    fn remove(&self, name: &PailName) -> NameIndexResult<bool> {
        let mut names = self.names.write().map_err(poisoned)?;
        Ok(names.remove(name).is_some())
    }

    fn resolve(&self, name: &PailName) -> NameIndexResult<Option<PailId>> {
        let names = self.names.read().map_err(poisoned)?;
        Ok(names.get(name).copied())
    }

    fn links_for(&self, id: PailId) -> NameIndexResult<Vec<PailName>> {
        let names = self.names.read().map_err(poisoned)?;
        Ok(names
            .iter()
            .filter(|(_, target)| **target == id)
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn is_taken(&self, name: &PailName) -> NameIndexResult<bool> {
        let names = self.names.read().map_err(poisoned)?;
        Ok(names.contains_key(name))
    }
}
