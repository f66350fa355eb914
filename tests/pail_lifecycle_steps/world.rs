//! Shared world state for pail lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use pail::{
    config::PailConfig,
    pail::{
        adapters::fs::{FsPailRepository, SymlinkNameIndex},
        domain::{PailDocument, PailId},
        services::{PailStore, PailStoreResult},
    },
};
use rstest::fixture;
use tempfile::TempDir;

/// Store type used by the BDD world.
pub type WorldStore = PailStore<FsPailRepository, SymlinkNameIndex, DefaultClock>;

/// Scenario world for pail lifecycle behaviour tests.
pub struct PailWorld {
    _temp: TempDir,
    pub store: WorldStore,
    pub current: Option<PailDocument>,
    pub named: HashMap<String, PailId>,
    pub last_result: Option<PailStoreResult<PailDocument>>,
}

impl PailWorld {
    /// Creates a world over a fresh temporary root.
    #[must_use]
    pub fn new() -> Self {
        let temp = TempDir::new().expect("temporary directory should be created");
        let path = Utf8PathBuf::try_from(temp.path().to_path_buf())
            .expect("temporary directory path should be UTF-8");
        let config = PailConfig::new(path.join("pails"));
        let store = PailStore::new(
            Arc::new(FsPailRepository::new(&config)),
            Arc::new(SymlinkNameIndex::new(&config)),
            Arc::new(DefaultClock),
        );

        Self {
            _temp: temp,
            store,
            current: None,
            named: HashMap::new(),
            last_result: None,
        }
    }

    /// Returns the id of the pail the scenario is working on.
    pub fn current_id(&self) -> Result<PailId, eyre::Report> {
        let document = self
            .current
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no pail created in scenario world"))?;
        Ok(document.require_id()?)
    }
}

impl Default for PailWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PailWorld {
    PailWorld::default()
}
