//! Shared helpers for filesystem-backed store tests.

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultClock;
use pail::{
    config::PailConfig,
    pail::{
        adapters::fs::{FsPailRepository, SymlinkNameIndex},
        domain::PailName,
        services::PailStore,
    },
};
use rstest::fixture;
use std::sync::Arc;
use tempfile::TempDir;

/// Store type wired to the filesystem adapters.
pub type FsStore = PailStore<FsPailRepository, SymlinkNameIndex, DefaultClock>;

/// A temporary store root. The root itself is not created up front.
pub struct StoreSite {
    _temp: TempDir,
    /// Configuration pointing at the temporary root.
    pub config: PailConfig,
}

impl StoreSite {
    /// Returns the store root.
    pub fn root(&self) -> &Utf8Path {
        self.config.root()
    }

    /// Builds a store over this site.
    pub fn store(&self) -> FsStore {
        store_for(&self.config)
    }
}

/// Builds a filesystem-backed store for `config`.
pub fn store_for(config: &PailConfig) -> FsStore {
    PailStore::new(
        Arc::new(FsPailRepository::new(config)),
        Arc::new(SymlinkNameIndex::new(config)),
        Arc::new(DefaultClock),
    )
}

/// Provides a fresh temporary root for each test.
#[fixture]
pub fn site() -> StoreSite {
    let temp = TempDir::new().expect("temporary directory should be created");
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf())
        .expect("temporary directory path should be UTF-8");
    StoreSite {
        _temp: temp,
        config: PailConfig::new(path.join("pails")),
    }
}

/// Parses a name known to be valid.
pub fn name(raw: &str) -> PailName {
    PailName::new(raw).expect("test names are valid")
}
