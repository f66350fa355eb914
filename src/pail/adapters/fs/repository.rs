//! Directory-per-record pail repository.

use crate::{
    config::PailConfig,
    filesystem::{self, EntryKind, RootDir},
    pail::{
        domain::{PailDocument, PailId},
        ports::{PailRepository, PailRepositoryError, PailRepositoryResult},
    },
};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

/// Indentation of stored documents, matching files written by earlier
/// releases.
const DOCUMENT_INDENT: &[u8] = b"    ";

/// Pail repository storing each record at `<root>/<id>/<config file>`.
#[derive(Debug, Clone)]
pub struct FsPailRepository {
    root: RootDir,
    config_file: String,
}

impl FsPailRepository {
    /// Creates a repository for the root and document name in `config`.
    #[must_use]
    pub fn new(config: &PailConfig) -> Self {
        Self {
            root: RootDir::new(config.dir_path.clone()),
            config_file: config.config_file.clone(),
        }
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.root.path()
    }

    fn record_dir(id: PailId) -> Utf8PathBuf {
        Utf8PathBuf::from(id.to_string())
    }

    fn document_path(&self, id: PailId) -> Utf8PathBuf {
        Self::record_dir(id).join(&self.config_file)
    }
}

fn encode_document(id: PailId, document: &PailDocument) -> PailRepositoryResult<Vec<u8>> {
    let mut encoded = Vec::new();
    let formatter = PrettyFormatter::with_indent(DOCUMENT_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut encoded, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|err| PailRepositoryError::serialization(id, err))?;
    Ok(encoded)
}

impl PailRepository for FsPailRepository {
    fn save(&self, id: PailId, document: &PailDocument) -> PailRepositoryResult<()> {
        let encoded = encode_document(id, document)?;
        let dir = self.root.open_or_create().map_err(PailRepositoryError::root)?;
        filesystem::ensure_dir_all(&dir, &Self::record_dir(id))
            .map_err(|err| PailRepositoryError::io(id, err))?;
        filesystem::write_file(&dir, &self.document_path(id), encoded)
            .map_err(|err| PailRepositoryError::io(id, err))?;
        debug!(%id, root = %self.root.path(), "pail document written");
        Ok(())
    }

    fn find_by_id(&self, id: PailId) -> PailRepositoryResult<Option<PailDocument>> {
        let Some(dir) = self.root.open().map_err(PailRepositoryError::root)? else {
            return Ok(None);
        };
        let Some(contents) = filesystem::read_optional_to_string(&dir, &self.document_path(id))
            .map_err(|err| PailRepositoryError::io(id, err))?
        else {
            return Ok(None);
        };
        let document = serde_json::from_str(&contents)
            .map_err(|err| PailRepositoryError::serialization(id, err))?;
        Ok(Some(document))
    }

    fn remove(&self, id: PailId) -> PailRepositoryResult<bool> {
        let Some(dir) = self.root.open().map_err(PailRepositoryError::root)? else {
            return Ok(false);
        };
        filesystem::remove_tree(&dir, &Self::record_dir(id))
            .map_err(|err| PailRepositoryError::io(id, err))
    }

    fn list_ids(&self) -> PailRepositoryResult<Vec<PailId>> {
        let Some(dir) = self.root.open().map_err(PailRepositoryError::root)? else {
            return Ok(Vec::new());
        };
        let entries = filesystem::list_entries(&dir, Utf8Path::new("."), EntryKind::Dir)
            .map_err(PailRepositoryError::root)?;
        let mut ids: Vec<PailId> = entries
            .iter()
            .filter_map(|entry| PailId::parse_segment(entry))
            .collect();
        ids.sort();
        Ok(ids)
    }
}
