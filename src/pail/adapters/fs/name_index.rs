//! Symlink-backed name index.

use crate::{
    config::PailConfig,
    filesystem::{self, EntryKind, LinkRemoval, RootDir},
    pail::{
        domain::{PailId, PailName},
        ports::{NameIndex, NameIndexError, NameIndexResult},
    },
};
use camino::Utf8Path;
use tracing::{debug, warn};

/// Name index keeping one symbolic link per name directly under the root.
///
/// Links are written with the bare pail id as target. Resolution takes the
/// trailing segment of the stored target, so links pointing at the full
/// record path resolve as well.
#[derive(Debug, Clone)]
pub struct SymlinkNameIndex {
    root: RootDir,
}

impl SymlinkNameIndex {
    /// Creates a name index over the root in `config`.
    #[must_use]
    pub fn new(config: &PailConfig) -> Self {
        Self {
            root: RootDir::new(config.dir_path.clone()),
        }
    }
}

fn link_path(name: &PailName) -> &Utf8Path {
    Utf8Path::new(name.as_str())
}

fn target_id(name: &str, target: &Utf8Path) -> Option<PailId> {
    let id = target.file_name().and_then(PailId::parse_segment);
    if id.is_none() {
        warn!(%name, %target, "name does not point at a pail id");
    }
    id
}

impl NameIndex for SymlinkNameIndex {
    fn set(&self, name: &PailName, id: PailId) -> NameIndexResult<()> {
        let dir = self
            .root
            .open_or_create()
            .map_err(|err| NameIndexError::io(name.as_str(), err))?;
        let removal = filesystem::remove_symlink(&dir, link_path(name))
            .map_err(|err| NameIndexError::io(name.as_str(), err))?;
        match removal {
            LinkRemoval::NotALink => return Err(NameIndexError::NotALink(name.clone())),
            LinkRemoval::Removed => debug!(%name, "replacing existing name"),
            LinkRemoval::Absent => {}
        }
        let target = id.to_string();
        filesystem::create_symlink(&dir, Utf8Path::new(&target), link_path(name))
            .map_err(|err| NameIndexError::io(name.as_str(), err))?;
        debug!(%name, %id, "name set");
        Ok(())
    }

    fn remove(&self, name: &PailName) -> NameIndexResult<bool> {
        let Some(dir) = self
            .root
            .open()
            .map_err(|err| NameIndexError::io(name.as_str(), err))?
        else {
            return Ok(false);
        };
        match filesystem::remove_symlink(&dir, link_path(name))
            .map_err(|err| NameIndexError::io(name.as_str(), err))?
        {
            LinkRemoval::Removed => {
                debug!(%name, "name removed");
                Ok(true)
            }
            LinkRemoval::Absent => Ok(false),
            LinkRemoval::NotALink => Err(NameIndexError::NotALink(name.clone())),
        }
    }

    fn resolve(&self, name: &PailName) -> NameIndexResult<Option<PailId>> {
        let Some(dir) = self
            .root
            .open()
            .map_err(|err| NameIndexError::io(name.as_str(), err))?
        else {
            return Ok(None);
        };
        let target = filesystem::read_symlink(&dir, link_path(name))
            .map_err(|err| NameIndexError::io(name.as_str(), err))?;
        Ok(target.and_then(|stored| target_id(name.as_str(), &stored)))
    }

    fn links_for(&self, id: PailId) -> NameIndexResult<Vec<PailName>> {
        let Some(dir) = self.root.open().map_err(|err| NameIndexError::io("", err))? else {
            return Ok(Vec::new());
        };
        let links = filesystem::list_entries(&dir, Utf8Path::new("."), EntryKind::Symlink)
            .map_err(|err| NameIndexError::io("", err))?;
        let mut names = Vec::new();
        for link in links {
            let Some(target) = filesystem::read_symlink(&dir, Utf8Path::new(&link))
                .map_err(|err| NameIndexError::io(link.as_str(), err))?
            else {
                continue;
            };
            if target.file_name().and_then(PailId::parse_segment) != Some(id) {
                continue;
            }
            match PailName::new(link.as_str()) {
                Ok(name) => names.push(name),
                Err(err) => warn!(%link, %err, "ignoring link with unusable name"),
            }
        }
        Ok(names)
    }

    fn is_taken(&self, name: &PailName) -> NameIndexResult<bool> {
        let Some(dir) = self
            .root
            .open()
            .map_err(|err| NameIndexError::io(name.as_str(), err))?
        else {
            return Ok(false);
        };
        let kind = filesystem::entry_kind(&dir, link_path(name))
            .map_err(|err| NameIndexError::io(name.as_str(), err))?;
        Ok(kind.is_some())
    }
}
