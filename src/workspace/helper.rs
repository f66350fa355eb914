//! Workspace and artifact helper over the store root.

use super::{WorkspaceError, WorkspaceResult};
use crate::{
    config::{CopyPolicy, PailConfig, WorkspaceLayout},
    filesystem::{self, EntryKind, RootDir},
    pail::domain::PailId,
};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use tracing::{debug, warn};

/// Result of [`WorkspaceHelper::copy_artifact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The artifact was written to the target directory.
    Copied,
    /// No artifact name was given.
    NoArtifact,
    /// The source artifact does not exist.
    SourceMissing,
    /// The target directory does not exist and the copy was skipped.
    TargetMissing,
}

/// Manages workspace directories and artifact files under the store root.
///
/// Every directory argument is relative to the root; absolute paths and
/// `..` components are rejected.
#[derive(Debug, Clone)]
pub struct WorkspaceHelper {
    root: RootDir,
    workspace: String,
    layout: WorkspaceLayout,
    copy_policy: CopyPolicy,
}

impl WorkspaceHelper {
    /// Creates a helper for the root, workspace name, layout and copy
    /// policy in `config`.
    #[must_use]
    pub fn new(config: &PailConfig) -> Self {
        Self {
            root: RootDir::new(config.dir_path.clone()),
            workspace: config.workspace.clone(),
            layout: config.workspace_layout,
            copy_policy: config.copy_policy,
        }
    }

    /// Returns the workspace directory for `id`, relative to the root.
    ///
    /// With the shared layout every pail maps to the same directory.
    #[must_use]
    pub fn workspace_path(&self, id: PailId) -> Utf8PathBuf {
        match self.layout {
            WorkspaceLayout::PerPail => Utf8PathBuf::from(id.to_string()).join(&self.workspace),
            WorkspaceLayout::Shared => Utf8PathBuf::from(&self.workspace),
        }
    }

    /// Creates the workspace for `id` and returns its relative path.
    ///
    /// An existing workspace is kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::PailNotFound`] when the per-pail layout is
    /// used and the pail has no directory.
    pub fn create_workspace(&self, id: PailId) -> WorkspaceResult<Utf8PathBuf> {
        let path = self.workspace_path(id);
        if self.layout == WorkspaceLayout::PerPail {
            let record = Utf8PathBuf::from(id.to_string());
            let Some(dir) = self.open_root(&record)? else {
                return Err(WorkspaceError::PailNotFound(id));
            };
            let kind = filesystem::entry_kind(&dir, &record)
                .map_err(|err| WorkspaceError::io(record.clone(), err))?;
            if kind != Some(EntryKind::Dir) {
                return Err(WorkspaceError::PailNotFound(id));
            }
        }
        self.create_dir(&path)?;
        Ok(path)
    }

    /// Removes the workspace for `id` and everything in it.
    ///
    /// Returns `false` when there was no workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Io`] when removal fails part way.
    pub fn delete_workspace(&self, id: PailId) -> WorkspaceResult<bool> {
        self.delete_dir(&self.workspace_path(id))
    }

    /// Creates `dir` and any missing parents. Existing directories are kept.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::InvalidPath`] for paths leaving the root and
    /// [`WorkspaceError::Io`] when creation fails.
    pub fn create_dir(&self, dir: &Utf8Path) -> WorkspaceResult<()> {
        check_relative(dir)?;
        let root = self
            .root
            .open_or_create()
            .map_err(|err| WorkspaceError::io(dir, err))?;
        filesystem::ensure_dir_all(&root, dir).map_err(|err| WorkspaceError::io(dir, err))?;
        debug!(%dir, "directory created");
        Ok(())
    }

    /// Removes `dir` depth-first. A missing directory is a no-op returning
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::InvalidPath`] for paths leaving the root and
    /// [`WorkspaceError::Io`] when removal fails.
    pub fn delete_dir(&self, dir: &Utf8Path) -> WorkspaceResult<bool> {
        check_relative(dir)?;
        let Some(root) = self.open_root(dir)? else {
            return Ok(false);
        };
        let removed =
            filesystem::remove_tree(&root, dir).map_err(|err| WorkspaceError::io(dir, err))?;
        debug!(%dir, removed, "directory deleted");
        Ok(removed)
    }

    /// Reads the artifact `name` in `dir` as text.
    ///
    /// Returns `None` when the artifact does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::InvalidPath`] for unusable paths and
    /// [`WorkspaceError::Io`] for read failures other than absence.
    pub fn read_artifact(&self, dir: &Utf8Path, name: &str) -> WorkspaceResult<Option<String>> {
        let path = artifact_path(dir, name)?;
        let Some(root) = self.open_root(&path)? else {
            return Ok(None);
        };
        filesystem::read_optional_to_string(&root, &path).map_err(|err| WorkspaceError::io(path, err))
    }

    /// Copies the artifact `name` from `source_dir` into `target_dir`
    /// byte for byte.
    ///
    /// A missing or empty name is a no-op. A missing source artifact is
    /// skipped. A missing target directory is skipped with a warning under
    /// [`CopyPolicy::Permissive`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::TargetMissing`] for a missing target
    /// directory under [`CopyPolicy::Strict`], and [`WorkspaceError::Io`]
    /// when reading or writing fails.
    pub fn copy_artifact(
        &self,
        source_dir: &Utf8Path,
        target_dir: &Utf8Path,
        name: Option<&str>,
    ) -> WorkspaceResult<CopyOutcome> {
        let Some(artifact) = name.filter(|value| !value.is_empty()) else {
            return Ok(CopyOutcome::NoArtifact);
        };
        let source = artifact_path(source_dir, artifact)?;
        let target = artifact_path(target_dir, artifact)?;
        let Some(contents) = self.read_artifact_bytes(&source)? else {
            warn!(%source_dir, %artifact, "artifact to copy does not exist");
            return Ok(CopyOutcome::SourceMissing);
        };

        let Some(dir) = self.target_dir(target_dir)? else {
            return match self.copy_policy {
                CopyPolicy::Permissive => {
                    warn!(%target_dir, %artifact, "artifact target directory missing, copy skipped");
                    Ok(CopyOutcome::TargetMissing)
                }
                CopyPolicy::Strict => Err(WorkspaceError::TargetMissing(target_dir.to_owned())),
            };
        };

        filesystem::write_file(&dir, &target, contents)
            .map_err(|err| WorkspaceError::io(target.clone(), err))?;
        debug!(%source_dir, %target_dir, %artifact, "artifact copied");
        Ok(CopyOutcome::Copied)
    }

    /// Lists the regular files directly within `dir`, sorted.
    ///
    /// Subdirectories and links are left out; a missing directory yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::InvalidPath`] for paths leaving the root and
    /// [`WorkspaceError::Io`] when listing fails.
    pub fn list_files(&self, dir: &Utf8Path) -> WorkspaceResult<Vec<String>> {
        check_relative(dir)?;
        let Some(root) = self.open_root(dir)? else {
            return Ok(Vec::new());
        };
        filesystem::list_entries(&root, dir, EntryKind::File).map_err(|err| WorkspaceError::io(dir, err))
    }

    fn read_artifact_bytes(&self, path: &Utf8Path) -> WorkspaceResult<Option<Vec<u8>>> {
        let Some(root) = self.open_root(path)? else {
            return Ok(None);
        };
        filesystem::read_optional_bytes(&root, path).map_err(|err| WorkspaceError::io(path, err))
    }

    fn target_dir(&self, target_dir: &Utf8Path) -> WorkspaceResult<Option<Dir>> {
        let Some(root) = self.open_root(target_dir)? else {
            return Ok(None);
        };
        let kind = filesystem::entry_kind(&root, target_dir)
            .map_err(|err| WorkspaceError::io(target_dir, err))?;
        Ok((kind == Some(EntryKind::Dir)).then_some(root))
    }

    fn open_root(&self, for_path: &Utf8Path) -> WorkspaceResult<Option<Dir>> {
        self.root
            .open()
            .map_err(|err| WorkspaceError::io(for_path, err))
    }
}

fn check_relative(path: &Utf8Path) -> WorkspaceResult<()> {
    let escapes = path.components().any(|component| {
        matches!(
            component,
            Utf8Component::ParentDir | Utf8Component::RootDir | Utf8Component::Prefix(_)
        )
    });
    if escapes {
        return Err(WorkspaceError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn artifact_path(dir: &Utf8Path, name: &str) -> WorkspaceResult<Utf8PathBuf> {
    check_relative(dir)?;
    let is_segment = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if !is_segment {
        return Err(WorkspaceError::InvalidPath(name.to_owned()));
    }
    Ok(dir.join(name))
}
