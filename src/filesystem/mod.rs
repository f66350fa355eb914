//! Capability-scoped filesystem primitives shared by the store adapters and
//! the workspace helper.
//!
//! All paths are relative to a [`cap_std::fs_utf8::Dir`] handle opened on
//! the store root, so no operation can reach outside the tree it was given.
//! Missing entries are reported as `None`/`false`/empty results; every other
//! failure is returned as an [`io::Error`].

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::FileType;
use cap_std::fs_utf8::Dir;
use std::io;
use tracing::{debug, warn};

/// Kind of a directory entry, read without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link, dangling or not.
    Symlink,
    /// Anything else (sockets, devices, fifos).
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Dir
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Outcome of removing a symbolic link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRemoval {
    /// The link existed and was removed.
    Removed,
    /// Nothing existed at the path.
    Absent,
    /// An entry exists at the path but is not a symbolic link.
    NotALink,
}

/// Root directory of a store, opened on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDir {
    path: Utf8PathBuf,
}

impl RootDir {
    /// Creates a handle for the directory at `path`. Nothing is touched on
    /// disk until one of the open methods is called.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the root path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Opens the root, returning `None` when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns any failure other than the root being absent.
    pub fn open(&self) -> io::Result<Option<Dir>> {
        match Dir::open_ambient_dir(&self.path, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Opens the root, creating it and any missing parents first.
    ///
    /// # Errors
    ///
    /// Returns the underlying failure when the root cannot be created or
    /// opened.
    pub fn open_or_create(&self) -> io::Result<Dir> {
        Dir::create_ambient_dir_all(&self.path, ambient_authority())?;
        Dir::open_ambient_dir(&self.path, ambient_authority())
    }
}

/// Reads the kind of the entry at `path` without following symlinks.
///
/// # Errors
///
/// Returns any failure other than the entry being absent.
pub fn entry_kind(dir: &Dir, path: &Utf8Path) -> io::Result<Option<EntryKind>> {
    match dir.symlink_metadata(path) {
        Ok(metadata) => Ok(Some(EntryKind::from_file_type(metadata.file_type()))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Creates `path` and every missing parent below `dir`.
///
/// Existing directories are left untouched.
///
/// # Errors
///
/// Returns the underlying failure, including when a non-directory entry is
/// in the way.
pub fn ensure_dir_all(dir: &Dir, path: &Utf8Path) -> io::Result<()> {
    dir.create_dir_all(path)
}

/// Opens the directory at `path`, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns any failure other than the directory being absent.
pub fn open_dir_optional(dir: &Dir, path: &Utf8Path) -> io::Result<Option<Dir>> {
    match dir.open_dir(path) {
        Ok(child) => Ok(Some(child)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Removes the entry at `path` depth-first: files and links are unlinked,
/// directories are emptied then removed. Symlinks are never followed.
///
/// Returns `false` when nothing existed at `path`.
///
/// # Errors
///
/// Returns the first failure encountered; entries removed before it stay
/// removed.
pub fn remove_tree(dir: &Dir, path: &Utf8Path) -> io::Result<bool> {
    match entry_kind(dir, path)? {
        None => Ok(false),
        Some(EntryKind::Dir) => {
            let child = dir.open_dir(path)?;
            clear_dir(&child)?;
            drop(child);
            dir.remove_dir(path)?;
            Ok(true)
        }
        Some(_) => {
            dir.remove_file(path)?;
            Ok(true)
        }
    }
}

fn clear_dir(dir: &Dir) -> io::Result<()> {
    let mut children = Vec::new();
    for item in dir.entries()? {
        let entry = item?;
        children.push((entry.file_name()?, entry.file_type()?));
    }
    for (name, file_type) in children {
        if file_type.is_dir() {
            let child = dir.open_dir(&name)?;
            clear_dir(&child)?;
            drop(child);
            dir.remove_dir(&name)?;
        } else {
            dir.remove_file(&name)?;
        }
    }
    Ok(())
}

/// Reads the file at `path` as UTF-8 text, returning `None` when it does not
/// exist.
///
/// # Errors
///
/// Returns any failure other than the file being absent.
pub fn read_optional_to_string(dir: &Dir, path: &Utf8Path) -> io::Result<Option<String>> {
    match dir.read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Reads the file at `path` as raw bytes, returning `None` when it does not
/// exist.
///
/// # Errors
///
/// Returns any failure other than the file being absent.
pub fn read_optional_bytes(dir: &Dir, path: &Utf8Path) -> io::Result<Option<Vec<u8>>> {
    match dir.read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns the underlying failure, including [`io::ErrorKind::NotFound`]
/// when the parent directory does not exist.
pub fn write_file(dir: &Dir, path: &Utf8Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    dir.write(path, contents)
}

/// Lists the names of entries of `kind` directly within `path`, sorted.
///
/// A missing directory yields an empty list. Entries whose names are not
/// valid UTF-8 are skipped.
///
/// # Errors
///
/// Returns any failure other than the directory being absent.
pub fn list_entries(dir: &Dir, path: &Utf8Path, kind: EntryKind) -> io::Result<Vec<String>> {
    let Some(listed) = open_dir_optional(dir, path)? else {
        return Ok(Vec::new());
    };
    let mut names = Vec::new();
    for item in listed.entries()? {
        let entry = item?;
        if EntryKind::from_file_type(entry.file_type()?) != kind {
            continue;
        }
        match entry.file_name() {
            Ok(name) => names.push(name),
            Err(err) => warn!(%path, %err, "skipping entry with non UTF-8 name"),
        }
    }
    names.sort();
    Ok(names)
}

/// Creates a symbolic link at `link` whose contents are `target`.
///
/// # Errors
///
/// Returns the underlying failure, including
/// [`io::ErrorKind::AlreadyExists`] when `link` is taken.
pub fn create_symlink(dir: &Dir, target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    debug!(%link, %target, "creating symlink");
    #[cfg(windows)]
    {
        dir.symlink_dir(target, link)
    }
    #[cfg(not(windows))]
    {
        dir.symlink(target, link)
    }
}

/// Reads the stored target of the symbolic link at `link`.
///
/// Absolute targets are returned as stored. Returns `None` when nothing
/// exists at `link` or the entry is not a symbolic link.
///
/// # Errors
///
/// Returns any failure other than the link being absent.
pub fn read_symlink(dir: &Dir, link: &Utf8Path) -> io::Result<Option<Utf8PathBuf>> {
    match entry_kind(dir, link)? {
        Some(EntryKind::Symlink) => dir.read_link_contents(link).map(Some),
        _ => Ok(None),
    }
}

/// Removes the symbolic link at `link`, leaving any other kind of entry in
/// place.
///
/// # Errors
///
/// Returns the underlying failure when the link exists but cannot be
/// removed.
pub fn remove_symlink(dir: &Dir, link: &Utf8Path) -> io::Result<LinkRemoval> {
    match entry_kind(dir, link)? {
        None => Ok(LinkRemoval::Absent),
        Some(EntryKind::Symlink) => {
            dir.remove_file(link)?;
            Ok(LinkRemoval::Removed)
        }
        Some(_) => Ok(LinkRemoval::NotALink),
    }
}
