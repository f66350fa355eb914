//! Pail store service: record lifecycle over a repository and a name index.

use super::locks::{KeyedLocks, LockPoisoned};
use crate::pail::{
    domain::{
        PailDocument, PailDomainError, PailId, PailName, PailStatus, Timestamp, TransitionPlan,
    },
    ports::{NameIndex, NameIndexError, PailRepository, PailRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for pail store operations.
#[derive(Debug, Error)]
pub enum PailStoreError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PailDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PailRepositoryError),

    /// Name index operation failed.
    #[error(transparent)]
    NameIndex(#[from] NameIndexError),

    /// The requested name is already taken.
    #[error("name '{0}' is already taken")]
    NameConflict(PailName),

    /// The pail to update does not exist.
    #[error("pail not found: {0}")]
    NotFound(PailId),

    /// The record was removed but some of its names were not.
    #[error("pail {id} removed but {} name(s) could not be unlinked", .failed.len())]
    IncompleteDelete {
        /// Removed pail.
        id: PailId,
        /// Names still pointing at the removed pail.
        failed: Vec<PailName>,
    },

    /// An in-process lock was poisoned.
    #[error(transparent)]
    Lock(#[from] LockPoisoned),

    /// A blocking store task did not run to completion.
    #[error("blocking store task failed: {0}")]
    Join(String),
}

/// Result type for pail store operations.
pub type PailStoreResult<T> = Result<T, PailStoreError>;

/// Pail lifecycle orchestration service.
///
/// Updates and deletes of one id are serialized, as is every mutation of a
/// given name. Locks are always taken id first, then names in sorted order.
pub struct PailStore<R, N, C>
where
    R: PailRepository,
    N: NameIndex,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    names: Arc<N>,
    clock: Arc<C>,
    id_locks: Arc<KeyedLocks>,
    name_locks: Arc<KeyedLocks>,
}

impl<R, N, C> Clone for PailStore<R, N, C>
where
    R: PailRepository,
    N: NameIndex,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            names: Arc::clone(&self.names),
            clock: Arc::clone(&self.clock),
            id_locks: Arc::clone(&self.id_locks),
            name_locks: Arc::clone(&self.name_locks),
        }
    }
}

impl<R, N, C> PailStore<R, N, C>
where
    R: PailRepository,
    N: NameIndex,
    C: Clock + Send + Sync,
{
    /// Creates a new pail store.
    #[must_use]
    pub fn new(repository: Arc<R>, names: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            names,
            clock,
            id_locks: Arc::new(KeyedLocks::new()),
            name_locks: Arc::new(KeyedLocks::new()),
        }
    }

    /// Creates a pail from `document`.
    ///
    /// Assigns a fresh id, sets `status` to `created` and stamps
    /// `createTime`. Caller fields are kept as given; a requested `name` is
    /// linked to the new id.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::NameConflict`] when anything already
    /// occupies the requested name, in which case nothing is written.
    pub fn create(&self, document: PailDocument) -> PailStoreResult<PailDocument> {
        let requested = document.name()?;
        let name_set = self
            .name_locks
            .lock_set(requested.iter().map(PailName::to_string))?;
        let _names_guard = name_set.acquire()?;

        if let Some(name) = &requested {
            if self.names.is_taken(name)? {
                debug!(%name, "rejecting pail with taken name");
                return Err(PailStoreError::NameConflict(name.clone()));
            }
        }

        let id = PailId::new();
        let mut created = document;
        created.set_id(id);
        created.set_status(PailStatus::Created);
        created.set_time(Timestamp::Create, self.clock.utc());
        self.repository.save(id, &created)?;
        if let Some(name) = &requested {
            self.names.set(name, id)?;
        }
        info!(%id, name = ?requested.as_ref().map(PailName::as_str), "pail created");
        Ok(created)
    }

    /// Reads the document for `id`.
    ///
    /// Returns `None` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::Repository`] when the record exists but
    /// cannot be read or decoded.
    pub fn read(&self, id: PailId) -> PailStoreResult<Option<PailDocument>> {
        debug!(%id, "reading pail");
        Ok(self.repository.find_by_id(id)?)
    }

    /// Reads the document for an untyped id.
    ///
    /// `None`, empty and non-UUID values are misses, not errors.
    ///
    /// # Errors
    ///
    /// Returns the failures of [`Self::read`].
    pub fn read_raw(&self, raw_id: Option<&str>) -> PailStoreResult<Option<PailDocument>> {
        raw_id
            .and_then(|raw| raw.parse::<PailId>().ok())
            .map_or(Ok(None), |id| self.read(id))
    }

    /// Reads the document `name` currently points at.
    ///
    /// # Errors
    ///
    /// Returns the failures of [`Self::resolve`] and [`Self::read`].
    pub fn read_by_name(&self, name: &PailName) -> PailStoreResult<Option<PailDocument>> {
        self.resolve(name)?.map_or(Ok(None), |id| self.read(id))
    }

    /// Persists `document` over an existing record.
    ///
    /// A changed `name` swaps links (the id and storage location never
    /// change). `null` or `""` clears the name and removes its link; a
    /// document without a `name` key keeps the stored name and its link.
    /// The lifecycle policy then stamps timestamps, normalizes
    /// `starting` to `started` and repoints `last` and the matching
    /// `last*` name on terminal statuses. `updateTime` is always refreshed
    /// and the full document is written.
    ///
    /// # Errors
    ///
    /// Returns [`PailDomainError::MissingId`] when the document has no id,
    /// [`PailStoreError::NotFound`] when no record exists for it, and
    /// [`PailStoreError::NameConflict`] when renaming onto a name held by
    /// another pail. A malformed stored name is reported as
    /// [`PailStoreError::Domain`].
    pub fn update(&self, document: PailDocument) -> PailStoreResult<PailDocument> {
        let id = document.require_id()?;
        let submitted = document.name()?;
        let plan = TransitionPlan::for_document(&document);

        let id_set = self.id_locks.lock_set([id.to_string()])?;
        let _id_guard = id_set.acquire()?;

        let stored = self
            .repository
            .find_by_id(id)?
            .ok_or(PailStoreError::NotFound(id))?;
        let current = stored.name()?;
        let requested = if document.has_name_field() {
            submitted
        } else {
            current.clone()
        };
        let renamed = requested != current;
        let policy_names = plan.names();

        let mut touched: Vec<String> = policy_names.iter().map(PailName::to_string).collect();
        if renamed {
            touched.extend(current.iter().chain(requested.iter()).map(PailName::to_string));
        }
        let name_set = self.name_locks.lock_set(touched)?;
        let _names_guard = name_set.acquire()?;

        if renamed {
            self.swap_name(id, current.as_ref(), requested.as_ref())?;
        }
        for name in &policy_names {
            self.names.set(name, id)?;
        }

        let mut updated = document;
        updated.set_name(requested.as_ref());
        plan.apply(&mut updated, self.clock.utc());
        self.repository.save(id, &updated)?;
        debug!(%id, status = ?updated.status_str(), "pail updated");
        Ok(updated)
    }

    fn swap_name(
        &self,
        id: PailId,
        current: Option<&PailName>,
        requested: Option<&PailName>,
    ) -> PailStoreResult<()> {
        if let Some(name) = requested {
            match self.names.resolve(name)? {
                Some(holder) if holder != id => {
                    return Err(PailStoreError::NameConflict(name.clone()));
                }
                Some(_) => {}
                None if self.names.is_taken(name)? => {
                    return Err(PailStoreError::NameConflict(name.clone()));
                }
                None => {}
            }
        }
        if let Some(old) = current {
            if self.names.resolve(old)? == Some(id) {
                self.names.remove(old)?;
            }
        }
        if let Some(name) = requested {
            self.names.set(name, id)?;
        }
        info!(
            %id,
            from = ?current.map(PailName::as_str),
            to = ?requested.map(PailName::as_str),
            "pail renamed"
        );
        Ok(())
    }

    /// Deletes the pail `id`: every name pointing at it, then its directory
    /// tree.
    ///
    /// Name removal is best-effort: a failing name does not stop the others
    /// or the record removal. Deleting an absent pail is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::IncompleteDelete`] listing names that could
    /// not be removed, or the repository failure when the record itself
    /// could not be removed.
    pub fn delete(&self, id: PailId) -> PailStoreResult<()> {
        let id_key = id.to_string();
        let id_set = self.id_locks.lock_set([id_key.clone()])?;
        let id_guard = id_set.acquire()?;

        let listed = self.names.links_for(id)?;
        let name_set = self.name_locks.lock_set(listed.iter().map(PailName::to_string))?;
        let names_guard = name_set.acquire()?;
        let linked: Vec<PailName> = self
            .names
            .links_for(id)?
            .into_iter()
            .filter(|name| listed.contains(name))
            .collect();

        let mut failed = Vec::new();
        for name in linked {
            if let Err(err) = self.names.remove(&name) {
                warn!(%id, %name, %err, "failed to remove name of deleted pail");
                failed.push(name);
            }
        }
        let removed = self.repository.remove(id)?;

        drop(names_guard);
        drop(id_guard);
        drop(id_set);
        self.id_locks.forget(&id_key);

        if !failed.is_empty() {
            return Err(PailStoreError::IncompleteDelete { id, failed });
        }
        info!(%id, removed, "pail deleted");
        Ok(())
    }

    /// Returns the ids of all stored pails.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::Repository`] when the root cannot be
    /// listed.
    pub fn list(&self) -> PailStoreResult<Vec<PailId>> {
        Ok(self.repository.list_ids()?)
    }

    /// Points `name` at `id`, replacing any previous target.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::NameIndex`] when the link cannot be
    /// written or the name is occupied by something else.
    pub fn set_name(&self, id: PailId, name: &PailName) -> PailStoreResult<()> {
        let name_set = self.name_locks.lock_set([name.to_string()])?;
        let _guard = name_set.acquire()?;
        self.names.set(name, id)?;
        Ok(())
    }

    /// Removes `name`, returning `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::NameIndex`] when the name is occupied by
    /// something else or cannot be removed.
    pub fn remove_name(&self, name: &PailName) -> PailStoreResult<bool> {
        let name_set = self.name_locks.lock_set([name.to_string()])?;
        let _guard = name_set.acquire()?;
        Ok(self.names.remove(name)?)
    }

    /// Returns the id `name` currently points at.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::NameIndex`] when the link cannot be read.
    pub fn resolve(&self, name: &PailName) -> PailStoreResult<Option<PailId>> {
        Ok(self.names.resolve(name)?)
    }

    /// Returns every name pointing at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PailStoreError::NameIndex`] when the root cannot be
    /// scanned.
    pub fn links_for(&self, id: PailId) -> PailStoreResult<Vec<PailName>> {
        Ok(self.names.links_for(id)?)
    }
}
