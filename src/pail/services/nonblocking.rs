//! Non-blocking wrapper running store operations on the blocking pool.

use super::store::{PailStore, PailStoreError, PailStoreResult};
use crate::pail::{
    domain::{PailDocument, PailId, PailName},
    ports::{NameIndex, PailRepository},
};
use mockable::Clock;
use std::sync::Arc;

/// Async facade over [`PailStore`].
///
/// Each call runs the synchronous operation to completion on
/// [`tokio::task::spawn_blocking`], so results and errors match the
/// blocking API exactly.
pub struct AsyncPailStore<R, N, C>
where
    R: PailRepository + 'static,
    N: NameIndex + 'static,
    C: Clock + Send + Sync + 'static,
{
    inner: Arc<PailStore<R, N, C>>,
}

impl<R, N, C> Clone for AsyncPailStore<R, N, C>
where
    R: PailRepository + 'static,
    N: NameIndex + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, N, C> AsyncPailStore<R, N, C>
where
    R: PailRepository + 'static,
    N: NameIndex + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Wraps a blocking store.
    #[must_use]
    pub fn new(store: PailStore<R, N, C>) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Returns the wrapped blocking store.
    #[must_use]
    pub fn blocking(&self) -> &PailStore<R, N, C> {
        &self.inner
    }

    async fn run<T, F>(&self, operation: F) -> PailStoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&PailStore<R, N, C>) -> PailStoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|err| PailStoreError::Join(err.to_string()))?
    }

    /// See [`PailStore::create`].
    ///
    /// # Errors
    ///
    /// Returns the errors of the blocking operation, or
    /// [`PailStoreError::Join`] when the task panicked or was cancelled.
    pub async fn create(&self, document: PailDocument) -> PailStoreResult<PailDocument> {
        self.run(move |store| store.create(document)).await
    }

    /// See [`PailStore::read`].
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    pub async fn read(&self, id: PailId) -> PailStoreResult<Option<PailDocument>> {
        self.run(move |store| store.read(id)).await
    }

    /// See [`PailStore::update`].
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    pub async fn update(&self, document: PailDocument) -> PailStoreResult<PailDocument> {
        self.run(move |store| store.update(document)).await
    }

    /// See [`PailStore::delete`].
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    pub async fn delete(&self, id: PailId) -> PailStoreResult<()> {
        self.run(move |store| store.delete(id)).await
    }

    /// See [`PailStore::list`].
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    pub async fn list(&self) -> PailStoreResult<Vec<PailId>> {
        self.run(PailStore::list).await
    }

    /// See [`PailStore::resolve`].
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    pub async fn resolve(&self, name: PailName) -> PailStoreResult<Option<PailId>> {
        self.run(move |store| store.resolve(&name)).await
    }
}
