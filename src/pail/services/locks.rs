//! In-process mutual exclusion keyed by string.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Error returned when a lock was poisoned by a panicking holder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("lock poisoned for '{0}'")]
pub struct LockPoisoned(pub String);

type Slot = Arc<Mutex<()>>;

/// Table of mutexes created on first use for each key.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    slots: Mutex<HashMap<String, Slot>>,
}

/// Slots for a set of keys, locked together in sorted key order.
#[derive(Debug)]
pub struct LockSet {
    slots: Vec<(String, Slot)>,
}

/// Guards held for every key of a [`LockSet`].
#[derive(Debug)]
pub struct LockSetGuard<'a> {
    _guards: Vec<MutexGuard<'a, ()>>,
}

impl KeyedLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slots for `keys`, deduplicated and sorted.
    ///
    /// # Errors
    ///
    /// Returns [`LockPoisoned`] when the table itself is poisoned.
    pub fn lock_set<I, K>(&self, keys: I) -> Result<LockSet, LockPoisoned>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let ordered: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        let mut table = self
            .slots
            .lock()
            .map_err(|_| LockPoisoned("lock table".to_owned()))?;
        let slots = ordered
            .into_iter()
            .map(|key| {
                let slot = Arc::clone(table.entry(key.clone()).or_default());
                (key, slot)
            })
            .collect();
        Ok(LockSet { slots })
    }

    /// Drops the slot for `key` when nobody else holds it.
    pub fn forget(&self, key: &str) {
        if let Ok(mut table) = self.slots.lock() {
            let unused = table
                .get(key)
                .is_some_and(|slot| Arc::strong_count(slot) == 1);
            if unused {
                table.remove(key);
            }
        }
    }
}

impl LockSet {
    /// Blocks until every key in the set is locked.
    ///
    /// # Errors
    ///
    /// Returns [`LockPoisoned`] naming the first poisoned key.
    pub fn acquire(&self) -> Result<LockSetGuard<'_>, LockPoisoned> {
        let guards = self
            .slots
            .iter()
            .map(|(key, slot)| slot.lock().map_err(|_| LockPoisoned(key.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LockSetGuard { _guards: guards })
    }
}
