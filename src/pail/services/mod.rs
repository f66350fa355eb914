//! Application services for pail lifecycle orchestration.

mod locks;
mod nonblocking;
mod store;

pub use locks::{KeyedLocks, LockPoisoned, LockSet, LockSetGuard};
pub use nonblocking::AsyncPailStore;
pub use store::{PailStore, PailStoreError, PailStoreResult};
