//! Adapter implementations of the pail ports.
//!
//! - [`fs`]: records and symlink names under a root directory
//! - [`memory`]: thread-safe in-memory doubles for service tests

pub mod fs;
pub mod memory;
