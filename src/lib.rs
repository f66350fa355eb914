//! Pail: a filesystem-backed record store for units of work.
//!
//! A pail is a tracked unit of work (a build, a job execution) identified by
//! a generated UUID and described by an open JSON document. Pails can carry
//! a scratch workspace directory, and mutable names (symlinks at the store
//! root) resolve human-meaningful aliases such as `last` or `lastSuccess` to
//! concrete records.
//!
//! # Architecture
//!
//! Pail follows hexagonal architecture principles:
//!
//! - **Domain**: identifiers, names, statuses, the open document and the
//!   lifecycle policy, with no infrastructure dependencies
//! - **Ports**: the record repository and name index contracts
//! - **Adapters**: filesystem and in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`config`]: store configuration and defaults
//! - [`filesystem`]: capability-scoped filesystem primitives
//! - [`pail`]: record lifecycle, name index and the store service
//! - [`workspace`]: workspace directories and artifact copies

pub mod config;
pub mod filesystem;
pub mod pail;
pub mod workspace;
