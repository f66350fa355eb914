//! Pail lifecycle management.
//!
//! Creating records from caller documents, status-driven updates with
//! timestamp and name side effects, deletion, and resolution of mutable
//! names to record ids. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
