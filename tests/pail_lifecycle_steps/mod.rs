//! Step definitions for pail lifecycle scenarios.

pub mod given;
pub mod when;
pub mod world;
