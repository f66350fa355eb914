//! Domain model for pail records.
//!
//! The pail domain models identifiers, names, lifecycle statuses, the open
//! metadata document and the lifecycle policy, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod document;
mod error;
mod ids;
mod lifecycle;
mod name;
mod status;

pub use document::{PailDocument, Timestamp};
pub use error::{PailDomainError, ParsePailStatusError};
pub use ids::PailId;
pub use lifecycle::TransitionPlan;
pub use name::PailName;
pub use status::PailStatus;
