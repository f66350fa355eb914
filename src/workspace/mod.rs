//! Workspace directories and artifact copies.
//!
//! A workspace is scratch space used while a pail executes. It is not part
//! of the pail document, and its lifetime follows explicit
//! create/delete calls rather than pail creation or deletion. Artifacts are
//! files produced during execution, optionally copied between directories
//! (for example from the workspace into an archive directory).

mod error;
mod helper;

pub use error::{WorkspaceError, WorkspaceResult};
pub use helper::{CopyOutcome, WorkspaceHelper};
