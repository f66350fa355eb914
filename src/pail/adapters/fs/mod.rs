//! Filesystem adapters for pail persistence.
//!
//! Layout under the configured root `R`:
//!
//! - `R/<id>/<config file>`: the pretty-printed JSON document
//! - `R/<name>`: a symbolic link whose target is `<id>` or `R/<id>`

mod name_index;
mod repository;

pub use name_index::SymlinkNameIndex;
pub use repository::FsPailRepository;
