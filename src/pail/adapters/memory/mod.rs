//! In-memory adapters for pail lifecycle tests.

mod name_index;
mod repository;

pub use name_index::InMemoryNameIndex;
pub use repository::InMemoryPailRepository;
