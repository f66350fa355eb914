//! Identifier type for pail records.

use super::PailDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the hyphenated textual UUID form.
const HYPHENATED_LEN: usize = 36;

/// Unique identifier for a pail record.
///
/// The textual form is always the lowercase hyphenated UUID, which is also
/// the name of the pail's directory under the store root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PailId(Uuid);

impl PailId {
    /// Creates a new random pail identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a pail identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parses text in the hyphenated UUID shape, in either case.
    ///
    /// Other UUID spellings (simple, braced, URN) are not pail ids.
    #[must_use]
    pub fn parse_hyphenated(text: &str) -> Option<Self> {
        if text.len() != HYPHENATED_LEN {
            return None;
        }
        Uuid::parse_str(text).ok().map(Self)
    }

    /// Parses a directory or link segment naming a pail record.
    ///
    /// Only the exact form produced by [`fmt::Display`] is accepted, so the
    /// returned id always maps back to the same segment on disk.
    #[must_use]
    pub fn parse_segment(segment: &str) -> Option<Self> {
        Self::parse_hyphenated(segment).filter(|id| id.to_string() == segment)
    }
}

impl Default for PailId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for PailId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for PailId {
    type Err = PailDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_hyphenated(value.trim())
            .ok_or_else(|| PailDomainError::InvalidId(value.to_owned()))
    }
}

impl fmt::Display for PailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
