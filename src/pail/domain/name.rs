//! Validated pail names.

use super::{PailDomainError, PailId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-meaningful alias resolving to exactly one pail.
///
/// A name occupies a single entry directly under the store root, so it must
/// be a single path segment. UUID-shaped names are rejected because they
/// would be indistinguishable from record directories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PailName(String);

impl PailName {
    /// Name always pointing at the most recently finished pail.
    pub const LAST: &'static str = "last";
    /// Name pointing at the most recently succeeded pail.
    pub const LAST_SUCCESS: &'static str = "lastSuccess";
    /// Name pointing at the most recently failed pail.
    pub const LAST_FAIL: &'static str = "lastFail";
    /// Name pointing at the most recently cancelled pail.
    pub const LAST_CANCEL: &'static str = "lastCancel";

    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`PailDomainError::InvalidName`] when the value is empty,
    /// contains a path separator or NUL, is `.`/`..`, or is shaped like a
    /// pail id.
    pub fn new(value: impl Into<String>) -> Result<Self, PailDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.trim() == raw
            && raw != "."
            && raw != ".."
            && !raw.contains(['/', '\\', '\0'])
            && PailId::parse_hyphenated(&raw).is_none();
        if !is_valid {
            return Err(PailDomainError::InvalidName(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the `last` name.
    #[must_use]
    pub fn last() -> Self {
        Self(Self::LAST.to_owned())
    }

    /// Returns the `lastSuccess` name.
    #[must_use]
    pub fn last_success() -> Self {
        Self(Self::LAST_SUCCESS.to_owned())
    }

    /// Returns the `lastFail` name.
    #[must_use]
    pub fn last_fail() -> Self {
        Self(Self::LAST_FAIL.to_owned())
    }

    /// Returns the `lastCancel` name.
    #[must_use]
    pub fn last_cancel() -> Self {
        Self(Self::LAST_CANCEL.to_owned())
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PailName {
    type Error = PailDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PailName {
    type Error = PailDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PailName> for String {
    fn from(value: PailName) -> Self {
        value.0
    }
}

impl AsRef<str> for PailName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PailName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
