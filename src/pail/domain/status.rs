//! Pail lifecycle status.

use super::ParsePailStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pail lifecycle status.
///
/// `Starting` is an input-only value: updates normalize it to `Started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PailStatus {
    /// Record exists, work has not begun.
    Created,
    /// Caller is starting the work.
    Starting,
    /// Work is running.
    Started,
    /// Work finished successfully.
    Succeeded,
    /// Work finished unsuccessfully.
    Failed,
    /// Work was cancelled before finishing.
    Cancelled,
}

impl PailStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Starting => "starting",
            Self::Started => "started",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` for statuses callers never revive.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl TryFrom<&str> for PailStatus {
    type Error = ParsePailStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "created" => Ok(Self::Created),
            "starting" => Ok(Self::Starting),
            "started" => Ok(Self::Started),
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParsePailStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for PailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
