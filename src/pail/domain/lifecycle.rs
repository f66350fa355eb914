//! Lifecycle policy mapping an incoming status to update side effects.

use super::{PailDocument, PailName, PailStatus, Timestamp};
use chrono::{DateTime, Utc};

/// Side effects of one update, derived only from the incoming status.
///
/// | incoming    | timestamps                         | names                  |
/// |-------------|------------------------------------|------------------------|
/// | `starting`  | `startTime`, status -> `started`   | -                      |
/// | `succeeded` | `finishTime`                       | `last`, `lastSuccess`  |
/// | `failed`    | `finishTime`                       | `last`, `lastFail`     |
/// | `cancelled` | `finishTime`                       | `last`, `lastCancel`   |
/// | other       | -                                  | -                      |
///
/// `updateTime` is refreshed in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    incoming: Option<PailStatus>,
}

impl TransitionPlan {
    /// Plans the effects of an update carrying `incoming`.
    #[must_use]
    pub const fn for_status(incoming: Option<PailStatus>) -> Self {
        Self { incoming }
    }

    /// Plans the effects of updating `document` as submitted.
    #[must_use]
    pub fn for_document(document: &PailDocument) -> Self {
        Self::for_status(document.status())
    }

    /// Status written back to the document, when it changes.
    #[must_use]
    pub const fn normalized_status(self) -> Option<PailStatus> {
        match self.incoming {
            Some(PailStatus::Starting) => Some(PailStatus::Started),
            _ => None,
        }
    }

    /// Returns `true` when the update stamps `startTime`.
    #[must_use]
    pub const fn stamps_start(self) -> bool {
        matches!(self.incoming, Some(PailStatus::Starting))
    }

    /// Returns `true` when the update stamps `finishTime`.
    #[must_use]
    pub fn stamps_finish(self) -> bool {
        self.incoming.is_some_and(PailStatus::is_terminal)
    }

    /// Policy-managed names to point at the updated pail, in link order.
    #[must_use]
    pub fn names(self) -> Vec<PailName> {
        match self.incoming {
            Some(PailStatus::Succeeded) => vec![PailName::last(), PailName::last_success()],
            Some(PailStatus::Failed) => vec![PailName::last(), PailName::last_fail()],
            Some(PailStatus::Cancelled) => vec![PailName::last(), PailName::last_cancel()],
            _ => Vec::new(),
        }
    }

    /// Applies the timestamp and status effects to `document`.
    pub fn apply(self, document: &mut PailDocument, now: DateTime<Utc>) {
        if self.stamps_start() {
            document.set_time(Timestamp::Start, now);
        }
        if let Some(status) = self.normalized_status() {
            document.set_status(status);
        }
        if self.stamps_finish() {
            document.set_time(Timestamp::Finish, now);
        }
        document.set_time(Timestamp::Update, now);
    }
}
