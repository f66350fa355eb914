//! Open JSON document describing a pail.

use super::{PailDomainError, PailId, PailName, PailStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Millisecond timestamps maintained on a pail document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Set when the record is created.
    Create,
    /// Set when the record enters `started`.
    Start,
    /// Set when the record reaches a terminal status.
    Finish,
    /// Refreshed on every update.
    Update,
}

impl Timestamp {
    /// Returns the document key holding this timestamp.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Create => "createTime",
            Self::Start => "startTime",
            Self::Finish => "finishTime",
            Self::Update => "updateTime",
        }
    }
}

/// A pail's metadata document.
///
/// The document is an open JSON object: the store maintains `id`, `name`,
/// `status` and the timestamp fields, and round-trips every other field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PailDocument(Map<String, Value>);

impl PailDocument {
    /// Key of the identifier field.
    pub const ID: &'static str = "id";
    /// Key of the name field.
    pub const NAME: &'static str = "name";
    /// Key of the status field.
    pub const STATUS: &'static str = "status";

    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`PailDomainError::NotAnObject`] for any other JSON value.
    pub fn from_value(value: Value) -> Result<Self, PailDomainError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(PailDomainError::NotAnObject),
        }
    }

    /// Returns the document as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Returns the underlying fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Adds a caller field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets the name field.
    #[must_use]
    pub fn with_name(mut self, name: &PailName) -> Self {
        self.set_name(Some(name));
        self
    }

    /// Sets the status field.
    #[must_use]
    pub fn with_status(mut self, status: PailStatus) -> Self {
        self.set_status(status);
        self
    }

    /// Returns the identifier, if the document carries one.
    ///
    /// # Errors
    ///
    /// Returns [`PailDomainError::InvalidId`] for a malformed string and
    /// [`PailDomainError::InvalidField`] for a non-string value.
    pub fn id(&self) -> Result<Option<PailId>, PailDomainError> {
        match self.0.get(Self::ID) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) => raw.parse::<PailId>().map(Some),
            Some(_) => Err(PailDomainError::InvalidField {
                field: Self::ID,
                expected: "a string",
            }),
        }
    }

    /// Returns the identifier, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PailDomainError::MissingId`] when the field is absent, or
    /// the parsing errors of [`Self::id`].
    pub fn require_id(&self) -> Result<PailId, PailDomainError> {
        self.id()?.ok_or(PailDomainError::MissingId)
    }

    /// Sets the identifier field.
    pub fn set_id(&mut self, id: PailId) {
        self.insert(Self::ID, id.to_string());
    }

    /// Returns the requested name. Absent, `null` and empty names all mean
    /// "unnamed".
    ///
    /// # Errors
    ///
    /// Returns [`PailDomainError::InvalidName`] for an unusable name and
    /// [`PailDomainError::InvalidField`] for a non-string value.
    pub fn name(&self) -> Result<Option<PailName>, PailDomainError> {
        match self.0.get(Self::NAME) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) if raw.is_empty() => Ok(None),
            Some(Value::String(raw)) => PailName::new(raw.as_str()).map(Some),
            Some(_) => Err(PailDomainError::InvalidField {
                field: Self::NAME,
                expected: "a string",
            }),
        }
    }

    /// Returns `true` when the document carries a `name` key, even `null`.
    #[must_use]
    pub fn has_name_field(&self) -> bool {
        self.0.contains_key(Self::NAME)
    }

    /// Sets or clears the name field.
    pub fn set_name(&mut self, name: Option<&PailName>) {
        let Some(value) = name else {
            self.remove(Self::NAME);
            return;
        };
        self.insert(Self::NAME, value.as_str());
    }

    /// Returns the raw status string, if present.
    #[must_use]
    pub fn status_str(&self) -> Option<&str> {
        self.0.get(Self::STATUS).and_then(Value::as_str)
    }

    /// Returns the status when it is one of the known lifecycle values,
    /// spelled exactly as stored. Any other spelling has no lifecycle effect.
    #[must_use]
    pub fn status(&self) -> Option<PailStatus> {
        self.status_str()
            .and_then(|raw| PailStatus::try_from(raw).ok())
    }

    /// Sets the status field.
    pub fn set_status(&mut self, status: PailStatus) {
        self.insert(Self::STATUS, status.as_str());
    }

    /// Returns a timestamp in epoch milliseconds. `null` counts as unset.
    #[must_use]
    pub fn timestamp(&self, which: Timestamp) -> Option<i64> {
        self.0.get(which.key()).and_then(Value::as_i64)
    }

    /// Sets a timestamp in epoch milliseconds.
    pub fn set_timestamp(&mut self, which: Timestamp, millis: i64) {
        self.insert(which.key(), millis);
    }

    /// Returns a timestamp as a UTC instant, when set and representable.
    #[must_use]
    pub fn time(&self, which: Timestamp) -> Option<DateTime<Utc>> {
        self.timestamp(which)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Stores `at` as epoch milliseconds.
    pub fn set_time(&mut self, which: Timestamp, at: DateTime<Utc>) {
        self.set_timestamp(which, at.timestamp_millis());
    }
}

impl TryFrom<Value> for PailDocument {
    type Error = PailDomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<PailDocument> for Value {
    fn from(value: PailDocument) -> Self {
        value.into_value()
    }
}
