//! Task domain model.
//!
//! This module contains the task entity, its value objects, and the fixed
//! validation messages shared by the service and the HTTP layer.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

// =============================================================================
// Validation Messages
// =============================================================================

/// Message reported when a title is missing or empty.
pub const TITLE_REQUIRED: &str = "title is required";

/// Message reported when a due date is missing.
pub const DUE_DATE_REQUIRED: &str = "due_date is required";

/// Message reported when a due date is not strictly in the future.
pub const DUE_DATE_PAST: &str = "due_date must be in the future";

/// Message reported when a status string is not one of the known statuses.
pub const STATUS_INVALID: &str = "invalid status";

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Identifiers are opaque strings. A freshly built [`Task`] carries an
/// unassigned (empty) identifier until the repository stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a new identifier from a random UUID (v4).
    ///
    /// **Note**: This is an impure function (side effect: random number generation).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` once the repository has assigned this identifier.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A point in time that keeps the UTC offset it was supplied with.
///
/// Equality and ordering compare instants; the offset only affects how the
/// value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Creates a `Timestamp` from a datetime in any time zone, keeping its offset.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        Self(datetime.fixed_offset())
    }

    /// Returns the inner datetime with its original offset.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().fixed_offset())
    }

    /// Parses an RFC 3339 string, keeping the offset as written.
    ///
    /// # Errors
    ///
    /// Returns the underlying `chrono` parse error if the input is not RFC 3339.
    pub fn parse_rfc3339(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(Self)
    }

    /// Returns `true` if this timestamp is strictly later than `reference`.
    #[must_use]
    pub fn is_after(&self, reference: &Self) -> bool {
        self.0 > reference.0
    }
}

impl std::fmt::Display for Timestamp {
    /// Renders RFC 3339 with the stored offset (`Z` for UTC).
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

// =============================================================================
// Enums
// =============================================================================

/// The status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has not been started yet.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task has been completed.
    Done,
}

impl TaskStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Returns the wire spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known [`TaskStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    /// Parses the exact wire spelling; matching is case-sensitive.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

// =============================================================================
// Task
// =============================================================================

/// The task entity.
///
/// `Task` is a plain value: the repository stores its own clone and hands
/// out clones, so holding a `Task` never aliases stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, assigned by the repository.
    pub id: TaskId,
    /// Title of the task; never empty once validated.
    pub title: String,
    /// Free-form description; empty when not supplied.
    pub description: String,
    /// Current status of the task.
    pub status: TaskStatus,
    /// When the task is due.
    pub due_date: Timestamp,
}

impl Task {
    /// Creates a new task with an unassigned identifier.
    ///
    /// The task starts with an empty description and [`TaskStatus::Pending`].
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: Timestamp) -> Self {
        Self {
            id: TaskId::default(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Pending,
            due_date,
        }
    }

    /// Returns a new task with the given description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    /// Returns a new task with the given status.
    #[must_use]
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self { status, ..self }
    }

    /// Returns a new task with the given identifier.
    #[must_use]
    pub fn with_id(self, id: TaskId) -> Self {
        Self { id, ..self }
    }
}

// =============================================================================
// Tests
// =============================================================================
