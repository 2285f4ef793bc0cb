//! Errors surfaced by the task service.

use thiserror::Error;

use super::task::{DUE_DATE_PAST, DUE_DATE_REQUIRED, STATUS_INVALID, TITLE_REQUIRED};
use crate::infrastructure::RepositoryError;

// =============================================================================
// Validation Failure
// =============================================================================

/// A business rule violated by caller-supplied data.
///
/// The `Display` output is the fixed message for the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// The title is empty.
    #[error("{}", TITLE_REQUIRED)]
    TitleRequired,
    /// The due date is missing.
    #[error("{}", DUE_DATE_REQUIRED)]
    DueDateRequired,
    /// The due date is not strictly in the future.
    #[error("{}", DUE_DATE_PAST)]
    DueDatePast,
    /// The status is not one of the known statuses.
    #[error("{}", STATUS_INVALID)]
    StatusInvalid,
}

impl ValidationFailure {
    /// Returns the fixed message for this failure.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TitleRequired => TITLE_REQUIRED,
            Self::DueDateRequired => DUE_DATE_REQUIRED,
            Self::DueDatePast => DUE_DATE_PAST,
            Self::StatusInvalid => STATUS_INVALID,
        }
    }

    /// Returns the name of the input field that failed validation.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::TitleRequired => "title",
            Self::DueDateRequired | Self::DueDatePast => "due_date",
            Self::StatusInvalid => "status",
        }
    }
}

// =============================================================================
// Task Error
// =============================================================================

/// Errors returned by [`TaskService`](super::TaskService) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Caller-supplied data violates a business rule.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The referenced task does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl TaskError {
    /// Returns `true` for validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for missing tasks.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<RepositoryError> for TaskError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => Self::NotFound(error.to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
