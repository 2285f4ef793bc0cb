//! Data Transfer Objects for API requests and responses.
//!
//! This module contains DTOs that are separate from domain models,
//! providing a clean API contract. Due dates travel as RFC 3339 strings.

use serde::{Deserialize, Serialize};

use super::error::ApiErrorResponse;
use crate::domain::{
    CreateTaskInput, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Task, TaskFilter, TaskStatus, Timestamp,
    UpdateTaskInput,
};

// =============================================================================
// Task DTOs
// =============================================================================

/// Request DTO for creating a new task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the task.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// Status spelling; empty means "not supplied".
    #[serde(default)]
    pub status: Option<String>,
    /// Due date as RFC 3339; empty means "not supplied".
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Converts the request into service input.
    ///
    /// # Errors
    ///
    /// Returns a 400 response if `due_date` is not RFC 3339.
    pub fn into_input(self) -> Result<CreateTaskInput, ApiErrorResponse> {
        Ok(CreateTaskInput {
            title: self.title,
            description: self.description,
            status: self.status.filter(|status| !status.is_empty()),
            due_date: parse_due_date(self.due_date.as_deref())?,
        })
    }
}

/// Request DTO for updating a task.
///
/// Absent fields are left unchanged. A `due_date` of `null` or `""` also
/// leaves the stored due date unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title for the task.
    #[serde(default)]
    pub title: Option<String>,
    /// New description for the task.
    #[serde(default)]
    pub description: Option<String>,
    /// New status for the task.
    #[serde(default)]
    pub status: Option<String>,
    /// New due date for the task.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl UpdateTaskRequest {
    /// Converts the request into service input.
    ///
    /// # Errors
    ///
    /// Returns a 400 response if `due_date` is present but not RFC 3339.
    pub fn into_input(self) -> Result<UpdateTaskInput, ApiErrorResponse> {
        Ok(UpdateTaskInput {
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: parse_due_date(self.due_date.as_deref())?.map(Some),
        })
    }
}

/// Parses an optional RFC 3339 due date; empty strings count as absent.
fn parse_due_date(value: Option<&str>) -> Result<Option<Timestamp>, ApiErrorResponse> {
    match value.filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => Timestamp::parse_rfc3339(value).map(Some).map_err(|_| {
            ApiErrorResponse::bad_request(
                "INVALID_DUE_DATE",
                "invalid due_date format, expected RFC3339",
            )
        }),
    }
}

/// Response DTO for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResponse {
    /// Task ID.
    pub id: String,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Due date (RFC 3339, with the offset it was supplied in).
    pub due_date: String,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            due_date: task.due_date.to_string(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for listing tasks.
///
/// Values are kept as strings so malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Filter by task status spelling; empty means no filter.
    pub status: Option<String>,
    /// Page number (default: 1).
    pub page: Option<String>,
    /// Items per page (default: 10).
    pub page_size: Option<String>,
}

impl ListTasksQuery {
    /// Converts the query into a service filter.
    ///
    /// An empty `status` means no filter. Other values are passed through
    /// unchecked.
    #[must_use]
    pub fn into_filter(self) -> TaskFilter {
        TaskFilter {
            status: self.status.filter(|status| !status.is_empty()),
            page: parse_or(self.page.as_deref(), DEFAULT_PAGE),
            page_size: parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        }
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

// =============================================================================
// Tests
// =============================================================================
