//! Task service.
//!
//! The service enforces the business rules for tasks and orchestrates the
//! repository. It is synchronous and transport independent: the HTTP layer
//! decodes requests into the input types defined here and maps
//! [`TaskError`] variants to status codes.
//!
//! Validation reads the clock once per call and hands the instant to pure
//! helpers, so every rule in a call is checked against the same `now`.

use std::sync::Arc;

use super::error::{TaskError, ValidationFailure};
use super::task::{Task, TaskId, TaskStatus, Timestamp};
use crate::infrastructure::TaskRepository;

/// Page used when the requested page is not positive.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the requested size is not positive.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

// =============================================================================
// Inputs
// =============================================================================

/// Input for [`TaskService::create_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskInput {
    /// Title of the task; must not be empty.
    pub title: String,
    /// Optional description; empty when not supplied.
    pub description: String,
    /// Status spelling, or `None` for `PENDING`.
    pub status: Option<String>,
    /// Due date; must be present and strictly in the future.
    pub due_date: Option<Timestamp>,
}

/// Input for [`TaskService::update_task`].
///
/// `None` leaves a field unchanged. For `due_date` the outer option marks the
/// field as supplied and the inner option carries the value, so a supplied
/// but empty due date can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskInput {
    /// New title; must not be empty.
    pub title: Option<String>,
    /// New description; empty is allowed.
    pub description: Option<String>,
    /// New status spelling.
    pub status: Option<String>,
    /// New due date.
    pub due_date: Option<Option<Timestamp>>,
}

/// Filter and pagination for [`TaskService::list_tasks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only tasks whose status spelling equals this value.
    ///
    /// The value is not validated; an unknown spelling matches no task.
    pub status: Option<String>,
    /// 1-indexed page; values `<= 0` mean [`DEFAULT_PAGE`].
    pub page: i64,
    /// Items per page; values `<= 0` mean [`DEFAULT_PAGE_SIZE`].
    pub page_size: i64,
}

// =============================================================================
// Pagination
// =============================================================================

/// Normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed).
    pub page: i64,
    /// Number of items per page.
    pub page_size: i64,
}

impl Pagination {
    /// Creates pagination, substituting defaults for non-positive values.
    #[must_use]
    pub const fn normalized(page: i64, page_size: i64) -> Self {
        Self {
            page: if page <= 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size <= 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Returns the index of the first item on the page.
    ///
    /// `None` when the offset does not fit in `usize`.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        let offset = (self.page - 1).checked_mul(self.page_size)?;
        usize::try_from(offset).ok()
    }

    /// Returns the page size as `usize`, saturating on narrow targets.
    #[must_use]
    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }

    /// Returns the slice of `items` covered by this page.
    ///
    /// Empty if the page starts past the end; shorter for a final partial page.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(start) = self.offset().filter(|start| *start < items.len()) else {
            return &[];
        };
        let end = start.saturating_add(self.limit()).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::normalized(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

// =============================================================================
// Task Service
// =============================================================================

/// Business operations on tasks.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TaskService")
            .field("tasks", &self.repository.count())
            .finish()
    }
}

impl TaskService {
    /// Creates a service backed by `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Validates `input` and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Validation` if the title is empty, the due date is
    /// missing or not in the future, or the status is unknown.
    pub fn create_task(&self, input: CreateTaskInput) -> Result<Task, TaskError> {
        let mut task = build_task(input, &Timestamp::now()).inspect_err(|error| {
            tracing::warn!(%error, "Rejected task creation");
        })?;

        self.repository.create(&mut task);

        tracing::info!(task_id = %task.id, status = %task.status, "Task created");
        Ok(task)
    }

    /// Returns the task stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no such task exists.
    pub fn get_task(&self, id: &TaskId) -> Result<Task, TaskError> {
        Ok(self.repository.get_by_id(id)?)
    }

    /// Applies a partial update to the task stored under `id`.
    ///
    /// Fields are checked in order (title, description, status, due date);
    /// the first failure is returned and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no such task exists, or
    /// `TaskError::Validation` if a supplied field breaks a rule.
    pub fn update_task(&self, id: &TaskId, input: UpdateTaskInput) -> Result<Task, TaskError> {
        let existing = self.repository.get_by_id(id)?;

        let updated = apply_update(existing, input, &Timestamp::now()).inspect_err(|error| {
            tracing::warn!(task_id = %id, %error, "Rejected task update");
        })?;

        self.repository.update(&updated)?;

        tracing::info!(task_id = %updated.id, status = %updated.status, "Task updated");
        Ok(updated)
    }

    /// Deletes the task stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no such task exists.
    pub fn delete_task(&self, id: &TaskId) -> Result<(), TaskError> {
        self.repository.delete(id)?;
        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }

    /// Lists tasks matching `filter`, sorted by due date, one page at a time.
    ///
    /// Tasks with equal due dates are ordered by identifier. Pages past the
    /// end yield an empty list.
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` keeps the signature uniform with the
    /// other operations.
    pub fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError> {
        let pagination = Pagination::normalized(filter.page, filter.page_size);

        let mut tasks: Vec<Task> = self
            .repository
            .list_all()
            .into_iter()
            .filter(|task| {
                filter
                    .status
                    .as_deref()
                    .is_none_or(|status| task.status.as_str() == status)
            })
            .collect();

        tasks.sort_by(|left, right| {
            left.due_date
                .cmp(&right.due_date)
                .then_with(|| left.id.cmp(&right.id))
        });

        let page = pagination.window(&tasks).to_vec();

        tracing::debug!(
            matched = tasks.len(),
            returned = page.len(),
            page = pagination.page,
            page_size = pagination.page_size,
            "Tasks listed"
        );
        Ok(page)
    }
}

// =============================================================================
// Validation Helpers (pure)
// =============================================================================

fn validate_title(title: &str) -> Result<(), ValidationFailure> {
    if title.is_empty() {
        Err(ValidationFailure::TitleRequired)
    } else {
        Ok(())
    }
}

fn validate_due_date(
    due_date: Option<Timestamp>,
    now: &Timestamp,
) -> Result<Timestamp, ValidationFailure> {
    let due_date = due_date.ok_or(ValidationFailure::DueDateRequired)?;
    if due_date.is_after(now) {
        Ok(due_date)
    } else {
        Err(ValidationFailure::DueDatePast)
    }
}

fn parse_status(status: &str) -> Result<TaskStatus, ValidationFailure> {
    status
        .parse()
        .map_err(|_| ValidationFailure::StatusInvalid)
}

/// Builds an unsaved task from a create request.
fn build_task(input: CreateTaskInput, now: &Timestamp) -> Result<Task, ValidationFailure> {
    validate_title(&input.title)?;
    let due_date = validate_due_date(input.due_date, now)?;
    let status = input
        .status
        .as_deref()
        .map_or(Ok(TaskStatus::default()), parse_status)?;

    Ok(Task::new(input.title, due_date)
        .with_description(input.description)
        .with_status(status))
}

/// Merges a partial update into `task`.
fn apply_update(
    mut task: Task,
    input: UpdateTaskInput,
    now: &Timestamp,
) -> Result<Task, ValidationFailure> {
    if let Some(title) = input.title {
        validate_title(&title)?;
        task.title = title;
    }

    if let Some(description) = input.description {
        task.description = description;
    }

    if let Some(status) = input.status {
        task.status = parse_status(&status)?;
    }

    if let Some(due_date) = input.due_date {
        task.due_date = validate_due_date(due_date, now)?;
    }

    Ok(task)
}

// =============================================================================
// Tests
// =============================================================================
