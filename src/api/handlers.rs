//! HTTP handlers for the Task Tracker API.
//!
//! Handlers decode requests into service inputs, call the [`TaskService`],
//! and encode the result. The service is synchronous and holds its lock only
//! for the duration of a map access, so it is called directly from async code.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use super::dto::{CreateTaskRequest, ListTasksQuery, TaskResponse, UpdateTaskRequest};
use super::error::ApiErrorResponse;
use crate::domain::{TaskId, TaskService};
use crate::infrastructure::{InMemoryTaskRepository, TaskRepository};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Task service shared by all handlers.
    pub service: TaskService,
}

impl AppState {
    /// Creates a new `AppState` around an existing service.
    #[must_use]
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }

    /// Creates a new `AppState` backed by the given repository.
    #[must_use]
    pub fn from_repository(repository: Arc<dyn TaskRepository>) -> Self {
        Self::new(TaskService::new(repository))
    }

    /// Creates a new `AppState` backed by an empty in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(Arc::new(InMemoryTaskRepository::new()))
    }
}

/// Maps a JSON body rejection to a 400 response.
fn invalid_json(rejection: &JsonRejection) -> ApiErrorResponse {
    tracing::debug!(%rejection, "Rejected request body");
    ApiErrorResponse::bad_request("INVALID_JSON", "invalid JSON body")
}

// =============================================================================
// POST /tasks Handler
// =============================================================================

/// Creates a new task.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Task title",
///   "description": "Optional description",
///   "status": "PENDING|IN_PROGRESS|DONE",
///   "due_date": "2030-01-01T00:00:00Z"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: Task created successfully
/// - **400 Bad Request**: Malformed JSON, malformed date, or validation error
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with status 400 for any rejected input.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let Json(request) = body.map_err(|rejection| invalid_json(&rejection))?;
    let input = request.into_input()?;

    let task = state.service.create_task(input)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// GET /tasks/{id} Handler
// =============================================================================

/// Returns a single task.
///
/// # Errors
///
/// Returns a 404 [`ApiErrorResponse`] if the task does not exist.
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task = state.service.get_task(&TaskId::from(id))?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PUT /tasks/{id} Handler
// =============================================================================

/// Applies a partial update to a task.
///
/// Every body field is optional; absent fields keep their current value.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] in the following cases:
/// - **400 Bad Request**: Malformed JSON, malformed date, or validation error
/// - **404 Not Found**: The task does not exist
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let Json(request) = body.map_err(|rejection| invalid_json(&rejection))?;
    let input = request.into_input()?;

    let task = state.service.update_task(&TaskId::from(id), input)?;

    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /tasks/{id} Handler
// =============================================================================

/// Deletes a task.
///
/// # Response
///
/// - **204 No Content**: Task deleted
///
/// # Errors
///
/// Returns a 404 [`ApiErrorResponse`] if the task does not exist.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    state.service.delete_task(&TaskId::from(id))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// GET /tasks Handler
// =============================================================================

/// Lists tasks sorted by due date.
///
/// # Query Parameters
///
/// - `status`: Optional filter by task status; an unknown value matches nothing
/// - `page`: Page number (default: 1)
/// - `page_size`: Items per page (default: 10)
///
/// # Errors
///
/// Returns a 400 [`ApiErrorResponse`] if the query string cannot be decoded.
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected query string");
        ApiErrorResponse::bad_request("INVALID_QUERY", "invalid query parameters")
    })?;
    let filter = query.into_filter();

    let tasks = state.service.list_tasks(filter)?;

    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// # Response
///
/// - **200 OK**: Service is healthy
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
