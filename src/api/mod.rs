//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use dto::{CreateTaskRequest, ListTasksQuery, TaskResponse, UpdateTaskRequest};
pub use error::{ApiError, ApiErrorResponse, FieldError};
pub use handlers::{
    AppState, HealthResponse, create_task, delete_task, get_task, health_check, list_tasks,
    update_task,
};
pub use router::app_router;
