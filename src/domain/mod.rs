//! Domain module for task tracking.
//!
//! This module contains the task entity, the service that enforces business
//! rules, and the errors the service reports.

pub mod error;
pub mod service;
pub mod task;

pub use error::{TaskError, ValidationFailure};
pub use service::{
    CreateTaskInput, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Pagination, TaskFilter, TaskService,
    UpdateTaskInput,
};
pub use task::{
    DUE_DATE_PAST, DUE_DATE_REQUIRED, STATUS_INVALID, TITLE_REQUIRED, Task, TaskId, TaskStatus,
    Timestamp, UnknownStatus,
};
