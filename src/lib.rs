//! # Task Tracker API
//!
//! An HTTP service for creating, reading, updating, deleting, and listing
//! task records.
//!
//! ## Overview
//!
//! - **`domain`**: the task entity, the `TaskService` business rules, and their errors
//! - **`infrastructure`**: the concurrency-safe in-memory repository and server configuration
//! - **`api`**: axum handlers, DTOs, and error responses
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chrono::{Duration, Utc};
//! use task_tracker_api::domain::{CreateTaskInput, TaskFilter, TaskService, TaskStatus, Timestamp};
//! use task_tracker_api::infrastructure::InMemoryTaskRepository;
//!
//! let service = TaskService::new(Arc::new(InMemoryTaskRepository::new()));
//! let task = service
//!     .create_task(CreateTaskInput {
//!         title: "Report".to_string(),
//!         due_date: Some(Timestamp::from_datetime(Utc::now() + Duration::hours(24))),
//!         ..CreateTaskInput::default()
//!     })
//!     .unwrap();
//!
//! assert_eq!(task.status, TaskStatus::Pending);
//! assert_eq!(service.list_tasks(TaskFilter::default()).unwrap(), vec![task]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod domain;
pub mod infrastructure;
