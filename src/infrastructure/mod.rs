//! Infrastructure module.
//!
//! This module contains the task repository and the environment-driven
//! server configuration.

pub mod config;
pub mod in_memory;
pub mod repository;

pub use config::{ConfigurationError, LogFormat, ServerConfig, WorkerThreads};
pub use in_memory::InMemoryTaskRepository;
pub use repository::{RepositoryError, TaskRepository};
