//! Repository trait for the task entity.
//!
//! Repositories own the canonical copy of every task. Every method crosses a
//! copy boundary: implementations store clones of what they are given and
//! return clones of what they hold.

use thiserror::Error;

use crate::domain::{Task, TaskId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No task is stored under the identifier.
    #[error("task not found")]
    NotFound(TaskId),
}

// =============================================================================
// Task Repository
// =============================================================================

/// Repository trait for Task entities.
///
/// All operations are safe to call concurrently from multiple threads.
pub trait TaskRepository: Send + Sync {
    /// Assigns a fresh identifier to `task` and stores a copy of it.
    ///
    /// Any identifier already on `task` is overwritten; identifiers are never
    /// reused. After the call `task.id` holds the assigned identifier.
    fn create(&self, task: &mut Task);

    /// Returns a copy of the task stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such task exists.
    fn get_by_id(&self, id: &TaskId) -> Result<Task, RepositoryError>;

    /// Replaces the stored task with a copy of `task`.
    ///
    /// This is a full replacement keyed by `task.id`, not a field merge.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if `task.id` is not stored.
    fn update(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Removes the task stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such task exists.
    fn delete(&self, id: &TaskId) -> Result<(), RepositoryError>;

    /// Returns copies of every stored task in unspecified order.
    fn list_all(&self) -> Vec<Task>;

    /// Counts all stored tasks.
    fn count(&self) -> usize;
}

// =============================================================================
// Tests
// =============================================================================
