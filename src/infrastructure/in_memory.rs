//! In-memory repository implementation.
//!
//! # Features
//!
//! - Thread-safe with `Arc<RwLock<...>>` (one coarse lock over the whole map)
//! - Clone on write, clone on read: callers never alias stored records
//! - Process-lifetime storage; nothing is flushed on shutdown

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{Task, TaskId};
use crate::infrastructure::{RepositoryError, TaskRepository};

// =============================================================================
// In-Memory Task Repository
// =============================================================================

/// In-memory implementation of `TaskRepository`.
///
/// Cloning the repository yields another handle to the same store.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use task_tracker_api::domain::{Task, Timestamp};
/// use task_tracker_api::infrastructure::{InMemoryTaskRepository, TaskRepository};
///
/// let repository = InMemoryTaskRepository::new();
/// let mut task = Task::new("Write report", Timestamp::from_datetime(Utc::now() + Duration::days(1)));
///
/// repository.create(&mut task);
/// let found = repository.get_by_id(&task.id).unwrap();
/// assert_eq!(found, task);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    /// Thread-safe storage keyed by task identifier.
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, task: &mut Task) {
        let mut guard = self.tasks.write();

        // Identifiers are never reused.
        let mut id = TaskId::generate();
        while guard.contains_key(&id) {
            id = TaskId::generate();
        }

        task.id = id.clone();
        guard.insert(id, task.clone());
        drop(guard);

        tracing::debug!(task_id = %task.id, "Task stored");
    }

    fn get_by_id(&self, id: &TaskId) -> Result<Task, RepositoryError> {
        self.tasks
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    fn update(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut guard = self.tasks.write();
        let Some(stored) = guard.get_mut(&task.id) else {
            return Err(RepositoryError::NotFound(task.id.clone()));
        };
        *stored = task.clone();
        drop(guard);

        tracing::debug!(task_id = %task.id, "Task replaced");
        Ok(())
    }

    fn delete(&self, id: &TaskId) -> Result<(), RepositoryError> {
        let removed = self.tasks.write().remove(id);
        match removed {
            Some(_) => {
                tracing::debug!(task_id = %id, "Task removed");
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id.clone())),
        }
    }

    fn list_all(&self) -> Vec<Task> {
        self.tasks.read().values().cloned().collect()
    }

    fn count(&self) -> usize {
        self.tasks.read().len()
    }
}

// =============================================================================
// Tests
// =============================================================================
