use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use taskboard_protocol::Task;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("description must not be blank")]
    BlankDescription,
}

/// Authoritative in-memory task collection.
///
/// Ids come from an atomic counter and are never reissued, including after a
/// delete. The map lock keeps each read-modify-write atomic per record; the
/// BTreeMap keeps [`TaskStore::get_all`] id-ordered.
#[derive(Default)]
pub struct TaskStore {
    next_id: AtomicU64,
    tasks: RwLock<BTreeMap<u64, Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks, id ascending.
    pub fn get_all(&self) -> Vec<Task> {
        self.tasks.read().values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<Task> {
        self.tasks.read().get(&id).cloned()
    }

    /// Inserts a new task with the next sequential id. Blank or whitespace
    /// descriptions are rejected before an id is consumed.
    pub fn create(&self, description: &str) -> Result<Task, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::BlankDescription);
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let task = Task {
            id,
            description: description.to_string(),
            is_completed: false,
            created_at: Utc::now(),
        };
        self.tasks.write().insert(id, task.clone());
        Ok(task)
    }

    /// Flips the completion flag under the write lock so concurrent readers
    /// never observe a half-updated record.
    pub fn toggle(&self, id: u64) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.get_mut(&id)?;
        task.is_completed = !task.is_completed;
        Some(task.clone())
    }

    /// Replaces the description if the supplied value is non-blank after
    /// trimming; otherwise the field keeps its prior value. Returns the
    /// record either way, or `None` for an unknown id.
    pub fn update_description(&self, id: u64, description: Option<&str>) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.get_mut(&id)?;
        if let Some(desc) = description {
            if !desc.trim().is_empty() {
                task.description = desc.to_string();
            }
        }
        Some(task.clone())
    }

    /// Removes the record. The id is never reissued.
    pub fn delete(&self, id: u64) -> bool {
        self.tasks.write().remove(&id).is_some()
    }
}
