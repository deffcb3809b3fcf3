//! A single entry of a todo list.

use super::ids::TaskId;
use serde::{Deserialize, Serialize};

/// An immutable task.
///
/// Changing a task means replacing it with a new value; see
/// [`TodoList::toggle_task_completion`](super::TodoList::toggle_task_completion).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    completed: bool,
}

impl Task {
    pub(crate) const fn new(id: TaskId, name: String, completed: bool) -> Self {
        Self {
            id,
            name,
            completed,
        }
    }

    /// Identifier of the task
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Name of the task
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the task is done
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Same task with its completion flag inverted
    #[must_use]
    pub(crate) fn toggled(&self) -> Self {
        Self::new(self.id, self.name.clone(), !self.completed)
    }
}
