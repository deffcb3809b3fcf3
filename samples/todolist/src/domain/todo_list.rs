//! The `TodoList` aggregate.

use super::error::TodoListError;
use super::ids::{TaskId, TodoListId};
use super::task::Task;
use serde::{Deserialize, Serialize};

/// Aggregate root owning an ordered list of tasks.
///
/// Tasks keep their insertion order. Task names are validated when a task is
/// added; nothing else can change a task's name afterwards.
///
/// # Example
///
/// ```
/// use todolist::domain::TodoList;
///
/// let mut list = TodoList::new();
/// let task_id = list.add_task("Buy milk")?;
/// list.toggle_task_completion(task_id);
///
/// assert_eq!(list.size(), 1);
/// assert!(list.find_task(task_id).is_some_and(|task| task.is_completed()));
/// # Ok::<(), todolist::domain::TodoListError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    id: TodoListId,
    tasks: Vec<Task>,
}

impl TodoList {
    /// An empty list with a fresh id
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(TodoListId::new())
    }

    /// An empty list with the given id
    #[must_use]
    pub const fn with_id(id: TodoListId) -> Self {
        Self {
            id,
            tasks: Vec::new(),
        }
    }

    /// Identifier of the list
    #[must_use]
    pub const fn id(&self) -> TodoListId {
        self.id
    }

    /// Append an uncompleted task and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::InvalidName`] if `name` is `None`, empty or
    /// whitespace only. The list is left unchanged.
    pub fn add_task<'a>(
        &mut self,
        name: impl Into<Option<&'a str>>,
    ) -> Result<TaskId, TodoListError> {
        let name = name
            .into()
            .filter(|name| !name.trim().is_empty())
            .ok_or(TodoListError::InvalidName)?;

        let task_id = TaskId::new();
        self.tasks.push(Task::new(task_id, name.to_string(), false));
        tracing::debug!(list = %self.id, task = %task_id, "Task added");
        Ok(task_id)
    }

    /// Invert the completion flag of a task; unknown ids are ignored.
    pub fn toggle_task_completion(&mut self, task_id: TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == task_id) {
            *task = task.toggled();
        }
    }

    /// Remove a task; unknown ids are ignored.
    pub fn delete_task(&mut self, task_id: TaskId) {
        if let Some(index) = self.tasks.iter().position(|task| task.id() == task_id) {
            self.tasks.remove(index);
        }
    }

    /// The task with the given id
    #[must_use]
    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// All tasks, in insertion order
    #[must_use]
    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks with the given completion state, in insertion order
    #[must_use]
    pub fn list_tasks_by_completion(&self, completed: bool) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_completed() == completed)
            .cloned()
            .collect()
    }

    /// Number of tasks
    #[must_use]
    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    /// Deep copy of this list under another id
    #[must_use]
    pub fn copy_with_id(&self, id: TodoListId) -> Self {
        Self {
            id,
            tasks: self.tasks.clone(),
        }
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}
