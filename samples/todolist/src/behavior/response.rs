//! Responses produced by the todo list behavior.

use crate::domain::{Task, TaskId, TodoListId};
use serde::{Deserialize, Serialize};

/// Id of the (possibly just created) list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindOrCreateListResponse {
    /// Id of the list
    pub todo_list_uuid: TodoListId,
}

/// Id of the task that was added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskResponse {
    /// Id of the new task
    pub task_uuid: TaskId,
}

/// Read model of a single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Id of the task
    pub uuid: TaskId,
    /// Name of the task
    pub name: String,
    /// Whether the task is done
    pub completed: bool,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            uuid: task.id(),
            name: task.name().to_string(),
            completed: task.is_completed(),
        }
    }
}

/// All tasks of a list, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksResponse {
    /// The tasks
    pub tasks: Vec<TaskSummary>,
}

/// Tasks of a list with the requested completion state, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTasksResponse {
    /// The tasks
    pub tasks: Vec<TaskSummary>,
}

/// Any response of the todo list behavior.
///
/// Serialized as the wrapped response itself, without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TodoListResponse {
    /// See [`FindOrCreateListResponse`]
    FindOrCreateList(FindOrCreateListResponse),
    /// See [`AddTaskResponse`]
    AddTask(AddTaskResponse),
    /// See [`ListTasksResponse`]
    ListTasks(ListTasksResponse),
    /// See [`FilterTasksResponse`]
    FilterTasks(FilterTasksResponse),
}

impl From<FindOrCreateListResponse> for TodoListResponse {
    fn from(response: FindOrCreateListResponse) -> Self {
        Self::FindOrCreateList(response)
    }
}

impl From<AddTaskResponse> for TodoListResponse {
    fn from(response: AddTaskResponse) -> Self {
        Self::AddTask(response)
    }
}

impl From<ListTasksResponse> for TodoListResponse {
    fn from(response: ListTasksResponse) -> Self {
        Self::ListTasks(response)
    }
}

impl From<FilterTasksResponse> for TodoListResponse {
    fn from(response: FilterTasksResponse) -> Self {
        Self::FilterTasks(response)
    }
}
