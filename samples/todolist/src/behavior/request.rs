//! Requests understood by the todo list behavior.
//!
//! On the wire every request is a JSON object tagged with `"@type"`:
//!
//! ```json
//! { "@type": "AddTaskRequest", "todoListUuid": "...", "taskName": "Buy milk" }
//! ```

use crate::domain::{TaskId, TodoListId};
use behavior_core::Message;
use serde::{Deserialize, Serialize};

/// Get the id of the list, creating one if none exists yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOrCreateListRequest {}

/// Add a task to a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    /// List to add the task to
    pub todo_list_uuid: TodoListId,
    /// Name of the new task; `null` or missing is rejected by the list
    #[serde(default)]
    pub task_name: Option<String>,
}

impl AddTaskRequest {
    /// Request to add a task with the given name
    #[must_use]
    pub fn new(todo_list_uuid: TodoListId, task_name: impl Into<String>) -> Self {
        Self {
            todo_list_uuid,
            task_name: Some(task_name.into()),
        }
    }
}

/// Flip the completion state of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTaskCompletionRequest {
    /// List containing the task
    pub todo_list_uuid: TodoListId,
    /// Task to toggle
    pub task_uuid: TaskId,
}

/// Remove a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskRequest {
    /// List containing the task
    pub todo_list_uuid: TodoListId,
    /// Task to delete
    pub task_uuid: TaskId,
}

/// List every task of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksRequest {
    /// List to read
    pub todo_list_uuid: TodoListId,
}

/// List the tasks of a list with the given completion state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTasksRequest {
    /// List to read
    pub todo_list_uuid: TodoListId,
    /// Completion state to keep
    pub completed: bool,
}

/// Any todo list request, as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
#[allow(clippy::enum_variant_names)]
pub enum TodoListRequest {
    /// See [`FindOrCreateListRequest`]
    FindOrCreateListRequest(FindOrCreateListRequest),
    /// See [`AddTaskRequest`]
    AddTaskRequest(AddTaskRequest),
    /// See [`ToggleTaskCompletionRequest`]
    ToggleTaskCompletionRequest(ToggleTaskCompletionRequest),
    /// See [`DeleteTaskRequest`]
    DeleteTaskRequest(DeleteTaskRequest),
    /// See [`ListTasksRequest`]
    ListTasksRequest(ListTasksRequest),
    /// See [`FilterTasksRequest`]
    FilterTasksRequest(FilterTasksRequest),
}

// The behavior dispatches on the concrete request type, never on the enum.
impl From<TodoListRequest> for Message {
    fn from(request: TodoListRequest) -> Self {
        match request {
            TodoListRequest::FindOrCreateListRequest(r) => Box::new(r),
            TodoListRequest::AddTaskRequest(r) => Box::new(r),
            TodoListRequest::ToggleTaskCompletionRequest(r) => Box::new(r),
            TodoListRequest::DeleteTaskRequest(r) => Box::new(r),
            TodoListRequest::ListTasksRequest(r) => Box::new(r),
            TodoListRequest::FilterTasksRequest(r) => Box::new(r),
        }
    }
}
