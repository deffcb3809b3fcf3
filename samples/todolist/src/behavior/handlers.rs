//! Use cases of the todo list, one function per request type.
//!
//! Each command loads the list, applies one aggregate operation and saves the
//! result. Queries only load.

use super::request::{
    AddTaskRequest, DeleteTaskRequest, FilterTasksRequest, FindOrCreateListRequest,
    ListTasksRequest, ToggleTaskCompletionRequest,
};
use super::response::{
    AddTaskResponse, FilterTasksResponse, FindOrCreateListResponse, ListTasksResponse, TaskSummary,
};
use crate::domain::{TodoList, TodoListError, TodoListId, TodoLists};

fn load(lists: &dyn TodoLists, id: TodoListId) -> Result<TodoList, TodoListError> {
    lists.find_by_id(&id)?.ok_or(TodoListError::NotFound(id))
}

/// Return the first stored list, creating and saving one if there is none.
///
/// # Errors
///
/// Returns [`TodoListError::Repository`] if the repository fails.
#[tracing::instrument(skip(lists))]
pub fn find_or_create_list(
    lists: &dyn TodoLists,
    _request: FindOrCreateListRequest,
) -> Result<FindOrCreateListResponse, TodoListError> {
    let list = match lists.find_all()?.into_iter().next() {
        Some(list) => list,
        None => {
            let list = lists.save(&TodoList::new())?;
            tracing::info!(list = %list.id(), "Todo list created");
            list
        }
    };

    Ok(FindOrCreateListResponse {
        todo_list_uuid: list.id(),
    })
}

/// Add a task to a list.
///
/// # Errors
///
/// - [`TodoListError::NotFound`] if the list doesn't exist
/// - [`TodoListError::InvalidName`] if the task name is missing or blank
/// - [`TodoListError::Repository`] if the repository fails
#[tracing::instrument(skip(lists))]
pub fn add_task(
    lists: &dyn TodoLists,
    request: AddTaskRequest,
) -> Result<AddTaskResponse, TodoListError> {
    let mut list = load(lists, request.todo_list_uuid)?;
    let task_uuid = list.add_task(request.task_name.as_deref())?;
    lists.save(&list)?;

    Ok(AddTaskResponse { task_uuid })
}

/// Flip the completion state of a task.
///
/// # Errors
///
/// - [`TodoListError::NotFound`] if the list doesn't exist
/// - [`TodoListError::Repository`] if the repository fails
#[tracing::instrument(skip(lists))]
pub fn toggle_task_completion(
    lists: &dyn TodoLists,
    request: ToggleTaskCompletionRequest,
) -> Result<(), TodoListError> {
    let mut list = load(lists, request.todo_list_uuid)?;
    list.toggle_task_completion(request.task_uuid);
    lists.save(&list)?;
    Ok(())
}

/// Remove a task.
///
/// # Errors
///
/// - [`TodoListError::NotFound`] if the list doesn't exist
/// - [`TodoListError::Repository`] if the repository fails
#[tracing::instrument(skip(lists))]
pub fn delete_task(lists: &dyn TodoLists, request: DeleteTaskRequest) -> Result<(), TodoListError> {
    let mut list = load(lists, request.todo_list_uuid)?;
    list.delete_task(request.task_uuid);
    lists.save(&list)?;
    Ok(())
}

/// All tasks of a list.
///
/// # Errors
///
/// - [`TodoListError::NotFound`] if the list doesn't exist
/// - [`TodoListError::Repository`] if the repository fails
#[tracing::instrument(skip(lists))]
pub fn list_tasks(
    lists: &dyn TodoLists,
    request: ListTasksRequest,
) -> Result<ListTasksResponse, TodoListError> {
    let list = load(lists, request.todo_list_uuid)?;
    Ok(ListTasksResponse {
        tasks: list.list_tasks().iter().map(TaskSummary::from).collect(),
    })
}

/// Tasks of a list with the requested completion state.
///
/// # Errors
///
/// - [`TodoListError::NotFound`] if the list doesn't exist
/// - [`TodoListError::Repository`] if the repository fails
#[tracing::instrument(skip(lists))]
pub fn filter_tasks(
    lists: &dyn TodoLists,
    request: FilterTasksRequest,
) -> Result<FilterTasksResponse, TodoListError> {
    let list = load(lists, request.todo_list_uuid)?;
    Ok(FilterTasksResponse {
        tasks: list
            .list_tasks_by_completion(request.completed)
            .iter()
            .map(TaskSummary::from)
            .collect(),
    })
}
