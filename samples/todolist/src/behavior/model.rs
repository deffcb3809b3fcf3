//! Wiring of request types to their handlers.

use super::handlers;
use super::request::{
    AddTaskRequest, DeleteTaskRequest, FilterTasksRequest, FindOrCreateListRequest,
    ListTasksRequest, ToggleTaskCompletionRequest,
};
use super::response::TodoListResponse;
use crate::domain::{TodoListError, TodoLists};
use behavior_core::{BehaviorModel, Model, ModelError, StatelessBehavior};
use std::sync::Arc;

/// The behavior built from [`TodoListBehaviorModel`]
pub type TodoListBehavior = StatelessBehavior<TodoListResponse, TodoListError>;

/// Dispatch table of the todo list: one handler per request type, all sharing
/// the same repository.
///
/// # Example
///
/// ```
/// use behavior_core::{Behavior, StatelessBehavior};
/// use behavior_testing::InMemoryRepository;
/// use std::sync::Arc;
/// use todolist::behavior::{FindOrCreateListRequest, TodoListBehaviorModel};
/// use todolist::domain::{TodoList, TodoListAccess};
///
/// let lists = Arc::new(InMemoryRepository::<TodoList, _>::new(TodoListAccess));
/// let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(lists))?;
///
/// let response = behavior.react_to(FindOrCreateListRequest {})?;
/// assert!(response.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct TodoListBehaviorModel {
    lists: Arc<dyn TodoLists>,
}

impl TodoListBehaviorModel {
    /// Create a model whose handlers use the given repository
    #[must_use]
    pub const fn new(lists: Arc<dyn TodoLists>) -> Self {
        Self { lists }
    }
}

impl std::fmt::Debug for TodoListBehaviorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoListBehaviorModel").finish_non_exhaustive()
    }
}

impl BehaviorModel for TodoListBehaviorModel {
    type Response = TodoListResponse;
    type Error = TodoListError;

    fn model(&self) -> Result<Model<TodoListResponse, TodoListError>, ModelError> {
        let find_or_create = Arc::clone(&self.lists);
        let add = Arc::clone(&self.lists);
        let toggle = Arc::clone(&self.lists);
        let delete = Arc::clone(&self.lists);
        let list = Arc::clone(&self.lists);
        let filter = Arc::clone(&self.lists);

        Model::builder()
            .on(move |r: FindOrCreateListRequest| {
                handlers::find_or_create_list(find_or_create.as_ref(), r)
            })
            .on(move |r: AddTaskRequest| handlers::add_task(add.as_ref(), r))
            .on_consume(move |r: ToggleTaskCompletionRequest| {
                handlers::toggle_task_completion(toggle.as_ref(), r)
            })
            .on_consume(move |r: DeleteTaskRequest| handlers::delete_task(delete.as_ref(), r))
            .on(move |r: ListTasksRequest| handlers::list_tasks(list.as_ref(), r))
            .on(move |r: FilterTasksRequest| handlers::filter_tasks(filter.as_ref(), r))
            .build()
    }
}
