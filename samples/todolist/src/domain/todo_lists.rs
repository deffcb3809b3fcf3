//! Storage of todo lists.

use super::ids::TodoListId;
use super::todo_list::TodoList;
use behavior_core::{EntityAccess, Repository};

/// Repository of todo lists.
///
/// Any [`Repository`] of [`TodoList`] keyed by [`TodoListId`] is a `TodoLists`.
pub trait TodoLists: Repository<TodoList, Id = TodoListId> {}

impl<R> TodoLists for R where R: Repository<TodoList, Id = TodoListId> {}

/// Identity and copy operations for storing [`TodoList`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoListAccess;

impl EntityAccess<TodoList> for TodoListAccess {
    type Id = TodoListId;

    // Lists are created with an id, so there is always one to return.
    fn id_of(&self, list: &TodoList) -> Option<TodoListId> {
        Some(list.id())
    }

    fn next_id(&self) -> TodoListId {
        TodoListId::new()
    }

    fn copy_with_id(&self, list: &TodoList, id: TodoListId) -> TodoList {
        list.copy_with_id(id)
    }
}
