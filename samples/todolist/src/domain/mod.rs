//! Todo list domain: the aggregate, its values and its storage contract.

pub mod error;
pub mod ids;
pub mod task;
pub mod todo_list;
pub mod todo_lists;

pub use error::TodoListError;
pub use ids::{TaskId, TodoListId};
pub use task::Task;
pub use todo_list::TodoList;
pub use todo_lists::{TodoListAccess, TodoLists};
