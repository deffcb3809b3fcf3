//! The todo list behavior: requests, responses, handlers and their wiring.

pub mod handlers;
pub mod model;
pub mod request;
pub mod response;

pub use model::{TodoListBehavior, TodoListBehaviorModel};
pub use request::{
    AddTaskRequest, DeleteTaskRequest, FilterTasksRequest, FindOrCreateListRequest,
    ListTasksRequest, TodoListRequest, ToggleTaskCompletionRequest,
};
pub use response::{
    AddTaskResponse, FilterTasksResponse, FindOrCreateListResponse, ListTasksResponse,
    TaskSummary, TodoListResponse,
};
