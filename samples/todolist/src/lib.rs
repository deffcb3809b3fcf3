//! Todo list application built on behaviors.
//!
//! A single behavior handles every todo list use case. It is reachable
//! in-process through [`behavior_core::Behavior`] and over HTTP through
//! [`web::router`].
//!
//! - [`domain`]: the `TodoList` aggregate, its ids and errors, and the
//!   `TodoLists` repository contract
//! - [`behavior`]: request and response types, one handler per request, and
//!   the model wiring them together
//! - [`config`]: server configuration from the environment
//! - [`web`]: axum routes
//!
//! # Quick Start
//!
//! ```
//! use behavior_core::{Behavior, StatelessBehavior};
//! use behavior_testing::InMemoryRepository;
//! use std::sync::Arc;
//! use todolist::behavior::{
//!     AddTaskRequest, FindOrCreateListRequest, ListTasksRequest, TodoListBehaviorModel,
//!     TodoListResponse,
//! };
//! use todolist::domain::{TodoList, TodoListAccess};
//!
//! let lists = Arc::new(InMemoryRepository::<TodoList, _>::new(TodoListAccess));
//! let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(lists))?;
//!
//! let Some(TodoListResponse::FindOrCreateList(list)) =
//!     behavior.react_to(FindOrCreateListRequest {})?
//! else {
//!     return Err("no list".into());
//! };
//!
//! behavior.react_to(AddTaskRequest::new(list.todo_list_uuid, "Buy milk"))?;
//!
//! let tasks = behavior.react_to(ListTasksRequest {
//!     todo_list_uuid: list.todo_list_uuid,
//! })?;
//! println!("{tasks:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod behavior;
pub mod config;
pub mod domain;
pub mod web;

// Re-export main types for convenience
pub use behavior::{TodoListBehavior, TodoListBehaviorModel, TodoListRequest, TodoListResponse};
pub use config::{Config, ConfigError, Endpoint};
pub use domain::{TodoList, TodoListError};
