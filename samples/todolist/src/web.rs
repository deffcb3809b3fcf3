//! HTTP routes of the todo list server.
//!
//! # Endpoints
//!
//! ```text
//! POST {endpoint}                         any @type-tagged request
//! GET  {endpoint}/tasks?todoListUuid=...  shortcut for ListTasksRequest
//! ```

use crate::behavior::{ListTasksRequest, TodoListBehavior, TodoListRequest};
use crate::config::Endpoint;
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Response,
    routing::get,
};
use behavior_web::{AppError, BehaviorState, behavior_routes, respond};
use tower_http::trace::TraceLayer;

/// State of the todo list routes
pub type TodoListState = BehaviorState<TodoListBehavior>;

/// Build the router serving the todo list behavior under `endpoint`.
pub fn router(endpoint: &Endpoint, state: TodoListState) -> Router {
    behavior_routes::<TodoListRequest, TodoListBehavior>(endpoint.as_str())
        .route(&endpoint.join("tasks"), get(list_tasks))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET {endpoint}/tasks?todoListUuid=...`
///
/// # Errors
///
/// Returns a 400 [`AppError`] if the query is malformed or the list doesn't
/// exist.
pub async fn list_tasks(
    State(state): State<TodoListState>,
    query: Result<Query<ListTasksRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(request) = query.map_err(|rejection| state.bad_request(rejection.body_text()))?;

    respond(&state, Box::new(request)).await
}
