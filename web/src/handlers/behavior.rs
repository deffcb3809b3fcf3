//! Generic behavior endpoint.
//!
//! One POST route accepts a JSON request, dispatches it to the behavior and
//! returns whatever the behavior answered.
//!
//! # Endpoint
//!
//! ```text
//! POST {endpoint}
//! Content-Type: application/json
//!
//! { "@type": "AddTaskRequest", "todoListUuid": "...", "taskName": "Buy milk" }
//! ```
//!
//! # Responses
//!
//! - 200 with the response serialized as JSON
//! - 200 with an empty body when the handler produced no response
//! - 400 with an [`ExceptionResponse`](crate::error::ExceptionResponse) body
//!   when the body cannot be parsed or the behavior fails

use crate::error::AppError;
use crate::state::BehaviorState;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use behavior_core::{Behavior, Message};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use tower_http::trace::TraceLayer;

/// Routes of a behavior endpoint, still waiting for their state.
///
/// Applications that add routes of their own (e.g. query shortcuts) merge them
/// here before calling `with_state`.
pub fn behavior_routes<Q, B>(endpoint: &str) -> Router<BehaviorState<B>>
where
    Q: DeserializeOwned + Into<Message> + Send + 'static,
    B: Behavior + Send + 'static,
    B::Response: Serialize + Send + 'static,
    B::Error: Display + Send + 'static,
{
    Router::new().route(endpoint, post(react_to_request::<Q, B>))
}

/// Complete router for a single behavior endpoint, with request tracing.
///
/// # Example
///
/// ```ignore
/// let app = behavior_router::<TodoListRequest, _>("/todolist", state);
/// axum::serve(listener, app).await?;
/// ```
pub fn behavior_router<Q, B>(endpoint: &str, state: BehaviorState<B>) -> Router
where
    Q: DeserializeOwned + Into<Message> + Send + 'static,
    B: Behavior + Send + 'static,
    B::Response: Serialize + Send + 'static,
    B::Error: Display + Send + 'static,
{
    behavior_routes::<Q, B>(endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Parse the body as `Q` and dispatch it.
///
/// # Errors
///
/// Returns a 400 [`AppError`] if the body is not a valid `Q` or the behavior
/// fails.
pub async fn react_to_request<Q, B>(
    State(state): State<BehaviorState<B>>,
    body: Bytes,
) -> Result<Response, AppError>
where
    Q: DeserializeOwned + Into<Message> + Send + 'static,
    B: Behavior + Send + 'static,
    B::Response: Serialize + Send + 'static,
    B::Error: Display + Send + 'static,
{
    let request: Q = serde_json::from_slice(&body).map_err(|e| {
        state
            .bad_request(format!("Malformed request body: {e}"))
            .with_source(anyhow::Error::new(e))
    })?;

    tracing::debug!(request_type = std::any::type_name::<Q>(), "Request parsed");

    respond(&state, request.into()).await
}

/// Dispatch a message and turn the outcome into an HTTP response.
///
/// # Errors
///
/// Returns a 400 [`AppError`] carrying the behavior's error message.
pub async fn respond<B>(state: &BehaviorState<B>, message: Message) -> Result<Response, AppError>
where
    B: Behavior + Send + 'static,
    B::Response: Serialize,
    B::Error: Display,
{
    match state.behavior().react_to(message).await {
        Ok(Some(response)) => Ok(Json(response).into_response()),
        Ok(None) => Ok(StatusCode::OK.into_response()),
        Err(error) => Err(state.bad_request(error.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::error::ExceptionResponse;
    use crate::transactional::TransactionalBehavior;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use behavior_core::environment::Clock;
    use behavior_core::{Model, StatelessBehavior};
    use behavior_testing::test_clock;
    use serde::Deserialize;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Shout {
        text: String,
    }

    #[derive(Deserialize)]
    struct Forget {}

    #[derive(Deserialize)]
    struct Fail {}

    #[derive(Deserialize)]
    #[serde(tag = "@type")]
    enum TestRequest {
        Shout(Shout),
        Forget(Forget),
        Fail(Fail),
    }

    impl From<TestRequest> for Message {
        fn from(request: TestRequest) -> Self {
            match request {
                TestRequest::Shout(r) => Box::new(r),
                TestRequest::Forget(r) => Box::new(r),
                TestRequest::Fail(r) => Box::new(r),
            }
        }
    }

    #[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
    struct Shouted {
        text: String,
    }

    fn app() -> Router {
        let model = Model::<Shouted, String>::builder()
            .on(|r: Shout| {
                Ok(Shouted {
                    text: r.text.to_uppercase(),
                })
            })
            .on_consume(|_: Forget| Ok(()))
            .on_consume(|_: Fail| Err("Nothing to fail at".to_string()))
            .build()
            .unwrap();

        let state = BehaviorState::with_clock(
            TransactionalBehavior::new(StatelessBehavior::new(model)),
            Arc::new(test_clock()),
        );

        behavior_router::<TestRequest, _>("/shout", state)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/shout")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_response_is_serialized() {
        let response = app()
            .oneshot(post_json(r#"{"@type":"Shout","text":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Shouted = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.text, "HELLO");
    }

    #[tokio::test]
    async fn test_no_response_gives_empty_body() {
        let response = app()
            .oneshot(post_json(r#"{"@type":"Forget"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_behavior_error_is_bad_request() {
        let response = app()
            .oneshot(post_json(r#"{"@type":"Fail"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ExceptionResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "Nothing to fail at");
        assert_eq!(body.timestamp, test_clock().now());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app().oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ExceptionResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.message.starts_with("Malformed request body"));
        assert_eq!(body.timestamp, test_clock().now());
    }

    #[tokio::test]
    async fn test_unknown_type_tag_is_bad_request() {
        let response = app()
            .oneshot(post_json(r#"{"@type":"Whisper","text":"psst"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/shout")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
