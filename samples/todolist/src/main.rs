//! Todo list HTTP server.
//!
//! Serves the todo list behavior over HTTP, backed by an in-memory repository.
//!
//! # Environment
//!
//! - `HOST` / `PORT`: bind address (default `0.0.0.0:8080`)
//! - `RUST_LOG`: log filter (default `info`)
//! - `BEHAVIOR_ENDPOINT`: POST endpoint path (default `/todolist`)

use behavior_core::StatelessBehavior;
use behavior_testing::InMemoryRepository;
use behavior_web::{BehaviorState, TransactionalBehavior};
use std::sync::Arc;
use todolist::config::Config;
use todolist::domain::{TodoList, TodoListAccess};
use todolist::{TodoListBehaviorModel, web};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting todo list server");
    info!(
        bind = %config.bind_address(),
        endpoint = %config.behavior.endpoint,
        "Configuration loaded"
    );

    let lists = Arc::new(InMemoryRepository::<TodoList, _>::new(TodoListAccess));
    let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(lists))?;
    let state = BehaviorState::new(TransactionalBehavior::new(behavior));

    let app = web::router(&config.behavior.endpoint, state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
