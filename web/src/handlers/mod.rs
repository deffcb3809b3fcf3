//! HTTP request handlers.

pub mod behavior;

// Re-export common handler utilities
pub use behavior::{behavior_router, behavior_routes, react_to_request, respond};
