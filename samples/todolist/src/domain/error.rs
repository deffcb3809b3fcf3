//! Errors of the todo list domain.

use super::ids::TodoListId;
use behavior_core::RepositoryError;
use thiserror::Error;

/// Errors returned by the todo list aggregate and its handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoListError {
    /// A task name was missing, empty or whitespace only
    #[error("Please specify a non-null, non-whitespace task name!")]
    InvalidName,

    /// No todo list with the requested id is stored
    #[error("Repository doesn't contain a TodoList of id {0}")]
    NotFound(TodoListId),

    /// The repository failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TodoListError {
    /// Stable name of the error kind, independent of the message.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName => "InvalidNameError",
            Self::NotFound(_) => "AggregateNotFoundError",
            Self::Repository(RepositoryError::InvalidArgument(_)) => "InvalidArgumentError",
            Self::Repository(RepositoryError::Storage(_)) => "StorageError",
        }
    }
}
