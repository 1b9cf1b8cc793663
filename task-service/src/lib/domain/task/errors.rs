use thiserror::Error;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid ID format")]
    InvalidFormat,
}

/// Top-level error for task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("{0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Task not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
