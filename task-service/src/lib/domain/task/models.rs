use std::fmt;

use uuid::Uuid;

use crate::task::errors::TaskError;
use crate::task::errors::TaskIdError;

/// Task entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: String,
}

/// Task unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a new random task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s).map(TaskId).map_err(|e| {
            tracing::debug!(reason = %e, "Task ID rejected");
            TaskIdError::InvalidFormat
        })
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(title: String) -> Result<Self, TaskError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a task.
#[derive(Debug)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: String,
}

/// Command to update a task. Only provided fields are changed.
#[derive(Debug)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<String>,
}
