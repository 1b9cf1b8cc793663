use async_trait::async_trait;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::task::errors::TaskError;

/// Port for task domain service operations.
///
/// Callers are expected to have passed the request gates already; the
/// service itself does not inspect identity.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn update_task(&self, id: &TaskId, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    async fn list_all(&self) -> Result<Vec<Task>, TaskError>;

    /// # Returns
    /// Optional task (None if not found)
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete(&self, id: &TaskId) -> Result<(), TaskError>;
}
