use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::task::errors::TaskError;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError> {
        let task = Task {
            id: TaskId::new(),
            title: command.title,
            description: command.description,
        };

        let created = self.repository.create(task).await?;
        tracing::info!(task_id = %created.id, "Task created");

        Ok(created)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.repository.list_all().await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))
    }

    async fn update_task(
        &self,
        id: &TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let mut task = self.get_task(id).await?;

        if let Some(title) = command.title {
            task.title = title;
        }

        if let Some(description) = command.description {
            task.description = description;
        }

        let updated = self.repository.update(task).await?;
        tracing::info!(task_id = %updated.id, "Task updated");

        Ok(updated)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError> {
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, "Task deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::task::models::TaskTitle;

    mock! {
        pub TestTaskRepository {}

        #[async_trait]
        impl TaskRepository for TestTaskRepository {
            async fn create(&self, task: Task) -> Result<Task, TaskError>;
            async fn list_all(&self) -> Result<Vec<Task>, TaskError>;
            async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;
            async fn update(&self, task: Task) -> Result<Task, TaskError>;
            async fn delete(&self, id: &TaskId) -> Result<(), TaskError>;
        }
    }

    fn task(title: &str) -> Task {
        Task {
            id: TaskId::new(),
            title: TaskTitle::new(title.to_string()).unwrap(),
            description: "details".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_task_assigns_id() {
        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_create()
            .withf(|task| task.title.as_str() == "Write report")
            .times(1)
            .returning(|task| Ok(task));

        let service = TaskService::new(Arc::new(repository));

        let created = service
            .create_task(CreateTaskCommand {
                title: TaskTitle::new("Write report".to_string()).unwrap(),
                description: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(created.title.as_str(), "Write report");
    }

    #[tokio::test]
    async fn test_get_task_not_found() {
        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = TaskService::new(Arc::new(repository));

        let result = service.get_task(&TaskId::new()).await;
        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_task_partial() {
        let mut repository = MockTestTaskRepository::new();
        let existing = task("Old title");
        let id = existing.id;

        repository
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|task| task.title.as_str() == "Old title" && task.description == "new")
            .times(1)
            .returning(|task| Ok(task));

        let service = TaskService::new(Arc::new(repository));

        let updated = service
            .update_task(
                &id,
                UpdateTaskCommand {
                    title: None,
                    description: Some("new".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "new");
    }

    #[tokio::test]
    async fn test_delete_task_not_found() {
        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(TaskError::NotFound(id.to_string())));

        let service = TaskService::new(Arc::new(repository));

        let result = service.delete_task(&TaskId::new()).await;
        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }
}
