use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::Credential;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialRepository;
use crate::task::errors::TaskError;
use crate::user::errors::UserError;

/// Process-local credential store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<Username, Credential>>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, UserError> {
        Ok(self.credentials.read().await.get(username).cloned())
    }

    async fn save(&self, credential: Credential) -> Result<(), UserError> {
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&credential.username) {
            return Err(UserError::UsernameAlreadyExists(
                credential.username.to_string(),
            ));
        }
        credentials.insert(credential.username.clone(), credential);
        Ok(())
    }

    async fn promote_to_admin(&self, username: &Username) -> Result<(), UserError> {
        self.credentials
            .write()
            .await
            .get_mut(username)
            .map(|credential| credential.is_admin = true)
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))
    }

    async fn count(&self) -> Result<u64, UserError> {
        Ok(self.credentials.read().await.len() as u64)
    }
}

/// Process-local task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| a.title.as_str().cmp(b.title.as_str()));
        Ok(tasks)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(task)
            }
            None => Err(TaskError::NotFound(task.id.to_string())),
        }
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskError> {
        self.tasks
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }
}
