use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskTitle;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let Json(body) = payload?;

    state
        .task_service
        .create_task(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
    #[serde(default)]
    description: String,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, TaskError> {
        Ok(CreateTaskCommand {
            title: TaskTitle::new(self.title)?,
            description: self.description,
        })
    }
}

/// Task representation shared by the task endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.0,
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
        }
    }
}
