use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::create_task::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

/// HTTP request body for updating a task (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        let title = self.title.map(TaskTitle::new).transpose()?;

        Ok(UpdateTaskCommand {
            title,
            description: self.description,
        })
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let Json(req) = payload?;
    // Parse task ID and request at HTTP boundary - errors automatically converted
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;
    let command = req.try_into_command()?;

    state
        .task_service
        .update_task(&task_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
