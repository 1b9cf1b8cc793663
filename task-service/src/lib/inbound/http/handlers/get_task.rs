use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_task::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::TaskId;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;

    state
        .task_service
        .get_task(&task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
