use axum::extract::State;
use axum::http::StatusCode;

use super::create_task::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    state
        .task_service
        .list_tasks()
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}
