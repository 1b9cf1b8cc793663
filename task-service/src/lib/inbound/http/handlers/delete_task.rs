use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::task::models::TaskId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;

    state.task_service.delete_task(&task_id).await?;

    tracing::info!(task_id = %task_id, deleted_by = %caller.username, "Task removed");

    Ok(ApiSuccess::new(StatusCode::OK, ()))
}
