use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn promote_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(username): Path<String>,
) -> Result<ApiSuccess<PromoteUserResponseData>, ApiError> {
    let username = Username::new(username.clone())
        .map_err(|_| ApiError::from(UserError::NotFoundByUsername(username)))?;

    state.user_service.promote(&username).await?;

    tracing::info!(
        promoted = %username,
        promoted_by = %caller.username,
        "Administrator role granted"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        PromoteUserResponseData {
            username: username.as_str().to_string(),
            is_admin: true,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoteUserResponseData {
    pub username: String,
    pub is_admin: bool,
}
