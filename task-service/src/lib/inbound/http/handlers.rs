use auth::GateError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::task::errors::TaskError;
use crate::user::errors::UserError;

pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod list_tasks;
pub mod login;
pub mod promote_user;
pub mod register;
pub mod update_task;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The cause is logged, never sent to the caller.
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        if err.is_forbidden() {
            ApiError::Forbidden(err.to_string())
        } else {
            ApiError::Unauthorized(err.to_string())
        }
    }
}

/// Body extraction failures carry serde details; only a fixed message is
/// returned and the detail goes to the log.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Request body rejected");

        match rejection {
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity("Invalid request body".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::BadRequest("Expected a JSON request body".to_string())
            }
            _ => ApiError::BadRequest("Malformed request body".to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByUsername(_) => ApiError::NotFound("User not found".to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::WeakPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidUsername(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Hashing(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidTaskId(_) => ApiError::BadRequest(err.to_string()),
            TaskError::EmptyTitle => ApiError::UnprocessableEntity(err.to_string()),
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_errors_map_to_distinct_statuses() {
        assert_eq!(
            ApiError::from(GateError::MissingOrMalformedToken),
            ApiError::Unauthorized("Missing or malformed token".to_string())
        );
        assert_eq!(
            ApiError::from(GateError::InvalidToken),
            ApiError::Unauthorized("Invalid token".to_string())
        );
        assert_eq!(
            ApiError::from(GateError::Unauthorized),
            ApiError::Unauthorized("Unauthorized".to_string())
        );
        assert_eq!(
            ApiError::from(GateError::Forbidden),
            ApiError::Forbidden("Forbidden".to_string())
        );
    }

    #[test]
    fn test_internal_errors_are_not_echoed() {
        let response =
            ApiError::from(UserError::DatabaseError("connection refused".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_task_id_message_is_fixed() {
        let err = crate::task::models::TaskId::from_string("not-a-uuid").unwrap_err();
        assert_eq!(
            ApiError::from(TaskError::from(err)),
            ApiError::BadRequest("Invalid ID format".to_string())
        );
    }

    #[test]
    fn test_weak_password_is_bad_request() {
        assert_eq!(
            ApiError::from(UserError::from(auth::PasswordError::PolicyViolation)),
            ApiError::BadRequest(auth::POLICY_VIOLATION_MESSAGE.to_string())
        );
    }
}
