use async_trait::async_trait;
use auth::Claims;
use auth::Identity;
use auth::RoleGate;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that verifies the bearer token and attaches the caller's
/// [`Identity`] to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Non-UTF-8 header values count as malformed
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = state.authenticator.authenticate_header(header).map_err(|e| {
        tracing::warn!(reason = %e, "Authentication rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(Identity::from(claims));

    Ok(next.run(req).await)
}

/// Middleware that only lets administrators through.
///
/// Must be layered inside [`authenticate`]; if it is not, every request is
/// rejected as unauthorized.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let identity = identity_of(req.extensions().get::<Identity>());

    if let Err(e) = RoleGate::require_admin(&identity) {
        tracing::warn!(
            reason = %e,
            username = identity.claims().map(|c| c.username.as_str()),
            "Authorization rejected"
        );
        return Err(ApiError::from(e));
    }

    Ok(next.run(req).await)
}

fn identity_of(attached: Option<&Identity>) -> Identity {
    attached.cloned().unwrap_or(Identity::Anonymous)
}

/// Extractor for the verified claims of the current caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match identity_of(parts.extensions.get::<Identity>()) {
            Identity::Authenticated(claims) => Ok(CurrentUser(claims)),
            Identity::Anonymous => Err(ApiError::from(auth::GateError::Unauthorized)),
        }
    }
}
