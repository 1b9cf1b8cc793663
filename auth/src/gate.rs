//! Request gating stages.
//!
//! [`AuthGate`] turns the raw `Authorization` header into verified [`Claims`];
//! [`RoleGate`] decides whether an [`Identity`] may pass a privileged route.
//! Both are framework-agnostic: the HTTP layer threads the resulting
//! `Identity` explicitly from one stage to the next.

use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::TokenService;

/// Scheme prefix expected on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity as established by [`AuthGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No identity was attached to the request.
    Anonymous,
    /// Verified token claims.
    Authenticated(Claims),
}

impl Identity {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(claims) => Some(claims),
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity::Authenticated(claims)
    }
}

/// Rejections produced by the gating stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    /// Header absent or not using the bearer scheme.
    #[error("Missing or malformed token")]
    MissingOrMalformedToken,

    /// Token presented but failed verification.
    #[error("Invalid token")]
    InvalidToken,

    /// No identity reached the role check.
    #[error("Unauthorized")]
    Unauthorized,

    /// Identity present without the administrator role.
    #[error("Forbidden")]
    Forbidden,
}

impl GateError {
    /// Whether this rejection means "insufficient privilege" (403) rather
    /// than "not authenticated" (401).
    pub fn is_forbidden(&self) -> bool {
        matches!(self, GateError::Forbidden)
    }
}

/// Authentication stage.
pub struct AuthGate;

impl AuthGate {
    /// Authenticate a request from its `Authorization` header value.
    ///
    /// # Arguments
    /// * `tokens` - Token service holding the shared secret
    /// * `header` - Raw header value, if the request carried one
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `MissingOrMalformedToken` - Header absent or without `Bearer ` prefix
    /// * `InvalidToken` - Token failed verification
    pub fn authenticate(tokens: &TokenService, header: Option<&str>) -> Result<Claims, GateError> {
        let token = header
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(GateError::MissingOrMalformedToken)?;

        tokens.verify(token).map_err(|_| GateError::InvalidToken)
    }
}

/// Authorization stage for administrator-only routes.
pub struct RoleGate;

impl RoleGate {
    /// Require an authenticated administrator.
    ///
    /// # Errors
    /// * `Unauthorized` - No identity was established upstream
    /// * `Forbidden` - Identity is not an administrator
    pub fn require_admin(identity: &Identity) -> Result<&Claims, GateError> {
        match identity {
            Identity::Anonymous => Err(GateError::Unauthorized),
            Identity::Authenticated(claims) if !claims.is_administrator => {
                Err(GateError::Forbidden)
            }
            Identity::Authenticated(claims) => Ok(claims),
        }
    }
}
