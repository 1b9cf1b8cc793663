use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are deliberately reported as a single
/// `InvalidToken` variant whatever the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
