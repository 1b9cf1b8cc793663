use thiserror::Error;

/// Message returned for every password that fails the strength policy.
pub const POLICY_VIOLATION_MESSAGE: &str = "password must be at least 8 characters long and include at least one uppercase letter, one lowercase letter, one number, and one special character";

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("{}", POLICY_VIOLATION_MESSAGE)]
    PolicyViolation,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
