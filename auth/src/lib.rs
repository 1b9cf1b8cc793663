//! Authentication and authorization core.
//!
//! Provides the credential and token handling used by the task service:
//! - Password strength policy
//! - Password hashing (Argon2id)
//! - HS256 bearer token issuance and verification
//! - Request gating (authenticate, then require the administrator role)
//!
//! Nothing here depends on an HTTP framework; services adapt the gates to
//! their own request pipeline.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, PasswordPolicy};
//!
//! PasswordPolicy::new().validate("Password1!").unwrap();
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Password1!").unwrap();
//! assert!(hasher.verify(&hash, "Password1!"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = tokens.issue("alice", false).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```
//!
//! ## Gating a Request
//! ```
//! use auth::{AuthGate, GateError, Identity, RoleGate, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let header = format!("Bearer {}", tokens.issue("bob", false).unwrap());
//!
//! let identity = Identity::from(AuthGate::authenticate(&tokens, Some(&header)).unwrap());
//! assert_eq!(RoleGate::require_admin(&identity), Err(GateError::Forbidden));
//! assert_eq!(RoleGate::require_admin(&Identity::Anonymous), Err(GateError::Unauthorized));
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthGate;
pub use gate::GateError;
pub use gate::Identity;
pub use gate::RoleGate;
pub use gate::BEARER_PREFIX;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::POLICY_VIOLATION_MESSAGE;
