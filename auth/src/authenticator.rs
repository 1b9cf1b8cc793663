use std::sync::OnceLock;

use crate::gate::AuthGate;
use crate::gate::GateError;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordPolicy;

/// Authentication coordinator combining the password policy, credential
/// hashing and token handling behind the shared secret.
pub struct Authenticator {
    password_policy: PasswordPolicy,
    password_hasher: PasswordHasher,
    token_service: TokenService,
    // Digest verified against when the username is unknown
    decoy_digest: OnceLock<String>,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing and verification
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    pub fn new(jwt_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            password_policy: PasswordPolicy::new(),
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(jwt_secret)?,
            decoy_digest: OnceLock::new(),
        })
    }

    /// Check a candidate password against the strength policy.
    ///
    /// # Errors
    /// * `PolicyViolation` - Password is too weak
    pub fn check_password_strength(&self, password: &str) -> Result<(), PasswordError> {
        self.password_policy.validate(password)
    }

    /// Validate and hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `PolicyViolation` - Password is too weak
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_policy.validate(password)?;
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `username` - Username to embed in the token
    /// * `is_administrator` - Stored role flag to embed in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        username: &str,
        is_administrator: bool,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(stored_hash, password) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(username, is_administrator)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for a username with no stored credential.
    ///
    /// Runs a full hash verification against a decoy digest so the call
    /// costs the same as a wrong password for a known user.
    ///
    /// # Returns
    /// `InvalidCredentials`, always
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        let decoy = self.decoy_digest.get_or_init(|| {
            self.password_hasher
                .hash("decoy-password-never-stored")
                .unwrap_or_default()
        });

        // Outcome is irrelevant, only the work matters.
        let _ = self.password_hasher.verify(decoy, password);

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn generate_token(&self, username: &str, is_administrator: bool) -> Result<String, JwtError> {
        self.token_service.issue(username, is_administrator)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_service.verify(token)
    }

    /// Run the authentication gate over a raw `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingOrMalformedToken` - Header absent or not a bearer token
    /// * `InvalidToken` - Token failed verification
    pub fn authenticate_header(&self, header: Option<&str>) -> Result<Claims, GateError> {
        AuthGate::authenticate(&self.token_service, header)
    }
}
