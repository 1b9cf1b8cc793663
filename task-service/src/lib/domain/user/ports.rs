use async_trait::async_trait;

use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// The password must satisfy the strength policy; only its digest is
    /// stored. The first user ever registered is made administrator.
    ///
    /// # Errors
    /// * `WeakPassword` - Password fails the strength policy
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Returns
    /// Signed token carrying the stored role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Grant the administrator role to an existing user.
    ///
    /// Tokens issued before the promotion keep their original role.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn promote(&self, username: &Username) -> Result<(), UserError>;
}

/// Credential store used by the authentication flow.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve a credential by username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Credential>, UserError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, credential: Credential) -> Result<(), UserError>;

    /// Set the administrator flag on a stored credential.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn promote_to_admin(&self, username: &Username) -> Result<(), UserError>;

    /// Number of stored credentials.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self) -> Result<u64, UserError>;
}
