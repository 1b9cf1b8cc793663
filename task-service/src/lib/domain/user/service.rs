use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::CredentialRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration, login and promotion.
///
/// Argon2 work runs on the blocking thread pool.
pub struct UserService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
}

impl<CR> UserService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password and token handling bound to the shared secret
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<CR> UserServicePort for UserService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, UserError> {
        self.authenticator
            .check_password_strength(&command.password)?;

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        // The first registered user becomes the administrator.
        let is_admin = self.repository.count().await? == 0;

        let password_hash = self.hash_password(command.password).await?;

        let credential = Credential {
            username: command.username,
            password_hash,
            is_admin,
        };

        self.repository.save(credential.clone()).await?;

        tracing::info!(
            username = %credential.username,
            is_admin = credential.is_admin,
            "User registered"
        );

        Ok(credential)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let credential = self
            .repository
            .find_by_username(&command.username)
            .await?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        // Unknown users cost the same verification as known ones.
        let result = tokio::task::spawn_blocking(move || match credential {
            Some(credential) => authenticator.authenticate(
                &password,
                &credential.password_hash,
                credential.username.as_str(),
                credential.is_admin,
            ),
            None => Err(authenticator.reject_unknown_user(&password)),
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))?;

        match result {
            Ok(authentication) => {
                tracing::info!(username = %command.username, "User logged in");
                Ok(authentication.access_token)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(username = %command.username, "Login rejected");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(UserError::from(e)),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e.to_string())),
        }
    }

    async fn promote(&self, username: &Username) -> Result<(), UserError> {
        self.repository.promote_to_admin(username).await?;

        tracing::info!(username = %username, "User promoted to administrator");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestCredentialRepository {}

        #[async_trait]
        impl CredentialRepository for TestCredentialRepository {
            async fn find_by_username(&self, username: &Username) -> Result<Option<Credential>, UserError>;
            async fn save(&self, credential: Credential) -> Result<(), UserError>;
            async fn promote_to_admin(&self, username: &Username) -> Result<(), UserError>;
            async fn count(&self) -> Result<u64, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET).expect("Failed to build authenticator"))
    }

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn stored_credential(name: &str, password: &str, is_admin: bool) -> Credential {
        Credential {
            username: username(name),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            is_admin,
        }
    }

    #[tokio::test]
    async fn test_register_first_user_becomes_admin() {
        let mut repository = MockTestCredentialRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_count().times(1).returning(|| Ok(0));
        repository
            .expect_save()
            .withf(|credential| {
                credential.username.as_str() == "alice"
                    && credential.is_admin
                    && credential.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), authenticator());

        let credential = service
            .register(RegisterCommand::new(username("alice"), "Password1!".to_string()))
            .await
            .expect("Registration failed");

        assert!(credential.is_admin);
        assert_ne!(credential.password_hash, "Password1!");
    }

    #[tokio::test]
    async fn test_register_later_users_are_regular() {
        let mut repository = MockTestCredentialRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_count().times(1).returning(|| Ok(3));
        repository
            .expect_save()
            .withf(|credential| !credential.is_admin)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), authenticator());

        let credential = service
            .register(RegisterCommand::new(username("bob"), "Password1!".to_string()))
            .await
            .expect("Registration failed");

        assert!(!credential.is_admin);
    }

    #[tokio::test]
    async fn test_register_weak_password_never_touches_store() {
        let mut repository = MockTestCredentialRepository::new();
        repository.expect_find_by_username().times(0);
        repository.expect_count().times(0);
        repository.expect_save().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .register(RegisterCommand::new(username("bob"), "short".to_string()))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, UserError::WeakPassword(_)));
        assert_eq!(err.to_string(), auth::POLICY_VIOLATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestCredentialRepository::new();

        repository
            .expect_find_by_username()
            .with(eq(username("alice")))
            .times(1)
            .returning(|_| {
                Ok(Some(Credential {
                    username: Username::new("alice".to_string()).unwrap(),
                    password_hash: "$argon2id$test_hash".to_string(),
                    is_admin: true,
                }))
            });
        repository.expect_save().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .register(RegisterCommand::new(username("alice"), "Password1!".to_string()))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_carries_role() {
        let mut repository = MockTestCredentialRepository::new();
        let stored = stored_credential("alice", "Password1!", true);

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let authenticator = authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service
            .login(LoginCommand::new(username("alice"), "Password1!".to_string()))
            .await
            .expect("Login failed");

        let claims = authenticator.validate_token(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert!(claims.is_administrator);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestCredentialRepository::new();
        let stored = stored_credential("alice", "Password1!", false);

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .login(LoginCommand::new(username("alice"), "Password2!".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repository = MockTestCredentialRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .login(LoginCommand::new(username("ghost"), "Password1!".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_promote_unknown_user() {
        let mut repository = MockTestCredentialRepository::new();
        repository
            .expect_promote_to_admin()
            .times(1)
            .returning(|u| Err(UserError::NotFoundByUsername(u.to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.promote(&username("ghost")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::NotFoundByUsername(_)
        ));
    }

    #[tokio::test]
    async fn test_promote_success() {
        let mut repository = MockTestCredentialRepository::new();
        repository
            .expect_promote_to_admin()
            .with(eq(username("bob")))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), authenticator());

        assert!(service.promote(&username("bob")).await.is_ok());
    }
}
