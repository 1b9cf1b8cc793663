use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::user::models::Credential;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialRepository;
use crate::user::errors::UserError;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    username: String,
    password_hash: String,
    is_admin: bool,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = UserError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            username: Username::new(row.username)?,
            password_hash: row.password_hash,
            is_admin: row.is_admin,
        })
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, UserError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT username, password_hash, is_admin
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn save(&self, credential: Credential) -> Result<(), UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, is_admin)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(credential.username.as_str())
        .bind(&credential.password_hash)
        .bind(credential.is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_username_key")
                {
                    return UserError::UsernameAlreadyExists(credential.username.to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn promote_to_admin(&self, username: &Username) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_admin = TRUE
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFoundByUsername(username.to_string()));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, UserError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        u64::try_from(count).map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}
