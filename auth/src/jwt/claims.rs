use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Identity claims carried inside a signed token.
///
/// Serialized as `{"username", "isAdministrator", "expiresAt"}` with the
/// expiry in Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    pub is_administrator: bool,
    pub expires_at: i64,
}

impl Claims {
    /// Create claims for a user, expiring `TOKEN_LIFETIME_HOURS` after `now`.
    ///
    /// # Arguments
    /// * `username` - Authenticated username
    /// * `is_administrator` - Role flag at issue time
    /// * `now` - Issue instant
    pub fn for_user(username: impl ToString, is_administrator: bool, now: DateTime<Utc>) -> Self {
        let expiration = now + Duration::hours(TOKEN_LIFETIME_HOURS);

        Self {
            username: username.to_string(),
            is_administrator,
            expires_at: expiration.timestamp(),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, expires_at: i64) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Check if token is expired. A token is still valid at its expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.expires_at
    }
}
