use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues and verifies signed bearer tokens.
///
/// Tokens are HS256 JWS strings over [`Claims`]. Signing and verification use
/// keys derived from the same shared secret, captured once at construction.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a token service from the shared secret.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a token for a user, valid for 24 hours from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, username: &str, is_administrator: bool) -> Result<String, JwtError> {
        self.issue_at(username, is_administrator, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        username: &str,
        is_administrator: bool,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(username, is_administrator, now);
        self.sign(&claims)
    }

    /// Sign an explicit claim set.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, wrongly signed, wrong shape or expired
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token against an explicit Unix timestamp.
    ///
    /// The cause of a failure is logged at debug level and otherwise dropped.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, wrongly signed, wrong shape or expired
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry lives in `expiresAt` and is checked below against `now`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Token rejected");
                JwtError::InvalidToken
            })?;

        if claims.is_expired(now) {
            tracing::debug!(expires_at = claims.expires_at, now, "Token rejected: expired");
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn service() -> TokenService {
        TokenService::new(SECRET).expect("Failed to create token service")
    }

    fn replace_char(segment: &str, index: usize) -> String {
        segment
            .char_indices()
            .map(|(i, c)| match (i == index, c) {
                (true, 'A') => 'B',
                (true, _) => 'A',
                (false, c) => c,
            })
            .collect()
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();

        for (username, is_admin) in [("alice", true), ("bob", false), ("ünï", false)] {
            let token = service.issue(username, is_admin).expect("Failed to issue");
            let claims = service.verify(&token).expect("Failed to verify");

            assert_eq!(claims.username, username);
            assert_eq!(claims.is_administrator, is_admin);
        }
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenService::new(b""),
            Err(JwtError::MissingSecret)
        ));
    }

    #[test]
    fn test_expiry_boundary() {
        let service = service();
        let issued = Utc::now() - Duration::hours(1);
        let token = service.issue_at("alice", false, issued).unwrap();
        let expires_at = (issued + Duration::hours(24)).timestamp();

        assert!(service.verify_at(&token, expires_at - 1).is_ok());
        assert!(service.verify_at(&token, expires_at).is_ok());
        assert_eq!(
            service.verify_at(&token, expires_at + 1),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_token_expired_in_the_past() {
        let service = service();
        let issued = Utc::now() - Duration::hours(25);
        let token = service.issue_at("alice", true, issued).unwrap();

        assert_eq!(service.verify(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer = TokenService::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let verifier = TokenService::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = issuer.issue("alice", true).unwrap();

        assert_eq!(verifier.verify(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_malformed_tokens() {
        let service = service();

        for token in ["", "invalid.token.here", "not-a-jwt", "a.b", "..."] {
            assert_eq!(service.verify(token), Err(JwtError::InvalidToken), "{token}");
        }
    }

    #[test]
    fn test_tampered_payload_and_signature() {
        let service = service();
        let token = service.issue("alice", false).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        for index in [0, 5, parts[1].len() / 2, parts[1].len() - 2] {
            let tampered = format!("{}.{}.{}", parts[0], replace_char(parts[1], index), parts[2]);
            assert_eq!(service.verify(&tampered), Err(JwtError::InvalidToken));
        }

        for index in [0, 10, parts[2].len() / 2, parts[2].len() - 2] {
            let tampered = format!("{}.{}.{}", parts[0], parts[1], replace_char(parts[2], index));
            assert_eq!(service.verify(&tampered), Err(JwtError::InvalidToken));
        }
    }

    #[test]
    fn test_wrong_claim_shape_rejected() {
        #[derive(serde::Serialize)]
        struct Other {
            sub: String,
        }

        let service = service();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Other {
                sub: "user".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service.verify(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_forged_admin_flag_rejected() {
        let service = service();
        let forger = TokenService::new(b"attacker_secret_at_least_32_bytes!").unwrap();

        let forged = forger
            .sign(&Claims::for_user("mallory", true, Utc::now()))
            .unwrap();

        assert_eq!(service.verify(&forged), Err(JwtError::InvalidToken));
    }
}
