//! JWT bearer tokens
//!
//! HS256 tokens carrying `{sub, email, name}`. Validation checks signature and
//! expiry only; there is no revocation list.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for the given user, valid for the configured lifetime.
    pub fn issue(&self, user_id: i64, email: &str, name: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, email, name, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            name: name.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature and expiry and return the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new("test-secret", 8)
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let token = keys.issue(42, "alice@example.com", "alice").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "alice");
    }

    #[test]
    fn test_expiry_is_eight_hours() {
        let keys = keys();
        let now = Utc::now();
        let token = keys.issue_at(1, "a@b.c", "a", now).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(9);
        let token = keys.issue_at(1, "a@b.c", "a", issued).unwrap();

        assert_eq!(keys.verify(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let token = JwtKeys::new("other-secret", 8)
            .issue(1, "a@b.c", "a")
            .unwrap();

        assert_eq!(keys().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(keys().verify("not.a.token"), Err(AuthError::InvalidToken));
    }
}
