//! Password hashing and bearer tokens.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, ServiceError};

/// Hashes a clear-text password into an Argon2id PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::PasswordHash(err.to_string()))
}

/// Checks `password` against a stored PHC string.
///
/// A hash that cannot be parsed never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!("Stored password hash is unreadable: {}", err);
            false
        }
    }
}

/// Hash verified in place of a missing owner's hash.
fn decoy_hash() -> Option<&'static str> {
    static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();
    DECOY_HASH
        .get_or_init(|| hash_password("realty-unknown-owner").ok())
        .as_deref()
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| ServiceError::PasswordHash(err.to_string()))?
}

/// Verifies `password` on the blocking pool. A missing stored hash is checked against a
/// decoy hash and never verifies.
pub async fn verify_password_blocking(password: String, stored_hash: Option<String>) -> Result<bool> {
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(stored_hash) => verify_password(&password, &stored_hash),
        None => {
            if let Some(decoy) = decoy_hash() {
                verify_password(&password, decoy);
            }
            false
        }
    })
    .await
    .map_err(|err| ServiceError::PasswordHash(err.to_string()))
}

/// Claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub name: String,
    /// Owner id
    pub uid: i32,
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: &str, audience: &str, lifetime_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    pub fn issue(&self, owner_id: i32, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            name: username.to_string(),
            uid: owner_id,
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        debug!("Issuing token {} for owner {}", claims.jti, owner_id);
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Validates signature, issuer, audience and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);

        let decoded = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-key", "realty", "realty-clients", 120)
    }

    #[tokio::test]
    async fn test_blocking_verify_checks_decoy_for_unknown_owner() {
        let hash = hash_password_blocking("password".to_string()).await.unwrap();
        assert!(verify_password_blocking("password".to_string(), Some(hash)).await.unwrap());
        assert!(!verify_password_blocking("password".to_string(), None).await.unwrap());
        assert!(!verify_password_blocking("realty-unknown-owner".to_string(), None).await.unwrap());

        let decoy = decoy_hash().unwrap();
        assert!(PasswordHash::new(decoy).is_ok());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password", &hash));
        assert!(!verify_password("Password", &hash));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("password").unwrap();
        let second = hash_password("password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_clear_text_stored_value_never_verifies() {
        assert!(!verify_password("password", "password"));
    }

    #[test]
    fn test_issued_token_carries_owner_claims() {
        let tokens = issuer();
        let token = tokens.issue(7, "john").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, "john");
        assert_eq!(claims.name, "john");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.iss, "realty");
        assert_eq!(claims.aud, "realty-clients");
        assert_eq!(claims.exp - claims.iat, 120 * 60);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_token_ids_are_unique() {
        let tokens = issuer();
        let first = tokens.verify(&tokens.issue(1, "john").unwrap()).unwrap();
        let second = tokens.verify(&tokens.issue(1, "john").unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let other = TokenIssuer::new("another-secret", "realty", "realty-clients", 120);
        let token = other.issue(1, "john").unwrap();
        assert!(matches!(issuer().verify(&token), Err(ServiceError::Token(_))));
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let other = TokenIssuer::new("test-secret-key", "realty", "somebody-else", 120);
        let token = other.issue(1, "john").unwrap();
        match issuer().verify(&token) {
            Err(ServiceError::Token(err)) => {
                assert!(matches!(err.kind(), ErrorKind::InvalidAudience))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = TokenIssuer::new("test-secret-key", "realty", "realty-clients", -5);
        let token = expired.issue(1, "john").unwrap();
        match issuer().verify(&token) {
            Err(ServiceError::Token(err)) => {
                assert!(matches!(err.kind(), ErrorKind::ExpiredSignature))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
