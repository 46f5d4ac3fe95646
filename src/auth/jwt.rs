//! Token Service
//! Mission: Issue and validate short-lived signed bearer tokens

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;

/// Admin sessions live for 10 minutes. Short enough that a leaked token
/// has a bounded blast radius without a revocation store.
pub const SESSION_TTL_MINUTES: i64 = 10;

/// Why a token was rejected. The authorization gate collapses both
/// cases into a uniform 401; the distinction exists for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Could not be parsed or verified against the signing secret.
    Malformed,
    /// Signature checks out but the embedded expiry has passed.
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "Malformed token"),
            TokenError::Expired => write!(f, "Expired token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Stateless token issuance and validation.
///
/// The signing secret comes from [`crate::config::Config`] at startup;
/// rotating it invalidates every outstanding token.
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            ttl: Duration::minutes(SESSION_TTL_MINUTES),
        }
    }

    /// Custom TTL, used by tests to mint expired or near-expiry tokens.
    pub fn with_ttl(secret: String, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Sign a token carrying `subject` with expiry = now + TTL.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        let expiry = now
            .checked_add_signed(self.ttl)
            .context("Invalid expiry timestamp")?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: expiry.timestamp() as usize,
        };

        debug!(
            "Issuing access token for {}, expires in {}s",
            subject,
            self.ttl.num_seconds()
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign access token")
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Expiry is strict: a token checked at or after its `exp` instant
    /// fails with `Expired`, no leeway.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Malformed),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-12345";

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(TEST_SECRET.to_string());
        let token = service.issue("admin").unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(
            claims.exp - claims.iat,
            (SESSION_TTL_MINUTES * 60) as usize
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = TokenService::new(TEST_SECRET.to_string());
        assert_eq!(
            service.validate("not.a.token").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(service.validate("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let issuer = TokenService::new("secret-one".to_string());
        let verifier = TokenService::new("secret-two".to_string());

        let token = issuer.issue("admin").unwrap();
        assert_eq!(
            verifier.validate(&token).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_expired_token_is_expired() {
        // Mint a token that expired two minutes ago.
        let service =
            TokenService::with_ttl(TEST_SECRET.to_string(), Duration::seconds(-120));
        let token = service.issue("admin").unwrap();

        let verifier = TokenService::new(TEST_SECRET.to_string());
        assert_eq!(verifier.validate(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_token_valid_until_expiry_instant() {
        // A comfortable margin before expiry must validate.
        let service = TokenService::with_ttl(TEST_SECRET.to_string(), Duration::seconds(30));
        let token = service.issue("admin").unwrap();
        assert!(service.validate(&token).is_ok());
    }
}
