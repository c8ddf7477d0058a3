//! Signed, time-limited bearer tokens (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use bazaar_core::AccountId;

use crate::claims::{Claims, validate_claims};
use crate::{Principal, Role};

/// Fixed token validity window.
const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed encoding, or a claims window that has
    /// closed. Collapsed into one case on purpose: callers must not be
    /// able to distinguish why a presented token was rejected.
    #[error("invalid token")]
    Invalid,

    #[error("failed to sign token")]
    Signing,
}

/// Issues and verifies bearer tokens with a process-wide signing key.
///
/// The key is injected once at startup and never mutated afterwards.
/// Tokens carry no revocation list; a compromised token stays valid until
/// natural expiry.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Produce a signed token embedding the account id and role.
    pub fn issue(&self, id: AccountId, role: Role) -> Result<String, TokenError> {
        self.issue_at(id, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        id: AccountId,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Check signature integrity and expiry; on success return the
    /// embedded [`Principal`].
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenError> {
        // Expiry is checked by `validate_claims` against the caller's
        // clock, not by the decoder, so it stays deterministic in tests.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;

        validate_claims(&data.claims, now).map_err(|_| TokenError::Invalid)?;

        Ok(Principal::new(data.claims.sub, data.claims.role))
    }
}
