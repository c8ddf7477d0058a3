use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bazaar_core::AccountId;

use crate::Role;

/// JWT claims model (transport-agnostic).
///
/// This is the full set of claims a bazaar token carries: the subject
/// account, its role, and the validity window in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / account identifier.
    pub sub: AccountId,

    /// Role granted to the bearer for the lifetime of the token.
    pub role: Role,

    /// Issued-at timestamp (unix seconds).
    pub iat: i64,

    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claims time window.
///
/// Note: this validates the *claims* only. Signature verification and
/// decoding live in [`crate::token`].
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims_at(now: DateTime<Utc>, ttl_secs: i64) -> Claims {
        Claims {
            sub: AccountId::new(1),
            role: Role::Vendor,
            iat: now.timestamp(),
            exp: now.timestamp() + ttl_secs,
        }
    }

    #[test]
    fn claims_inside_window_are_valid() {
        let now = Utc::now();
        let claims = claims_at(now, 3600);
        assert_eq!(validate_claims(&claims, now + Duration::minutes(30)), Ok(()));
    }

    #[test]
    fn claims_past_expiry_fail() {
        let now = Utc::now();
        let claims = claims_at(now, 3600);
        assert_eq!(
            validate_claims(&claims, now + Duration::hours(2)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn claims_from_the_future_fail() {
        let now = Utc::now();
        let claims = claims_at(now + Duration::hours(1), 3600);
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_fails() {
        let now = Utc::now();
        let claims = claims_at(now, -10);
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
