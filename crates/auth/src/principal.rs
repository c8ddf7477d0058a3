use serde::{Deserialize, Serialize};

use bazaar_core::AccountId;

use crate::Role;

/// The authenticated identity derived from a verified token.
///
/// A principal is created at token-issue time from stored account data and
/// is never mutated afterwards; its lifetime is bounded by the token's
/// expiry, not by the process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: AccountId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: AccountId, role: Role) -> Self {
        Self { id, role }
    }
}
