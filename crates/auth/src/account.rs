//! Account model and account field validation.

use serde::Serialize;
use thiserror::Error;

use bazaar_core::AccountId;

use crate::{InvalidRole, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid role")]
    InvalidRole(#[from] InvalidRole),
}

/// A stored account.
///
/// # Invariants
/// - `role` is always a member of the fixed enumeration.
/// - `secret_hash` is opaque and never serialized; responses go through
///   [`AccountPublic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    secret_hash: String,
    pub role: Role,
}

impl Account {
    pub fn new(id: AccountId, name: String, secret_hash: String, role: Role) -> Self {
        Self {
            id,
            name,
            secret_hash,
            role,
        }
    }

    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    pub fn set_secret_hash(&mut self, secret_hash: String) {
        self.secret_hash = secret_hash;
    }

    /// Transport-safe projection (id, name, role).
    pub fn public(&self) -> AccountPublic {
        AccountPublic {
            id: self.id,
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// The only serializable view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountPublic {
    pub id: AccountId,
    pub name: String,
    pub role: Role,
}

/// Validated registration payload. `secret` is still plaintext here; the
/// caller hashes it before anything touches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub secret: String,
    pub role: Role,
}

impl NewAccount {
    /// Validate raw registration fields.
    ///
    /// `name` and `secret` are required (empty counts as missing); `role`
    /// defaults to `user` and must otherwise be in the enumeration.
    pub fn from_parts(
        name: Option<String>,
        secret: Option<String>,
        role: Option<String>,
    ) -> Result<Self, AccountError> {
        let name = required(name, "name")?;
        let secret = required(secret, "password")?;
        let role = match role.as_deref() {
            None | Some("") => Role::default(),
            Some(s) => s.parse::<Role>()?,
        };

        Ok(Self { name, secret, role })
    }
}

/// Validated partial account update. Omitted (or empty) fields leave the
/// stored value unchanged; an update with no fields at all is a no-op by
/// design.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub secret: Option<String>,
    pub role: Option<Role>,
}

impl AccountUpdate {
    pub fn from_parts(
        name: Option<String>,
        secret: Option<String>,
        role: Option<String>,
    ) -> Result<Self, AccountError> {
        let role = match role.as_deref() {
            None | Some("") => None,
            Some(s) => Some(s.parse::<Role>()?),
        };

        Ok(Self {
            name: name.filter(|s| !s.trim().is_empty()),
            secret: secret.filter(|s| !s.trim().is_empty()),
            role,
        })
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.secret.is_none() && self.role.is_none()
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AccountError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AccountError::MissingField(field)),
    }
}
