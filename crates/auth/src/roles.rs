use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role identifier used for access decisions.
///
/// The enumeration is closed: `admin`, `user`, `vendor`. Every
/// role-membership check in the system goes through this type, so signin,
/// signup, and the mutation paths cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
    Vendor,
}

/// A submitted role value was outside the fixed enumeration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid role")]
pub struct InvalidRole;

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Vendor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Vendor => "vendor",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "vendor" => Ok(Role::Vendor),
            _ => Err(InvalidRole),
        }
    }
}
