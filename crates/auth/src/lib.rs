//! `bazaar-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! signing, role policy, credential hashing, and account field validation
//! are all deterministic given their inputs.

pub mod account;
pub mod claims;
pub mod credential;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod token;

pub use account::{Account, AccountError, AccountPublic, AccountUpdate, NewAccount};
pub use claims::{Claims, TokenValidationError, validate_claims};
pub use credential::{Argon2Credentials, CredentialError, CredentialVerifier};
pub use policy::{Action, AuthzError, authorize};
pub use principal::Principal;
pub use roles::{InvalidRole, Role};
pub use token::{TokenError, TokenService};
