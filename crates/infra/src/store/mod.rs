//! Store traits owned by the persistence boundary.
//!
//! The access pipeline performs at most one persistence call per request
//! (update flows do one read-then-write pair); concurrent writes to the
//! same record are not coordinated here — last write wins.

use async_trait::async_trait;
use thiserror::Error;

use bazaar_auth::{Account, Role};
use bazaar_core::{AccountId, ListingId};
use bazaar_listings::{Listing, NewListing};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::{InMemoryAccountStore, InMemoryListingStore};
#[cfg(feature = "postgres")]
pub use postgres::{PgAccountStore, PgListingStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("name '{0}' is already taken")]
    DuplicateName(String),

    #[error("record not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Registration payload as it reaches storage: the secret is already
/// hashed by the time it crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountRecord {
    pub name: String,
    pub secret_hash: String,
    pub role: Role,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, assigning its id. Fails with
    /// [`StoreError::DuplicateName`] when the name is taken.
    async fn insert(&self, new: NewAccountRecord) -> Result<Account, StoreError>;

    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a mutated account (write half of a read-then-write pair).
    async fn update(&self, account: Account) -> Result<Account, StoreError>;
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Insert a new listing owned by `owner`, assigning its id.
    async fn insert(&self, owner: AccountId, new: NewListing) -> Result<Listing, StoreError>;

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Listing>, StoreError>;

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Listing>, StoreError>;

    /// Persist a mutated listing (write half of a read-then-write pair).
    async fn update(&self, listing: Listing) -> Result<Listing, StoreError>;

    /// Remove a listing. Returns `false` when the id did not resolve.
    async fn delete(&self, id: ListingId) -> Result<bool, StoreError>;
}
