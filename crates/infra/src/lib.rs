//! `bazaar-infra` — storage adapters behind the domain-facing store traits.
//!
//! The in-memory stores back tests and development; Postgres-backed stores
//! live behind the `postgres` cargo feature.

pub mod store;

pub use store::{
    AccountStore, InMemoryAccountStore, InMemoryListingStore, ListingStore, NewAccountRecord,
    StoreError,
};
