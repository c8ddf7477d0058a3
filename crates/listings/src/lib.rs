//! Listings domain module.
//!
//! This crate contains the listing model and its field validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod listing;

pub use listing::{Listing, ListingError, ListingUpdate, NewListing};
