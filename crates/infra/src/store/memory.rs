//! In-memory stores for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use bazaar_auth::Account;
use bazaar_core::{AccountId, ListingId};
use bazaar_listings::{Listing, NewListing};

use super::{AccountStore, ListingStore, NewAccountRecord, StoreError};

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<HashMap<AccountId, Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, new: NewAccountRecord) -> Result<Account, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;

        if map.values().any(|a| a.name == new.name) {
            return Err(StoreError::DuplicateName(new.name));
        }

        let id = AccountId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let account = Account::new(id, new.name, new.secret_hash, new.role);
        map.insert(id, account.clone());
        Ok(account)
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().find(|a| a.name == name).cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;

        if !map.contains_key(&account.id) {
            return Err(StoreError::NotFound);
        }
        if map
            .values()
            .any(|a| a.id != account.id && a.name == account.name)
        {
            return Err(StoreError::DuplicateName(account.name));
        }

        map.insert(account.id, account.clone());
        Ok(account)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    inner: RwLock<HashMap<ListingId, Listing>>,
    next_id: AtomicI64,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn sorted(mut listings: Vec<Listing>) -> Vec<Listing> {
        // Stable, insertion-ordered output for list endpoints.
        listings.sort_by_key(|l| l.id);
        listings
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn insert(&self, owner: AccountId, new: NewListing) -> Result<Listing, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;

        let id = ListingId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let listing = Listing {
            id,
            owner_id: owner,
            name: new.name,
            price: new.price,
            description: new.description,
            stock: new.stock,
        };
        map.insert(id, listing.clone());
        Ok(listing)
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Listing>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(Self::sorted(map.values().cloned().collect()))
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Listing>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(Self::sorted(
            map.values().filter(|l| l.owner_id == owner).cloned().collect(),
        ))
    }

    async fn update(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;

        if !map.contains_key(&listing.id) {
            return Err(StoreError::NotFound);
        }
        map.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn delete(&self, id: ListingId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_auth::Role;

    fn record(name: &str) -> NewAccountRecord {
        NewAccountRecord {
            name: name.to_string(),
            secret_hash: "$argon2id$fake".to_string(),
            role: Role::Vendor,
        }
    }

    fn anvil() -> NewListing {
        NewListing {
            name: "Anvil".to_string(),
            price: 10.0,
            description: "drop-forged".to_string(),
            stock: 5,
        }
    }

    #[tokio::test]
    async fn accounts_get_sequential_ids() {
        let store = InMemoryAccountStore::new();
        let a = store.insert(record("alice")).await.unwrap();
        let b = store.insert(record("bob")).await.unwrap();
        assert!(a.id < b.id);
    }

    #[tokio::test]
    async fn duplicate_account_names_are_rejected() {
        let store = InMemoryAccountStore::new();
        store.insert(record("alice")).await.unwrap();

        let err = store.insert(record("alice")).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateName("alice".to_string()));
    }

    #[tokio::test]
    async fn rename_onto_an_existing_name_is_rejected() {
        let store = InMemoryAccountStore::new();
        store.insert(record("alice")).await.unwrap();
        let mut bob = store.insert(record("bob")).await.unwrap();

        bob.name = "alice".to_string();
        assert!(matches!(
            store.update(bob).await,
            Err(StoreError::DuplicateName(_))
        ));
    }

    #[tokio::test]
    async fn find_by_name_resolves_inserted_accounts() {
        let store = InMemoryAccountStore::new();
        let inserted = store.insert(record("alice")).await.unwrap();

        let found = store.find_by_name("alice").await.unwrap().unwrap();
        assert_eq!(found, inserted);
        assert!(store.find_by_name("carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listings_scope_by_owner() {
        let store = InMemoryListingStore::new();
        let owner_a = AccountId::new(1);
        let owner_b = AccountId::new(2);

        store.insert(owner_a, anvil()).await.unwrap();
        store.insert(owner_a, anvil()).await.unwrap();
        store.insert(owner_b, anvil()).await.unwrap();

        assert_eq!(store.list_by_owner(owner_a).await.unwrap().len(), 2);
        assert_eq!(store.list_by_owner(owner_b).await.unwrap().len(), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn delete_reports_whether_the_id_resolved() {
        let store = InMemoryListingStore::new();
        let listing = store.insert(AccountId::new(1), anvil()).await.unwrap();

        assert!(store.delete(listing.id).await.unwrap());
        assert!(!store.delete(listing.id).await.unwrap());
        assert!(store.get(listing.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_round_trips_a_mutated_listing() {
        let store = InMemoryListingStore::new();
        let mut listing = store.insert(AccountId::new(1), anvil()).await.unwrap();

        listing.price = 12.5;
        store.update(listing.clone()).await.unwrap();

        let stored = store.get(listing.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 12.5);
    }
}
