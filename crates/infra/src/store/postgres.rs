//! Postgres-backed stores (enabled with the `postgres` feature).

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use bazaar_auth::{Account, Role};
use bazaar_core::{AccountId, ListingId};
use bazaar_listings::{Listing, NewListing};

use super::{AccountStore, ListingStore, NewAccountRecord, StoreError};

/// Create the schema if it does not exist yet.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS accounts (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            secret_hash TEXT NOT NULL,
            role TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS listings (
            id BIGSERIAL PRIMARY KEY,
            owner_id BIGINT NOT NULL REFERENCES accounts(id),
            name TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            description TEXT NOT NULL,
            stock BIGINT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    Ok(())
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    let role: String = row.try_get("role").map_err(backend)?;
    let role: Role = role
        .parse()
        .map_err(|_| StoreError::Backend(format!("unknown stored role '{role}'")))?;

    Ok(Account::new(
        AccountId::new(row.try_get("id").map_err(backend)?),
        row.try_get("name").map_err(backend)?,
        row.try_get("secret_hash").map_err(backend)?,
        role,
    ))
}

fn listing_from_row(row: &PgRow) -> Result<Listing, StoreError> {
    Ok(Listing {
        id: ListingId::new(row.try_get("id").map_err(backend)?),
        owner_id: AccountId::new(row.try_get("owner_id").map_err(backend)?),
        name: row.try_get("name").map_err(backend)?,
        price: row.try_get("price").map_err(backend)?,
        description: row.try_get("description").map_err(backend)?,
        stock: row.try_get("stock").map_err(backend)?,
    })
}

fn map_insert_error(name: &str, err: sqlx::Error) -> StoreError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => StoreError::DuplicateName(name.to_string()),
        _ => backend(err),
    }
}

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, new: NewAccountRecord) -> Result<Account, StoreError> {
        let row = sqlx::query(
            "INSERT INTO accounts (name, secret_hash, role) VALUES ($1, $2, $3)
             RETURNING id, name, secret_hash, role",
        )
        .bind(&new.name)
        .bind(&new.secret_hash)
        .bind(new.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(&new.name, e))?;

        account_from_row(&row)
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query("SELECT id, name, secret_hash, role FROM accounts WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query("SELECT id, name, secret_hash, role FROM accounts WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let row = sqlx::query(
            "UPDATE accounts SET name = $2, secret_hash = $3, role = $4 WHERE id = $1
             RETURNING id, name, secret_hash, role",
        )
        .bind(account.id.as_i64())
        .bind(&account.name)
        .bind(account.secret_hash())
        .bind(account.role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_insert_error(&account.name, e))?;

        match row {
            Some(row) => account_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }
}

pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn insert(&self, owner: AccountId, new: NewListing) -> Result<Listing, StoreError> {
        let row = sqlx::query(
            "INSERT INTO listings (owner_id, name, price, description, stock)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, owner_id, name, price, description, stock",
        )
        .bind(owner.as_i64())
        .bind(&new.name)
        .bind(new.price)
        .bind(&new.description)
        .bind(new.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        listing_from_row(&row)
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        let row = sqlx::query(
            "SELECT id, owner_id, name, price, description, stock FROM listings WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(listing_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Listing>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, owner_id, name, price, description, stock FROM listings ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(listing_from_row).collect()
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Listing>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, owner_id, name, price, description, stock FROM listings
             WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(listing_from_row).collect()
    }

    async fn update(&self, listing: Listing) -> Result<Listing, StoreError> {
        let row = sqlx::query(
            "UPDATE listings SET name = $2, price = $3, description = $4, stock = $5
             WHERE id = $1
             RETURNING id, owner_id, name, price, description, stock",
        )
        .bind(listing.id.as_i64())
        .bind(&listing.name)
        .bind(listing.price)
        .bind(&listing.description)
        .bind(listing.stock)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            Some(row) => listing_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: ListingId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }
}
