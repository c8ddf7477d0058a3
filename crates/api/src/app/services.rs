//! Service layer: wiring plus the per-request flows behind each endpoint.
//!
//! Each flow runs the remaining pipeline stages in order — authorize
//! (role policy), validate (field rules), persist — short-circuiting on
//! the first failure. No stage is retried, and at most one persistence
//! call happens per request (update flows do one read-then-write pair).

use std::sync::Arc;

use thiserror::Error;

use bazaar_auth::{
    Account, AccountError, AccountPublic, AccountUpdate, Action, Argon2Credentials, AuthzError,
    CredentialError, CredentialVerifier, NewAccount, Principal, Role, TokenError, TokenService,
    authorize,
};
use bazaar_core::{AccountId, ListingId};
use bazaar_infra::{AccountStore, ListingStore, NewAccountRecord, StoreError};
use bazaar_listings::{Listing, ListingError, ListingUpdate, NewListing};

use crate::app::dto;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    /// The role submitted at signin was outside the fixed enumeration.
    #[error("invalid role")]
    InvalidSigninRole,

    #[error("Invalid password")]
    CredentialMismatch,

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn user_not_found() -> ServiceError {
    ServiceError::NotFound("User not found".to_string())
}

fn product_not_found() -> ServiceError {
    ServiceError::NotFound("Product not found".to_string())
}

pub struct AppServices {
    accounts: Arc<dyn AccountStore>,
    listings: Arc<dyn ListingStore>,
    tokens: Arc<TokenService>,
    credentials: Arc<dyn CredentialVerifier>,
}

/// In-memory wiring (dev/test).
pub fn build_services(tokens: Arc<TokenService>) -> AppServices {
    AppServices::new(
        Arc::new(bazaar_infra::InMemoryAccountStore::new()),
        Arc::new(bazaar_infra::InMemoryListingStore::new()),
        tokens,
        Arc::new(Argon2Credentials),
    )
}

/// Postgres wiring: bootstrap the schema, then serve from the pool.
#[cfg(feature = "postgres")]
pub async fn build_postgres_services(
    tokens: Arc<TokenService>,
    pool: sqlx::PgPool,
) -> Result<AppServices, StoreError> {
    use bazaar_infra::store::postgres::{self, PgAccountStore, PgListingStore};

    postgres::migrate(&pool).await?;

    Ok(AppServices::new(
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(PgListingStore::new(pool)),
        tokens,
        Arc::new(Argon2Credentials),
    ))
}

impl AppServices {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        listings: Arc<dyn ListingStore>,
        tokens: Arc<TokenService>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            accounts,
            listings,
            tokens,
            credentials,
        }
    }

    /// Signin: account lookup, submitted-role membership check, credential
    /// comparison, then token issuance — in that order.
    ///
    /// The issued token always carries the *stored* role; the submitted
    /// role is only checked for membership in the enumeration.
    pub async fn signin(&self, req: dto::SigninRequest) -> Result<String, ServiceError> {
        let name = req
            .name
            .filter(|s| !s.trim().is_empty())
            .ok_or(AccountError::MissingField("name"))?;
        let password = req
            .password
            .filter(|s| !s.trim().is_empty())
            .ok_or(AccountError::MissingField("password"))?;

        let account = self
            .accounts
            .find_by_name(&name)
            .await?
            .ok_or_else(user_not_found)?;

        req.role
            .as_deref()
            .unwrap_or("")
            .parse::<Role>()
            .map_err(|_| ServiceError::InvalidSigninRole)?;

        if !self.credentials.verify(&password, account.secret_hash()) {
            return Err(ServiceError::CredentialMismatch);
        }

        let token = self.tokens.issue(account.id, account.role)?;
        tracing::info!(account_id = %account.id, "signin succeeded");
        Ok(token)
    }

    pub async fn signup(&self, req: dto::SignupRequest) -> Result<AccountPublic, ServiceError> {
        let new = NewAccount::from_parts(req.name, req.password, req.role)?;
        let secret_hash = self.credentials.hash(&new.secret)?;

        let account = self
            .accounts
            .insert(NewAccountRecord {
                name: new.name,
                secret_hash,
                role: new.role,
            })
            .await?;

        tracing::info!(account_id = %account.id, role = %account.role, "account registered");
        Ok(account.public())
    }

    pub async fn get_account(&self, id: &str) -> Result<AccountPublic, ServiceError> {
        let account = self.fetch_account(id).await?;
        Ok(account.public())
    }

    /// Partial account update; an empty update is a successful no-op.
    pub async fn update_account(
        &self,
        id: &str,
        req: dto::UpdateAccountRequest,
    ) -> Result<AccountPublic, ServiceError> {
        let update = AccountUpdate::from_parts(req.name, req.password, req.role)?;
        let mut account = self.fetch_account(id).await?;

        if update.is_noop() {
            return Ok(account.public());
        }

        if let Some(name) = update.name {
            account.name = name;
        }
        if let Some(secret) = update.secret {
            account.set_secret_hash(self.credentials.hash(&secret)?);
        }
        if let Some(role) = update.role {
            account.role = role;
        }

        let account = self.accounts.update(account).await?;
        Ok(account.public())
    }

    pub async fn create_listing(
        &self,
        principal: &Principal,
        req: dto::CreateListingRequest,
    ) -> Result<Listing, ServiceError> {
        authorize(principal, &Action::CreateListing)?;

        let new = NewListing::from_parts(req.name, req.price, req.description, req.stock)?;
        let listing = self.listings.insert(principal.id, new).await?;

        tracing::info!(listing_id = %listing.id, owner_id = %listing.owner_id, "listing created");
        Ok(listing)
    }

    /// Vendors see only their own listings; admin and user principals see
    /// the full catalogue.
    pub async fn list_listings(&self, principal: &Principal) -> Result<Vec<Listing>, ServiceError> {
        authorize(principal, &Action::ReadListings)?;

        let listings = if principal.role == Role::Vendor {
            self.listings.list_by_owner(principal.id).await?
        } else {
            self.listings.list_all().await?
        };

        if listings.is_empty() {
            return Err(ServiceError::NotFound("No products found".to_string()));
        }
        Ok(listings)
    }

    pub async fn get_listing(
        &self,
        principal: &Principal,
        id: &str,
    ) -> Result<Listing, ServiceError> {
        authorize(principal, &Action::ReadListing)?;
        self.fetch_listing(id).await
    }

    pub async fn update_listing(
        &self,
        principal: &Principal,
        id: &str,
        req: dto::UpdateListingRequest,
    ) -> Result<Listing, ServiceError> {
        let mut listing = self.fetch_listing(id).await?;
        authorize(
            principal,
            &Action::UpdateListing {
                owner: listing.owner_id,
            },
        )?;

        let update = ListingUpdate::from_parts(req.name, req.price, req.description, req.stock)?;
        listing.apply(update);

        Ok(self.listings.update(listing).await?)
    }

    pub async fn delete_listing(
        &self,
        principal: &Principal,
        id: &str,
    ) -> Result<(), ServiceError> {
        let listing = self.fetch_listing(id).await?;
        authorize(
            principal,
            &Action::DeleteListing {
                owner: listing.owner_id,
            },
        )?;

        if !self.listings.delete(listing.id).await? {
            return Err(product_not_found());
        }

        tracing::info!(listing_id = %listing.id, "listing deleted");
        Ok(())
    }

    async fn fetch_account(&self, id: &str) -> Result<Account, ServiceError> {
        // Unparseable ids cannot resolve to an entity, so they share the
        // not-found path.
        let id: AccountId = id.parse().map_err(|_| user_not_found())?;
        self.accounts.get(id).await?.ok_or_else(user_not_found)
    }

    async fn fetch_listing(&self, id: &str) -> Result<Listing, ServiceError> {
        let id: ListingId = id.parse().map_err(|_| product_not_found())?;
        self.listings.get(id).await?.ok_or_else(product_not_found)
    }
}
