//! Fixed role policy: (action, principal) → allowed/denied.

use thiserror::Error;

use bazaar_core::AccountId;

use crate::{Principal, Role};

/// A protected action on the listing surface.
///
/// Update and delete carry the owner of the targeted listing so the policy
/// can enforce ownership without reaching into storage itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateListing,
    ReadListings,
    ReadListing,
    UpdateListing { owner: AccountId },
    DeleteListing { owner: AccountId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("{0}")]
    Forbidden(&'static str),
}

/// Authorize a principal for an action.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// Reads are open to every authenticated principal; result scoping for
/// vendors happens at the query layer. Listing mutations are bound to the
/// owning account, with an admin override.
pub fn authorize(principal: &Principal, action: &Action) -> Result<(), AuthzError> {
    match action {
        Action::CreateListing => {
            if principal.role == Role::Vendor {
                Ok(())
            } else {
                Err(AuthzError::Forbidden("Only vendors can upload products"))
            }
        }
        Action::ReadListings | Action::ReadListing => Ok(()),
        Action::UpdateListing { owner } | Action::DeleteListing { owner } => {
            if principal.role == Role::Admin || principal.id == *owner {
                Ok(())
            } else {
                Err(AuthzError::Forbidden(
                    "Product belongs to another account",
                ))
            }
        }
    }
}
