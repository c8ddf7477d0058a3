use serde::Serialize;
use thiserror::Error;

use bazaar_core::{AccountId, ListingId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Price must be a positive number")]
    InvalidPrice,

    #[error("Stock must be a non-negative number")]
    InvalidStock,

    #[error("At least one field must be provided for update")]
    NoFieldsProvided,
}

/// A product listing owned by exactly one vendor account.
///
/// # Invariants
/// - `price > 0`
/// - `stock >= 0`
/// - `description` is non-empty
/// - `owner_id` references the vendor that created the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub owner_id: AccountId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock: i64,
}

impl Listing {
    /// Apply an already-validated partial update. Unsupplied fields keep
    /// their stored value.
    pub fn apply(&mut self, update: ListingUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
    }
}

/// Validated creation payload. Ownership is attached by the caller from
/// the authenticated principal, never from the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock: i64,
}

impl NewListing {
    /// Validate raw creation fields.
    ///
    /// All four fields are required; empty strings count as missing.
    /// Range checks run only after presence checks, so a payload that is
    /// both incomplete and out of range reports the missing field first.
    pub fn from_parts(
        name: Option<String>,
        price: Option<f64>,
        description: Option<String>,
        stock: Option<i64>,
    ) -> Result<Self, ListingError> {
        let name = required_text(name, "name")?;
        let price = price.ok_or(ListingError::MissingField("price"))?;
        let description = required_text(description, "description")?;
        let stock = stock.ok_or(ListingError::MissingField("stock"))?;

        check_price(price)?;
        check_stock(stock)?;

        Ok(Self {
            name,
            price,
            description,
            stock,
        })
    }
}

/// Validated partial update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock: Option<i64>,
}

impl ListingUpdate {
    /// Validate raw update fields: at least one field must be supplied,
    /// and any supplied price/stock must satisfy the listing invariants.
    pub fn from_parts(
        name: Option<String>,
        price: Option<f64>,
        description: Option<String>,
        stock: Option<i64>,
    ) -> Result<Self, ListingError> {
        let name = name.filter(|s| !s.trim().is_empty());
        let description = description.filter(|s| !s.trim().is_empty());

        if name.is_none() && price.is_none() && description.is_none() && stock.is_none() {
            return Err(ListingError::NoFieldsProvided);
        }

        if let Some(price) = price {
            check_price(price)?;
        }
        if let Some(stock) = stock {
            check_stock(stock)?;
        }

        Ok(Self {
            name,
            price,
            description,
            stock,
        })
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ListingError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ListingError::MissingField(field)),
    }
}

fn check_price(price: f64) -> Result<(), ListingError> {
    // NaN fails the comparison and is rejected with the rest.
    if price > 0.0 {
        Ok(())
    } else {
        Err(ListingError::InvalidPrice)
    }
}

fn check_stock(stock: i64) -> Result<(), ListingError> {
    if stock >= 0 {
        Ok(())
    } else {
        Err(ListingError::InvalidStock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_parts() -> (Option<String>, Option<f64>, Option<String>, Option<i64>) {
        (
            Some("Anvil".into()),
            Some(10.0),
            Some("drop-forged".into()),
            Some(5),
        )
    }

    #[test]
    fn creation_accepts_a_complete_payload() {
        let (name, price, description, stock) = full_parts();
        let new = NewListing::from_parts(name, price, description, stock).unwrap();
        assert_eq!(new.name, "Anvil");
        assert_eq!(new.price, 10.0);
        assert_eq!(new.stock, 5);
    }

    #[test]
    fn creation_reports_each_missing_field() {
        let cases: [(usize, &str); 4] = [(0, "name"), (1, "price"), (2, "description"), (3, "stock")];
        for (slot, field) in cases {
            let (mut name, mut price, mut description, mut stock) = full_parts();
            match slot {
                0 => name = None,
                1 => price = None,
                2 => description = None,
                _ => stock = None,
            }
            let err = NewListing::from_parts(name, price, description, stock).unwrap_err();
            assert_eq!(err, ListingError::MissingField(field));
        }
    }

    #[test]
    fn empty_name_counts_as_missing() {
        let (_, price, description, stock) = full_parts();
        let err = NewListing::from_parts(Some("  ".into()), price, description, stock).unwrap_err();
        assert_eq!(err, ListingError::MissingField("name"));
    }

    #[test]
    fn zero_stock_is_allowed() {
        let (name, price, description, _) = full_parts();
        assert!(NewListing::from_parts(name, price, description, Some(0)).is_ok());
    }

    #[test]
    fn update_requires_at_least_one_field() {
        assert_eq!(
            ListingUpdate::from_parts(None, None, None, None).unwrap_err(),
            ListingError::NoFieldsProvided
        );
    }

    #[test]
    fn update_leaves_unsupplied_fields_unchanged() {
        let mut listing = Listing {
            id: ListingId::new(1),
            owner_id: AccountId::new(1),
            name: "Anvil".into(),
            price: 10.0,
            description: "drop-forged".into(),
            stock: 5,
        };

        let update = ListingUpdate::from_parts(None, Some(12.5), None, None).unwrap();
        listing.apply(update);

        assert_eq!(listing.price, 12.5);
        assert_eq!(listing.name, "Anvil");
        assert_eq!(listing.stock, 5);
    }

    #[test]
    fn listing_serializes_with_camel_case_owner() {
        let listing = Listing {
            id: ListingId::new(3),
            owner_id: AccountId::new(9),
            name: "Anvil".into(),
            price: 10.0,
            description: "drop-forged".into(),
            stock: 5,
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["ownerId"], 9);
        assert_eq!(json["stock"], 5);
    }

    proptest! {
        #[test]
        fn non_positive_prices_never_validate(price in -1.0e9f64..=0.0f64) {
            let (name, _, description, stock) = full_parts();
            prop_assert_eq!(
                NewListing::from_parts(name, Some(price), description, stock).unwrap_err(),
                ListingError::InvalidPrice
            );
            prop_assert_eq!(
                ListingUpdate::from_parts(None, Some(price), None, None).unwrap_err(),
                ListingError::InvalidPrice
            );
        }

        #[test]
        fn negative_stock_never_validates(stock in i64::MIN..0i64) {
            let (name, price, description, _) = full_parts();
            prop_assert_eq!(
                NewListing::from_parts(name, price, description, Some(stock)).unwrap_err(),
                ListingError::InvalidStock
            );
            prop_assert_eq!(
                ListingUpdate::from_parts(None, None, None, Some(stock)).unwrap_err(),
                ListingError::InvalidStock
            );
        }

        #[test]
        fn positive_payloads_always_validate(price in 0.01f64..1.0e9, stock in 0i64..1_000_000) {
            let new = NewListing::from_parts(
                Some("Anvil".into()),
                Some(price),
                Some("drop-forged".into()),
                Some(stock),
            );
            prop_assert!(new.is_ok());
        }
    }
}
