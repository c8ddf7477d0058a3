//! Request DTOs.
//!
//! Every field is optional at the transport boundary; presence and range
//! rules are enforced by the domain validators so that failures surface as
//! typed validation errors inside the standard envelope instead of
//! deserialization rejections.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateListingRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock: Option<i64>,
}
