//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: store/credential/token wiring and the per-request flows
//! - `routes/`: HTTP routes + handlers (one file per surface)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: response envelopes and error mapping

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use bazaar_auth::TokenService;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router backed by in-memory stores (the entrypoint
/// used by `main.rs` and the black-box tests).
pub fn build_app(jwt_secret: String) -> Router {
    let tokens = Arc::new(TokenService::new(jwt_secret.as_bytes()));
    let services = Arc::new(services::build_services(tokens.clone()));
    build_app_with(services, tokens)
}

/// Build the router against pre-wired services (store backend chosen by
/// the caller).
pub fn build_app_with(services: Arc<services::AppServices>, tokens: Arc<TokenService>) -> Router {
    let auth_state = middleware::AuthState { tokens };

    // Protected routes: bearer token required.
    let protected = Router::new()
        .nest("/api/products", routes::listings::router())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::accounts::router())
        .merge(protected)
        .layer(Extension(services))
}
