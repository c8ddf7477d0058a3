use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use bazaar_auth::TokenService;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

/// First two stages of the access pipeline: bearer extraction (401 when
/// absent or malformed) and token verification (403 on bad signature or
/// expiry). On success the derived principal travels with the request as
/// an extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Ok(t) => t.to_string(),
        Err(resp) => return resp,
    };

    let principal = match state.tokens.verify(&token) {
        Ok(p) => p,
        Err(_) => return errors::json_error(StatusCode::FORBIDDEN, "Invalid token"),
    };

    req.extensions_mut().insert(PrincipalContext::new(principal));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let unauthenticated = || errors::json_error(StatusCode::UNAUTHORIZED, "Unauthorized");

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?;

    let header = header.to_str().map_err(|_| unauthenticated())?;

    let token = header.strip_prefix("Bearer ").ok_or_else(unauthenticated)?.trim();
    if token.is_empty() {
        return Err(unauthenticated());
    }

    Ok(token)
}
