//! Unauthenticated account surface: signin, signup, account read/update.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/signin", post(signin))
        .route("/signup", post(signup))
        .route("/users/:id", get(get_account))
        .route("/users/update/:id", put(update_account))
}

pub async fn signin(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SigninRequest>,
) -> axum::response::Response {
    match services.signin(body).await {
        Ok(token) => errors::json_ok(StatusCode::OK, serde_json::json!({ "token": token })),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SignupRequest>,
) -> axum::response::Response {
    match services.signup(body).await {
        Ok(account) => errors::json_ok(StatusCode::CREATED, account),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.get_account(&id).await {
        Ok(account) => errors::json_ok(StatusCode::OK, account),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_account(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateAccountRequest>,
) -> axum::response::Response {
    match services.update_account(&id, body).await {
        Ok(account) => errors::json_ok(StatusCode::OK, account),
        Err(e) => errors::service_error_to_response(e),
    }
}
