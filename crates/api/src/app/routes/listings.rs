//! Bearer-protected listing surface.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_listing).get(list_listings))
        .route("/:id", get(get_listing).delete(delete_listing))
        .route("/update/:id", put(update_listing))
}

pub async fn create_listing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateListingRequest>,
) -> axum::response::Response {
    match services.create_listing(principal.principal(), body).await {
        Ok(listing) => errors::json_ok(StatusCode::CREATED, listing),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_listings(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.list_listings(principal.principal()).await {
        Ok(listings) => errors::json_ok(StatusCode::OK, listings),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_listing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.get_listing(principal.principal(), &id).await {
        Ok(listing) => errors::json_ok(StatusCode::OK, listing),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_listing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateListingRequest>,
) -> axum::response::Response {
    match services
        .update_listing(principal.principal(), &id, body)
        .await
    {
        Ok(listing) => errors::json_ok(StatusCode::OK, listing),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_listing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.delete_listing(principal.principal(), &id).await {
        Ok(()) => errors::json_ok(
            StatusCode::OK,
            serde_json::json!({ "message": "Product deleted successfully" }),
        ),
        Err(e) => errors::service_error_to_response(e),
    }
}
