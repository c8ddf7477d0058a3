use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use bazaar_infra::StoreError;

use crate::app::services::ServiceError;

/// Success envelope: `{"status":"ok","data":...}`.
pub fn json_ok(status: StatusCode, data: impl Serialize) -> Response {
    (status, Json(json!({ "status": "ok", "data": data }))).into_response()
}

/// Failure envelope: `{"status":"error","message":...}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "status": "error", "message": message.into() })),
    )
        .into_response()
}

/// Translate a pipeline failure into the envelope.
///
/// Validation → 400, credential mismatch → 401, policy denial → 403,
/// unresolved ids → 404. Backend and hashing failures log the detail and
/// return a generic 500; the cause never reaches the client.
pub fn service_error_to_response(err: ServiceError) -> Response {
    match &err {
        ServiceError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg.clone()),
        ServiceError::InvalidSigninRole => json_error(StatusCode::FORBIDDEN, "invalid role"),
        ServiceError::CredentialMismatch => {
            json_error(StatusCode::UNAUTHORIZED, "Invalid password")
        }
        ServiceError::Forbidden(e) => json_error(StatusCode::FORBIDDEN, e.to_string()),
        ServiceError::Account(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::Listing(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::Store(StoreError::DuplicateName(_)) => {
            json_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        ServiceError::Store(StoreError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not found")
        }
        ServiceError::Store(StoreError::Backend(_))
        | ServiceError::Credential(_)
        | ServiceError::Token(_) => {
            tracing::error!(error = %err, "request failed with internal error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
