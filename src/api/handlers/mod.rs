use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::database::DbPool;

pub mod game_types;
pub mod games;
pub mod grades;
pub mod players;

pub struct AppState {
    pub pool: DbPool,
    pub admin_token: String,
}

impl AppState {
    /// Rejects requests that don't carry the admin bearer token.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let expected = format!("Bearer {}", self.admin_token);
        let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());
        if auth_header != Some(expected.as_str()) {
            log::warn!("Rejected request without a valid admin token");
            return Err(StatusCode::UNAUTHORIZED.into_response());
        }
        Ok(())
    }
}

pub(crate) fn connection_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response()
}

pub(crate) fn query_error(e: anyhow::Error) -> Response {
    log::error!("Query failed: {:?}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response()
}

pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, message.into()).into_response()
}

pub(crate) fn not_found(message: impl Into<String>) -> Response {
    (StatusCode::NOT_FOUND, message.into()).into_response()
}

pub(crate) fn require_name(value: &str, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

pub async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "status": "OK" }))
}
