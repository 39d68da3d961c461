//! Begruessung und Health-Check

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::state::AppState;

/// GET /
pub async fn willkommen() -> impl IntoResponse {
    Json(json!({ "detail": "Willkommen bei nexablog" }))
}

/// GET /health – 200 wenn die Datenbank antwortet, sonst 503
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::warn!(fehler = %e, "Health-Check: Datenbank nicht erreichbar");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
