//! REST-Handler fuer Benutzer

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use nexablog_auth::Registrierung;
use nexablog_db::models::BenutzerRecord;

use crate::error::ApiResult;
use crate::extract::{AuthBenutzer, JsonEingabe};
use crate::state::AppState;

/// POST /users
pub async fn registrieren(
    State(state): State<AppState>,
    JsonEingabe(eingabe): JsonEingabe<Registrierung>,
) -> ApiResult<(StatusCode, Json<BenutzerRecord>)> {
    let benutzer = state.auth.registrieren(&eingabe).await?;
    Ok((StatusCode::CREATED, Json(benutzer)))
}

/// GET /users/me – eigener Benutzer samt eigenen Beitraegen
pub async fn ich(
    State(state): State<AppState>,
    AuthBenutzer(benutzer): AuthBenutzer,
) -> ApiResult<Json<Value>> {
    let beitraege = state.beitraege.nach_autor(benutzer.id).await?;
    Ok(Json(json!({ "user": benutzer, "posts": beitraege })))
}
