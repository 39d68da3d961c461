//! REST-Handler fuer Tokens

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;

use nexablog_auth::AusgestellterToken;

use crate::error::ApiResult;
use crate::extract::JsonEingabe;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Anmeldung {
    pub email: String,
    pub password: String,
}

/// POST /tokens/authenticate
pub async fn authentifizieren(
    State(state): State<AppState>,
    JsonEingabe(anmeldung): JsonEingabe<Anmeldung>,
) -> ApiResult<(StatusCode, Json<AusgestellterToken>)> {
    let token = state
        .auth
        .anmelden(&anmeldung.email, &anmeldung.password)
        .await?;
    Ok((StatusCode::CREATED, Json(token)))
}
