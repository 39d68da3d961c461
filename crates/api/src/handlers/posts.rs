//! REST-Handler fuer Beitraege
//!
//! Einzelne Beitraege tragen ein `ETag` mit ihrer Version. Ein `If-Match`
//! mit diesem Wert macht ein PUT zu einem expliziten Compare-and-Swap.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};

use nexablog_core::PostId;
use nexablog_db::models::BeitragRecord;
use nexablog_posts::BeitragEingabe;

use crate::error::{ApiFehler, ApiResult};
use crate::extract::{Aufrufer, JsonEingabe, Schreibrecht};
use crate::state::AppState;

/// GET /posts
pub async fn liste(State(state): State<AppState>) -> ApiResult<Json<Vec<BeitragRecord>>> {
    Ok(Json(state.beitraege.liste().await?))
}

/// GET /posts/:id
pub async fn laden(
    State(state): State<AppState>,
    Path(roh): Path<String>,
) -> ApiResult<Response> {
    let id = post_id(&roh)?;
    let beitrag = state.beitraege.laden(id).await?;
    Ok(mit_etag(StatusCode::OK, beitrag))
}

/// POST /posts
pub async fn erstellen(
    State(state): State<AppState>,
    Schreibrecht(identitaet): Schreibrecht,
    JsonEingabe(eingabe): JsonEingabe<BeitragEingabe>,
) -> ApiResult<Response> {
    let beitrag = state.beitraege.erstellen(&identitaet, &eingabe).await?;
    Ok(mit_etag(StatusCode::CREATED, beitrag))
}

/// PUT /posts/:id
pub async fn aktualisieren(
    State(state): State<AppState>,
    Schreibrecht(identitaet): Schreibrecht,
    Path(roh): Path<String>,
    headers: HeaderMap,
    JsonEingabe(eingabe): JsonEingabe<BeitragEingabe>,
) -> ApiResult<Response> {
    let id = post_id(&roh)?;
    let erwartet = if_match_version(&headers)?;
    let beitrag = state
        .beitraege
        .aktualisieren(&identitaet, id, erwartet, &eingabe)
        .await?;
    Ok(mit_etag(StatusCode::OK, beitrag))
}

/// DELETE /posts/:id
pub async fn loeschen(
    State(state): State<AppState>,
    Path(roh): Path<String>,
    Aufrufer(identitaet): Aufrufer,
) -> ApiResult<StatusCode> {
    // Anonyme Aufrufer bekommen 401, auch bei unsinniger ID
    identitaet.benutzer()?;
    let id = post_id(&roh)?;
    state.beitraege.loeschen(&identitaet, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Nicht-numerische oder nicht-positive IDs verhalten sich wie fehlende Beitraege
fn post_id(roh: &str) -> ApiResult<PostId> {
    PostId::parsen(roh).ok_or_else(ApiFehler::nicht_gefunden)
}

/// Liest `If-Match: "<version>"`; ohne Header gilt die gespeicherte Version
fn if_match_version(headers: &HeaderMap) -> ApiResult<Option<i64>> {
    let Some(wert) = headers.get(header::IF_MATCH) else {
        return Ok(None);
    };
    wert.to_str()
        .ok()
        .map(|s| s.trim().trim_matches('"'))
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .map(Some)
        .ok_or_else(|| {
            ApiFehler::UngueltigeAnfrage("If-Match muss eine Versionsnummer enthalten".into())
        })
}

fn mit_etag(status: StatusCode, beitrag: BeitragRecord) -> Response {
    let etag = HeaderValue::from_str(&format!("\"{}\"", beitrag.version));
    let mut response = (status, Json(beitrag)).into_response();
    if let Ok(etag) = etag {
        response.headers_mut().insert(header::ETAG, etag);
    }
    response
}
