//! Axum-Middleware: Authentifizierung pro Anfrage
//!
//! Jede Anfrage laeuft durch die `AuthPipeline`. Das Ergebnis landet als
//! `Identitaet` in den Request-Extensions, auch fuer anonyme Aufrufer.
//! Ungueltige Tokens werden sofort mit 401 beantwortet.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use nexablog_auth::AuthError;

use crate::error::ApiFehler;
use crate::state::AppState;

pub async fn authentifizieren(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ergebnis = match req.headers().get(header::AUTHORIZATION) {
        None => state.pipeline.authentifizieren(None).await,
        Some(wert) => match wert.to_str() {
            Ok(text) => state.pipeline.authentifizieren(Some(text)).await,
            // Nicht-ASCII im Header kann kein gueltiger Token sein
            Err(_) => Err(AuthError::TokenUngueltig),
        },
    };

    let mut response = match ergebnis {
        Ok(identitaet) => {
            req.extensions_mut().insert(identitaet);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(fehler = %e, "Authentifizierung fehlgeschlagen");
            ApiFehler::from(e).into_response()
        }
    };

    // Antworten haengen vom Authorization-Header ab
    response
        .headers_mut()
        .insert(header::VARY, HeaderValue::from_static("Authorization"));
    response
}
