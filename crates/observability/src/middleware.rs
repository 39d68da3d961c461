//! Request-Timing und Request-ID Middleware fuer Axum
//!
//! Jede Anfrage erhaelt eine `x-request-id` (vom Client uebernommen oder
//! als UUID v4 erzeugt). Die ID steht im Request-Header fuer nachfolgende
//! Handler, im Response-Header fuer den Client und im Log-Event.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, Response},
    middleware::Next,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use uuid::Uuid;

/// Header-Name fuer die Request-ID
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Tracing-Layer von tower-http fuer Spans pro Anfrage
pub fn request_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Axum-Middleware-Funktion: vergibt Request-ID, misst Antwortzeit, loggt strukturiert.
///
/// Verwendung:
/// ```ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn(timing_middleware))
/// ```
pub async fn timing_middleware(mut req: Request<Body>, next: Next) -> Response<Body> {
    let request_id = request_id_uebernehmen_oder_erzeugen(&req);
    req.headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let methode = req.method().clone();
    let pfad = req.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(req).await;

    let dauer = start.elapsed();
    let status = response.status().as_u16();

    tracing::info!(
        request_id = request_id.to_str().unwrap_or("-"),
        method = %methode,
        path = %pfad,
        status = status,
        duration_ms = dauer.as_millis() as u64,
        "HTTP-Anfrage abgeschlossen"
    );

    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id);
    response
}

/// Uebernimmt eine vorhandene, plausible Request-ID, sonst UUID v4
fn request_id_uebernehmen_oder_erzeugen(req: &Request<Body>) -> HeaderValue {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .filter(|v| request_id_plausibel(v))
        .cloned()
        .unwrap_or_else(neue_request_id)
}

fn request_id_plausibel(wert: &HeaderValue) -> bool {
    let bytes = wert.as_bytes();
    !bytes.is_empty()
        && bytes.len() <= 128
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

fn neue_request_id() -> HeaderValue {
    // Hyphenated UUID besteht nur aus ASCII und ist immer ein gueltiger Header-Wert
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unbekannt"))
}
