//! Axum HTTP-Server fuer nexablog

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware, Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer};

use nexablog_observability::{request_trace_layer, timing_middleware};

use crate::{
    error::{panik_antwort, zeitlimit_als_json},
    middleware::authentifizieren,
    routes::router,
    state::AppState,
};

/// Maximale Groesse eines Request-Bodys (1 MiB)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct ApiServerKonfig {
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
    /// Obergrenze pro Anfrage, danach 408
    pub request_timeout: Duration,
}

impl Default for ApiServerKonfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Axum HTTP-Server fuer die REST-API
pub struct ApiServer {
    konfig: ApiServerKonfig,
}

impl ApiServer {
    pub fn neu(konfig: ApiServerKonfig) -> Self {
        Self { konfig }
    }

    /// Router samt allen Layern
    pub fn app(&self, state: AppState) -> Router {
        self.mit_layern(router(), state)
    }

    /// Legt den Layer-Stapel der API um beliebige Routen
    ///
    /// Fehler aus den Layern (Timeout, Panic) haben dasselbe
    /// `{"detail": ...}`-Format wie Handler-Fehler.
    pub fn mit_layern(&self, routen: Router<AppState>, state: AppState) -> Router {
        routen
            // Auth als innerster Layer, laeuft direkt vor den Handlern
            .layer(middleware::from_fn_with_state(
                state.clone(),
                authentifizieren,
            ))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(TimeoutLayer::new(self.konfig.request_timeout))
            .layer(middleware::map_response(zeitlimit_als_json))
            .layer(request_trace_layer())
            .layer(middleware::from_fn(timing_middleware))
            .layer(self.cors())
            .layer(CatchPanicLayer::custom(panik_antwort))
            .with_state(state)
    }

    /// Bedient Anfragen auf `listener`, bis `shutdown` aufgeloest wird
    ///
    /// Laufende Anfragen werden danach noch zu Ende bearbeitet; eine
    /// Obergrenze dafuer setzt der Aufrufer.
    pub async fn starten<F>(self, listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.app(state);
        let addr = listener.local_addr()?;
        tracing::info!(addr = %addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("REST-Server beendet");
        Ok(())
    }

    fn cors(&self) -> CorsLayer {
        if self.konfig.cors_origins.is_empty() {
            return CorsLayer::permissive();
        }
        let origins: Vec<HeaderValue> = self
            .konfig
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any)
    }
}
