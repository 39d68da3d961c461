//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable (Vorrang vor der Konfigurationsdatei):
//! - `NB_LOG_LEVEL`: Filter-Direktive (z.B. `info` oder `nexablog_api=debug`)
//! - `RUST_LOG`: wird genutzt wenn `NB_LOG_LEVEL` fehlt
//! - `NB_LOG_FORMAT`: Format (text/json)

use tracing_subscriber::{fmt, EnvFilter};

/// Initialisiert das Logging-System (genau einmal pro Prozess)
pub fn logging_initialisieren(level: &str, format: &str) {
    let filter = EnvFilter::try_from_env("NB_LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let aus_env = std::env::var("NB_LOG_FORMAT").ok();
    let format = log_format_bestimmen(aus_env.as_deref(), format);

    match format {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Waehlt das Log-Format: Umgebung vor Konfiguration, unbekannt wird `text`
fn log_format_bestimmen(aus_env: Option<&str>, konfiguriert: &str) -> &'static str {
    match aus_env.unwrap_or(konfiguriert) {
        "json" => "json",
        _ => "text",
    }
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}
