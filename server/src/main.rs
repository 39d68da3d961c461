//! nexablog Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use nexablog_observability::logging_initialisieren;
use nexablog_server::{
    config::{KonfigQuelle, ServerConfig},
    Server,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("NEXABLOG_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let (config, quelle) = ServerConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    if quelle == KonfigQuelle::Standardwerte {
        tracing::warn!(
            pfad = %config_pfad,
            "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
        );
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        adresse = %config.bind_adresse(),
        "nexablog Server wird initialisiert"
    );

    Server::neu(config).starten().await
}
