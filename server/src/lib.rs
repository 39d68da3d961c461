//! nexablog-server – Bibliotheks-Root
//!
//! Verdrahtet Datenbank, Dienste und REST-Server und stellt den
//! oeffentlichen Einstiegspunkt fuer Integrationstests bereit.

pub mod config;
pub mod shutdown;
pub mod wartung;

use std::future::Future;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, sync::watch};

use nexablog_api::{ApiServer, ApiServerKonfig, AppState};
use nexablog_auth::PasswortHasher;
use nexablog_db::SqliteDb;

use config::ServerConfig;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Bindet die konfigurierte Adresse und laeuft bis Ctrl-C / SIGTERM
    pub async fn starten(self) -> Result<()> {
        let adresse = self.config.bind_adresse();
        let listener = TcpListener::bind(&adresse)
            .await
            .with_context(|| format!("Adresse '{adresse}' kann nicht gebunden werden"))?;
        self.starten_mit(listener, shutdown::signal()).await
    }

    /// Startet alle Subsysteme auf `listener` und laeuft bis `signal`
    ///
    /// Reihenfolge:
    /// 1. Datenbank oeffnen und migrieren
    /// 2. Dienste verdrahten, Token-Bereinigung starten
    /// 3. REST-Server starten
    /// 4. Nach dem Signal: laufende Anfragen innerhalb der Shutdown-Frist
    ///    beenden, danach hart abbrechen und den Pool schliessen
    pub async fn starten_mit<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let cfg = &self.config;

        let db = SqliteDb::oeffnen(&cfg.database_config())
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;
        let hasher =
            PasswortHasher::neu(cfg.auth.argon2).context("Ungueltige Argon2-Parameter")?;
        let state = AppState::aufbauen(db.clone(), hasher, cfg.token_ttl(), cfg.abfrage_frist());

        let (stopp_tx, stopp_rx) = watch::channel(false);
        let bereinigung = wartung::token_bereinigung_starten(
            state.tokens.clone(),
            wartung::BEREINIGUNG_INTERVALL,
            stopp_rx.clone(),
        );

        let api = ApiServer::neu(ApiServerKonfig {
            cors_origins: cfg.server.cors_origins.clone(),
            request_timeout: cfg.request_timeout(),
        });
        let mut server_stopp = stopp_rx;
        let mut server = tokio::spawn(api.starten(listener, state, async move {
            let _ = server_stopp.changed().await;
        }));

        tracing::info!("Server laeuft. Warte auf Shutdown-Signal (Ctrl-C / SIGTERM)...");

        let ergebnis = tokio::select! {
            _ = signal => {
                let _ = stopp_tx.send(true);
                match tokio::time::timeout(cfg.shutdown_frist(), &mut server).await {
                    Ok(beendet) => beendet.context("REST-Server-Task abgebrochen").and_then(|r| r),
                    Err(_) => {
                        tracing::warn!(
                            frist_sek = cfg.server.shutdown_frist_sek,
                            "Shutdown-Frist abgelaufen, verbleibende Verbindungen werden getrennt"
                        );
                        server.abort();
                        Ok(())
                    }
                }
            }
            beendet = &mut server => {
                // REST-Server ohne Signal beendet: das ist immer ein Fehler
                let _ = stopp_tx.send(true);
                beendet
                    .context("REST-Server-Task abgebrochen")
                    .and_then(|r| r)
                    .and_then(|()| Err(anyhow::anyhow!("REST-Server unerwartet beendet")))
            }
        };

        if let Err(e) = bereinigung.await {
            tracing::warn!(fehler = %e, "Token-Bereinigung nicht sauber beendet");
        }
        db.schliessen().await;
        tracing::info!("Server beendet");

        ergebnis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::sync::oneshot;

    fn test_config() -> ServerConfig {
        let mut cfg = ServerConfig::default();
        cfg.datenbank.url = "sqlite::memory:".into();
        // In-Memory: alle Anfragen muessen dieselbe Verbindung nutzen
        cfg.datenbank.max_verbindungen = 1;
        cfg.datenbank.min_verbindungen = 1;
        cfg.server.shutdown_frist_sek = 2;
        cfg.auth.argon2.memory_kib = 1024;
        cfg.auth.argon2.iterations = 1;
        cfg
    }

    #[tokio::test]
    async fn startet_beantwortet_anfragen_und_faehrt_herunter() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(Server::neu(test_config()).starten_mit(listener, async move {
            let _ = rx.await;
        }));

        let client = reqwest::Client::new();
        let url = format!("http://{addr}/health");
        let mut antwort = None;
        for _ in 0..50 {
            if let Ok(res) = client.get(&url).send().await {
                antwort = Some(res);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(antwort.expect("Server antwortet nicht").status(), 200);

        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("Shutdown dauert zu lange")
            .unwrap()
            .unwrap();
    }
}
