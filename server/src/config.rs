//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. `PORT` und `DATABASE_URL` ueberschreiben die Datei.

use std::time::Duration;

use anyhow::{bail, Context};
use serde::Deserialize;

use nexablog_auth::Argon2Kosten;
use nexablog_db::DatabaseConfig;
use nexablog_observability::log_format_gueltig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerEinstellungen,
    pub datenbank: DatenbankEinstellungen,
    pub auth: AuthEinstellungen,
    pub logging: LoggingEinstellungen,
}

/// Obergrenze fuer die Token-Gueltigkeit (ein Jahr)
pub const MAX_TOKEN_TTL_STUNDEN: i64 = 24 * 365;

/// Herkunft der geladenen Konfiguration
///
/// Beim Laden ist das Logging noch nicht initialisiert; der Aufrufer
/// meldet eine fehlende Datei erst danach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KonfigQuelle {
    Datei,
    Standardwerte,
}

/// HTTP-Server-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// Obergrenze pro Anfrage in Sekunden
    pub request_timeout_sek: u64,
    /// Wie lange laufende Anfragen beim Shutdown noch Zeit bekommen
    pub shutdown_frist_sek: u64,
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 8000,
            request_timeout_sek: 15,
            shutdown_frist_sek: 10,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    pub max_verbindungen: u32,
    pub min_verbindungen: u32,
    pub idle_timeout_sek: u64,
    pub acquire_timeout_sek: u64,
    /// Frist fuer jede einzelne Datenbankabfrage
    pub abfrage_frist_sek: u64,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_verbindungen: db.max_verbindungen,
            min_verbindungen: db.min_verbindungen,
            idle_timeout_sek: db.idle_timeout.as_secs(),
            acquire_timeout_sek: db.acquire_timeout.as_secs(),
            abfrage_frist_sek: 3,
        }
    }
}

/// Auth-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Gueltigkeit eines ausgestellten Tokens
    pub token_ttl_stunden: i64,
    pub argon2: Argon2Kosten,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            token_ttl_stunden: 24,
            argon2: Argon2Kosten::default(),
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei, wendet Umgebungsvariablen
    /// an und validiert das Ergebnis.
    /// Fehlt die Datei, werden die Standardwerte verwendet.
    pub fn laden(pfad: &str) -> anyhow::Result<(Self, KonfigQuelle)> {
        let (mut config, quelle) = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => (
                Self::aus_toml(&inhalt)
                    .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?,
                KonfigQuelle::Datei,
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), KonfigQuelle::Standardwerte)
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Konfigurationsdatei '{pfad}' nicht lesbar"))
            }
        };

        config.umgebung_anwenden(|name| std::env::var(name).ok())?;
        config.validieren()?;
        Ok((config, quelle))
    }

    pub fn aus_toml(inhalt: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(inhalt)?)
    }

    /// Ueberschreibt Werte aus `PORT` und `DATABASE_URL`
    pub fn umgebung_anwenden<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT ist keine gueltige Portnummer: '{port}'"))?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            self.datenbank.url = url;
        }
        Ok(())
    }

    /// Prueft Werte, die serde allein nicht absichern kann
    pub fn validieren(&self) -> anyhow::Result<()> {
        let db = &self.datenbank;
        if db.url.trim().is_empty() {
            bail!("datenbank.url darf nicht leer sein");
        }
        if db.max_verbindungen == 0 {
            bail!("datenbank.max_verbindungen muss groesser 0 sein");
        }
        if db.min_verbindungen > db.max_verbindungen {
            bail!(
                "datenbank.min_verbindungen ({}) groesser als max_verbindungen ({})",
                db.min_verbindungen,
                db.max_verbindungen
            );
        }
        if db.abfrage_frist_sek == 0 || db.acquire_timeout_sek == 0 {
            bail!("datenbank.abfrage_frist_sek und acquire_timeout_sek muessen groesser 0 sein");
        }
        if self.server.request_timeout_sek == 0 {
            bail!("server.request_timeout_sek muss groesser 0 sein");
        }
        if !(1..=MAX_TOKEN_TTL_STUNDEN).contains(&self.auth.token_ttl_stunden) {
            bail!(
                "auth.token_ttl_stunden muss zwischen 1 und {MAX_TOKEN_TTL_STUNDEN} liegen"
            );
        }
        if !log_format_gueltig(&self.logging.format) {
            bail!(
                "logging.format '{}' unbekannt (erlaubt: text, json)",
                self.logging.format
            );
        }
        Ok(())
    }

    /// Bind-Adresse fuer den HTTP-Server
    pub fn bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        let db = &self.datenbank;
        DatabaseConfig {
            url: db.url.clone(),
            max_verbindungen: db.max_verbindungen,
            min_verbindungen: db.min_verbindungen,
            idle_timeout: Duration::from_secs(db.idle_timeout_sek),
            acquire_timeout: Duration::from_secs(db.acquire_timeout_sek),
            ..DatabaseConfig::default()
        }
    }

    pub fn abfrage_frist(&self) -> Duration {
        Duration::from_secs(self.datenbank.abfrage_frist_sek)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_sek)
    }

    pub fn shutdown_frist(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_frist_sek)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.auth.token_ttl_stunden)
    }
}
