//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die Services halten die Repositories als
//! `Arc<dyn ...>`, daher verwenden die Traits `async_trait` (Send-Futures).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use nexablog_core::{PostId, UserId};

use crate::error::DbError;
use crate::models::{
    BeitragAenderung, BeitragRecord, BenutzerRecord, NeuerBeitrag, NeuerBenutzer, NeuerToken,
    TokenScope,
};

/// Ergebnis-Alias fuer Datenbankoperationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://nexablog.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Minimale Anzahl offen gehaltener Verbindungen
    pub min_verbindungen: u32,
    /// Ungenutzte Verbindungen werden nach dieser Zeit geschlossen
    pub idle_timeout: Duration,
    /// Maximale Wartezeit auf eine freie Verbindung
    pub acquire_timeout: Duration,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://nexablog.db".into(),
            max_verbindungen: 25,
            min_verbindungen: 1,
            idle_timeout: Duration::from_secs(15 * 60),
            acquire_timeout: Duration::from_secs(5),
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Legt einen Benutzer an; doppelte E-Mail ergibt `DbError::Eindeutigkeit`
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;
}

/// Repository fuer gehashte Tokens
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn create(&self, data: NeuerToken<'_>) -> DbResult<()>;

    /// Laedt den Besitzer eines nicht abgelaufenen Tokens mit passendem Scope
    async fn get_user_by_token(
        &self,
        hash: &[u8],
        scope: TokenScope,
        jetzt: DateTime<Utc>,
    ) -> DbResult<Option<BenutzerRecord>>;

    /// Loescht abgelaufene Tokens, gibt die Anzahl geloeschter Zeilen zurueck
    async fn delete_expired(&self, jetzt: DateTime<Utc>) -> DbResult<u64>;
}

/// Repository fuer Berechtigungen (Benutzer → Codes)
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Vergibt Codes idempotent; unbekannte Codes werden ignoriert
    async fn grant(&self, user_id: UserId, codes: &[&str]) -> DbResult<()>;

    async fn list_for_user(&self, user_id: UserId) -> DbResult<Vec<String>>;
}

/// Repository fuer Beitraege
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, data: NeuerBeitrag<'_>) -> DbResult<BeitragRecord>;

    async fn list(&self) -> DbResult<Vec<BeitragRecord>>;

    async fn get_by_id(&self, id: PostId) -> DbResult<Option<BeitragRecord>>;

    async fn list_by_author(&self, author_id: UserId) -> DbResult<Vec<BeitragRecord>>;

    /// Bedingtes Update: greift nur wenn die gespeicherte Version `version` ist
    ///
    /// Keine getroffene Zeile ergibt `Konflikt` (Beitrag existiert) oder
    /// `NichtGefunden`.
    async fn update(
        &self,
        id: PostId,
        version: i64,
        data: BeitragAenderung<'_>,
    ) -> DbResult<BeitragRecord>;

    /// Loescht einen Beitrag; keine getroffene Zeile ergibt `NichtGefunden`
    async fn delete(&self, id: PostId) -> DbResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_config_standard() {
        let cfg = DatabaseConfig::default();
        assert!(cfg.sqlite_wal);
        assert_eq!(cfg.max_verbindungen, 25);
        assert!(cfg.min_verbindungen <= cfg.max_verbindungen);
        assert_eq!(cfg.acquire_timeout, Duration::from_secs(5));
    }
}
