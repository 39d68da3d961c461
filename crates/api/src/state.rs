//! Geteilter Axum-State

use std::sync::Arc;
use std::time::Duration;

use nexablog_auth::{AuthPipeline, AuthService, PasswortHasher, PermissionService, TokenAussteller};
use nexablog_db::SqliteDb;
use nexablog_posts::BeitragService;

/// Axum-State fuer die REST-Schnittstelle
///
/// Alle Dienste sind billig klonbar (intern `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub pipeline: AuthPipeline,
    pub beitraege: BeitragService,
    pub berechtigungen: PermissionService,
    pub tokens: TokenAussteller,
    pub db: SqliteDb,
}

impl AppState {
    /// Verdrahtet alle Dienste auf einer SQLite-Datenbank
    pub fn aufbauen(
        db: SqliteDb,
        hasher: PasswortHasher,
        token_ttl: chrono::Duration,
        frist: Duration,
    ) -> Self {
        let repo = Arc::new(db.clone());
        let tokens = TokenAussteller::neu(repo.clone(), frist);
        let berechtigungen = PermissionService::neu(repo.clone(), frist);

        let auth = AuthService::neu(
            repo.clone(),
            hasher,
            tokens.clone(),
            berechtigungen.clone(),
            token_ttl,
            frist,
        );
        let beitraege = BeitragService::neu(repo, berechtigungen.clone(), frist);

        Self {
            auth,
            pipeline: AuthPipeline::neu(tokens.clone()),
            beitraege,
            berechtigungen,
            tokens,
            db,
        }
    }
}
