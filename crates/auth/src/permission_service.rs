//! Permission-Service fuer nexablog
//!
//! Ordnet Benutzern Berechtigungs-Codes zu und prueft sie. Es gibt keinen
//! Cache: jede Pruefung liest die aktuelle Zuordnung aus der Datenbank.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use nexablog_core::UserId;
use nexablog_db::{mit_frist, PermissionRepository};

use crate::error::{AuthError, AuthResult};
use crate::identitaet::Identitaet;

/// Bekannte Berechtigungs-Codes (per Migration angelegt)
pub mod codes {
    pub const POSTS_READ: &str = "posts:read";
    pub const POSTS_WRITE: &str = "posts:write";

    /// Codes die jeder neue Benutzer bei der Registrierung erhaelt
    pub const STANDARD: &[&str] = &[POSTS_READ, POSTS_WRITE];
}

/// Menge der Codes eines Benutzers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Berechtigungen(BTreeSet<String>);

impl Berechtigungen {
    /// Reine Mitgliedschaftspruefung
    pub fn enthaelt(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Berechtigungen {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Clone)]
pub struct PermissionService {
    repo: Arc<dyn PermissionRepository>,
    frist: Duration,
}

impl PermissionService {
    pub fn neu(repo: Arc<dyn PermissionRepository>, frist: Duration) -> Self {
        Self { repo, frist }
    }

    /// Vergibt Codes; mehrfache Vergabe und unbekannte Codes sind kein Fehler
    pub async fn gewaehren(&self, user_id: UserId, codes: &[&str]) -> AuthResult<()> {
        mit_frist(self.frist, self.repo.grant(user_id, codes)).await?;
        tracing::debug!(user_id = %user_id, ?codes, "Berechtigungen vergeben");
        Ok(())
    }

    /// Laedt alle Codes eines Benutzers
    pub async fn liste(&self, user_id: UserId) -> AuthResult<Berechtigungen> {
        let codes = mit_frist(self.frist, self.repo.list_for_user(user_id)).await?;
        Ok(codes.into_iter().collect())
    }

    /// Erfordert eine Berechtigung fuer die Identitaet
    ///
    /// Anonym ergibt `NichtAuthentifiziert`, fehlender Code `ZugriffVerweigert`.
    pub async fn erfordern(&self, identitaet: &Identitaet, code: &str) -> AuthResult<()> {
        let benutzer = identitaet.benutzer()?;
        let berechtigungen = self.liste(benutzer.id).await?;

        if berechtigungen.enthaelt(code) {
            Ok(())
        } else {
            tracing::debug!(user_id = %benutzer.id, code, "Berechtigung fehlt");
            Err(AuthError::ZugriffVerweigert(code.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexablog_db::{models::NeuerBenutzer, SqliteDb, UserRepository, STANDARD_FRIST};

    async fn setup() -> (PermissionService, Identitaet) {
        let db = SqliteDb::in_memory().await.unwrap();
        let user = UserRepository::create(
            &db,
            NeuerBenutzer {
                username: "alice",
                email: "alice@example.com",
                password_hash: "hash",
            },
        )
        .await
        .unwrap();
        (
            PermissionService::neu(Arc::new(db), STANDARD_FRIST),
            Identitaet::Benutzer(user),
        )
    }

    #[test]
    fn enthaelt_ist_reine_mitgliedschaft() {
        let b: Berechtigungen = vec!["posts:read".to_string()].into_iter().collect();
        assert!(b.enthaelt(codes::POSTS_READ));
        assert!(!b.enthaelt(codes::POSTS_WRITE));
        assert!(!Berechtigungen::default().enthaelt(codes::POSTS_READ));
    }

    #[tokio::test]
    async fn gewaehren_und_liste() {
        let (svc, identitaet) = setup().await;
        let id = identitaet.benutzer().unwrap().id;

        svc.gewaehren(id, codes::STANDARD).await.unwrap();
        svc.gewaehren(id, &[codes::POSTS_WRITE]).await.unwrap();

        let liste = svc.liste(id).await.unwrap();
        assert_eq!(
            liste.codes().collect::<Vec<_>>(),
            vec![codes::POSTS_READ, codes::POSTS_WRITE]
        );
    }

    #[tokio::test]
    async fn erfordern_prueft_identitaet_und_code() {
        let (svc, identitaet) = setup().await;
        let id = identitaet.benutzer().unwrap().id;

        let err = svc
            .erfordern(&Identitaet::Anonym, codes::POSTS_WRITE)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NichtAuthentifiziert));

        let err = svc.erfordern(&identitaet, codes::POSTS_WRITE).await.unwrap_err();
        assert!(matches!(err, AuthError::ZugriffVerweigert(ref c) if c == codes::POSTS_WRITE));

        svc.gewaehren(id, &[codes::POSTS_WRITE]).await.unwrap();
        svc.erfordern(&identitaet, codes::POSTS_WRITE).await.unwrap();
    }
}
