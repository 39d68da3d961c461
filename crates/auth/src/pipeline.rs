//! Auth-Pipeline: Authorization-Header → Identitaet
//!
//! Ablauf pro Anfrage:
//! - kein oder nur Leerraum als Credential: anonym
//! - nicht `Bearer <token>`: `TokenUngueltig`
//! - Token nicht aufloesbar: `TokenUngueltig` (identisch zum vorigen Fall)
//! - sonst: Benutzer-Identitaet
//!
//! Datenbankfehler bleiben Datenbankfehler und werden nicht als 401 maskiert.

use nexablog_db::models::TokenScope;

use crate::error::{AuthError, AuthResult};
use crate::identitaet::Identitaet;
use crate::token::TokenAussteller;

#[derive(Clone)]
pub struct AuthPipeline {
    tokens: TokenAussteller,
}

impl AuthPipeline {
    pub fn neu(tokens: TokenAussteller) -> Self {
        Self { tokens }
    }

    /// Bestimmt die Identitaet aus dem Authorization-Header
    pub async fn authentifizieren(&self, header: Option<&str>) -> AuthResult<Identitaet> {
        let Some(header) = header.filter(|h| !h.trim().is_empty()) else {
            return Ok(Identitaet::Anonym);
        };

        let token = bearer_token(header).ok_or(AuthError::TokenUngueltig)?;
        let benutzer = self
            .tokens
            .aufloesen(token, TokenScope::Authentication)
            .await?;

        Ok(Identitaet::Benutzer(benutzer))
    }
}

/// Extrahiert den Token aus `Bearer <token>`
///
/// Genau ein Leerzeichen-Zeichen nach `Bearer`, danach ein nicht-leerer
/// Token ohne Leerraum.
fn bearer_token(header: &str) -> Option<&str> {
    let rest = header.strip_prefix("Bearer")?;
    let mut zeichen = rest.chars();
    if !zeichen.next()?.is_whitespace() {
        return None;
    }
    let token = zeichen.as_str();
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;
    use nexablog_db::{models::NeuerBenutzer, SqliteDb, UserRepository, STANDARD_FRIST};

    #[test]
    fn bearer_format() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer\tabc"), Some("abc"));
        assert_eq!(bearer_token("Bearer  abc"), None);
        assert_eq!(bearer_token("Bearer abc def"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(bearer_token("Bearerabc"), None);
    }

    async fn setup() -> (AuthPipeline, TokenAussteller, nexablog_core::UserId) {
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
        let tokens = TokenAussteller::neu(Arc::new(db), STANDARD_FRIST);
        (AuthPipeline::neu(tokens.clone()), tokens, user.id)
    }

    #[tokio::test]
    async fn ohne_header_anonym() {
        let (pipeline, _, _) = setup().await;
        assert_eq!(pipeline.authentifizieren(None).await.unwrap(), Identitaet::Anonym);
        assert_eq!(
            pipeline.authentifizieren(Some("  \t")).await.unwrap(),
            Identitaet::Anonym
        );
    }

    #[tokio::test]
    async fn fehlerhafter_und_unbekannter_token_gleich() {
        let (pipeline, _, _) = setup().await;

        let fehlerhaft = pipeline.authentifizieren(Some("Token abc")).await.unwrap_err();
        let unbekannt = pipeline
            .authentifizieren(Some("Bearer gibtesnicht"))
            .await
            .unwrap_err();

        assert!(matches!(fehlerhaft, AuthError::TokenUngueltig));
        assert!(matches!(unbekannt, AuthError::TokenUngueltig));
    }

    #[tokio::test]
    async fn gueltiger_token_ergibt_benutzer() {
        let (pipeline, tokens, id) = setup().await;
        let token = tokens
            .ausstellen(id, TokenScope::Authentication, Duration::hours(1))
            .await
            .unwrap();

        let identitaet = pipeline
            .authentifizieren(Some(&format!("Bearer {}", token.klartext)))
            .await
            .unwrap();
        assert!(identitaet.ist_besitzer(id));
    }
}
