//! Auth-Service fuer nexablog
//!
//! Registrierung und Anmeldung. Argon2 ist bewusst teuer und laeuft daher
//! in `spawn_blocking`, damit der Executor nicht blockiert.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use nexablog_core::validierung::{gueltige_email, nicht_leer, Validator};
use nexablog_db::{
    mit_frist,
    models::{BenutzerRecord, NeuerBenutzer, TokenScope},
    UserRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::PasswortHasher,
    permission_service::{codes, PermissionService},
    token::{AusgestellterToken, TokenAussteller},
};

/// Mindestlaenge fuer Passwoerter (in Zeichen)
pub const PASSWORT_MIN_LAENGE: usize = 8;

/// Eingabe fuer die Registrierung
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Registrierung {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registrierung {
    /// Prueft die Eingabe; pro Feld gewinnt die erste Meldung
    pub fn validieren(&self) -> AuthResult<()> {
        let mut v = Validator::neu();
        v.pruefen(nicht_leer(&self.username), "username", "darf nicht leer sein");
        v.pruefen(nicht_leer(&self.email), "email", "darf nicht leer sein");
        v.pruefen(nicht_leer(&self.password), "password", "darf nicht leer sein");
        v.pruefen(
            gueltige_email(&self.email),
            "email",
            "muss eine gueltige E-Mail-Adresse sein",
        );
        // Gezaehlt werden Zeichen, nicht UTF-8-Bytes
        v.pruefen(
            self.password.chars().count() >= PASSWORT_MIN_LAENGE,
            "password",
            "muss mindestens 8 Zeichen lang sein",
        );
        v.ergebnis().map_err(AuthError::Validierung)
    }
}

/// Auth-Service – zentraler Einstiegspunkt fuer Registrierung und Anmeldung
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswortHasher,
    tokens: TokenAussteller,
    berechtigungen: PermissionService,
    token_ttl: chrono::Duration,
    frist: Duration,
}

impl AuthService {
    pub fn neu(
        users: Arc<dyn UserRepository>,
        hasher: PasswortHasher,
        tokens: TokenAussteller,
        berechtigungen: PermissionService,
        token_ttl: chrono::Duration,
        frist: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            berechtigungen,
            token_ttl,
            frist,
        }
    }

    /// Registriert einen neuen Benutzer mit den Standard-Berechtigungen
    ///
    /// Doppelte E-Mail ergibt `AuthError::EmailVergeben`. Anlage und
    /// Berechtigungsvergabe laufen nacheinander, nicht in einer Transaktion.
    pub async fn registrieren(&self, eingabe: &Registrierung) -> AuthResult<BenutzerRecord> {
        eingabe.validieren()?;

        let passwort_hash = self.hashen(eingabe.password.clone()).await?;

        let benutzer = mit_frist(
            self.frist,
            self.users.create(NeuerBenutzer {
                username: &eingabe.username,
                email: &eingabe.email,
                password_hash: &passwort_hash,
            }),
        )
        .await
        .map_err(|e| match e {
            e if e.ist_eindeutigkeit() => AuthError::EmailVergeben(eingabe.email.clone()),
            e => AuthError::Datenbank(e),
        })?;

        self.berechtigungen
            .gewaehren(benutzer.id, codes::STANDARD)
            .await?;

        tracing::info!(
            user_id = %benutzer.id,
            username = %benutzer.username,
            "Neuer Benutzer registriert"
        );

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und stellt einen Token aus
    ///
    /// Unbekannte E-Mail und falsches Passwort sind nicht unterscheidbar.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<AusgestellterToken> {
        let benutzer = mit_frist(self.frist, self.users.get_by_email(email))
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        let korrekt = self
            .verifizieren(benutzer.password_hash.clone(), passwort.to_string())
            .await?;
        if !korrekt {
            tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self
            .tokens
            .ausstellen(benutzer.id, TokenScope::Authentication, self.token_ttl)
            .await?;

        tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");
        Ok(token)
    }

    async fn hashen(&self, passwort: String) -> AuthResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hashen(&passwort))
            .await
            .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
    }

    async fn verifizieren(&self, hash: String, passwort: String) -> AuthResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verifizieren(&hash, &passwort))
            .await
            .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))?
    }
}
