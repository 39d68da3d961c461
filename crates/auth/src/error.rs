//! Fehlertypen fuer den Auth-Service

use std::collections::BTreeMap;

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("Ungueltige Eingabe")]
    Validierung(BTreeMap<String, String>),

    // --- Passwort ---
    /// Details werden geloggt, nie nach aussen gegeben
    #[error("Passwort-Hashing fehlgeschlagen")]
    PasswortHashing,

    // --- Authentifizierung ---
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    /// Fehlerhafter, unbekannter, abgelaufener oder falsch gescopter Token
    #[error("Token ungueltig")]
    TokenUngueltig,

    #[error("Authentifizierung erforderlich")]
    NichtAuthentifiziert,

    // --- Berechtigungen ---
    #[error("Zugriff verweigert: Berechtigung '{0}' fehlt")]
    ZugriffVerweigert(String),

    // --- Benutzerverwaltung ---
    #[error("E-Mail bereits vergeben: {0}")]
    EmailVergeben(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] nexablog_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
