//! Identitaet einer Anfrage
//!
//! Jede Anfrage traegt genau eine Identitaet: anonym oder ein ueber Token
//! aufgeloester Benutzer.

use nexablog_core::UserId;
use nexablog_db::models::BenutzerRecord;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identitaet {
    /// Anfrage ohne Credential
    Anonym,
    Benutzer(BenutzerRecord),
}

impl Identitaet {
    pub fn ist_anonym(&self) -> bool {
        matches!(self, Self::Anonym)
    }

    /// Authentifizierter Benutzer oder `AuthError::NichtAuthentifiziert`
    pub fn benutzer(&self) -> AuthResult<&BenutzerRecord> {
        match self {
            Self::Anonym => Err(AuthError::NichtAuthentifiziert),
            Self::Benutzer(b) => Ok(b),
        }
    }

    /// `true` wenn die Identitaet der Besitzer der Ressource ist
    ///
    /// Anonym besitzt nie etwas.
    pub fn ist_besitzer(&self, besitzer: UserId) -> bool {
        match self {
            Self::Anonym => false,
            Self::Benutzer(b) => b.id == besitzer,
        }
    }
}
