//! Fehlertypen fuer das Beitrags-Crate

use std::collections::BTreeMap;

use thiserror::Error;

use nexablog_core::PostId;

/// Beitrags-Fehlertypen
#[derive(Debug, Error)]
pub enum BeitragError {
    #[error("Ungueltige Eingabe")]
    Validierung(BTreeMap<String, String>),

    #[error("Beitrag nicht gefunden: {0}")]
    NichtGefunden(PostId),

    /// Die erwartete Version stimmt nicht mehr mit der gespeicherten ueberein
    #[error("Versionskonflikt bei Beitrag {0}")]
    Konflikt(PostId),

    #[error("Nur der Autor darf Beitrag {0} aendern")]
    KeinBesitzer(PostId),

    /// Fehlende Authentifizierung oder Berechtigung
    #[error(transparent)]
    Auth(#[from] nexablog_auth::AuthError),

    #[error("Datenbank-Fehler: {0}")]
    Datenbank(#[from] nexablog_db::DbError),
}

pub type BeitragResult<T> = Result<T, BeitragError>;
