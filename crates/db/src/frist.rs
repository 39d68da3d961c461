//! Frist fuer einzelne Datenbankaufrufe
//!
//! Jeder Aufruf aus der Service-Schicht laeuft mit einer eigenen Frist,
//! unabhaengig vom Timeout der eingehenden HTTP-Anfrage.

use std::future::Future;
use std::time::Duration;

use crate::error::DbError;
use crate::repository::DbResult;

/// Standardfrist fuer Datenbankaufrufe
pub const STANDARD_FRIST: Duration = Duration::from_secs(3);

/// Fuehrt `fut` mit Frist aus; Ablauf ergibt `DbError::Zeitlimit`
pub async fn mit_frist<T, F>(frist: Duration, fut: F) -> DbResult<T>
where
    F: Future<Output = DbResult<T>>,
{
    match tokio::time::timeout(frist, fut).await {
        Ok(ergebnis) => ergebnis,
        Err(_) => {
            tracing::warn!(frist_ms = frist.as_millis() as u64, "Datenbankfrist ueberschritten");
            Err(DbError::Zeitlimit(frist))
        }
    }
}
