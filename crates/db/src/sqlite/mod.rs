//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod permissions_repo;
pub mod pool;
pub mod posts;
pub mod tokens;
pub mod users;

pub use pool::SqliteDb;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DbError;
use crate::repository::DbResult;

/// Zeitstempel als RFC-3339-Text fester Breite (Mikrosekunden, `Z`)
///
/// Die feste Breite macht den Textvergleich in SQL chronologisch.
pub(crate) fn zeit_zu_text(zeit: DateTime<Utc>) -> String {
    zeit.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn text_zu_zeit(feld: &str, text: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltiges {feld} '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn zeittext_feste_breite_und_sortierbar() {
        let frueh = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let spaet = frueh + Duration::microseconds(1);
        let a = zeit_zu_text(frueh);
        let b = zeit_zu_text(spaet);
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(a, "2024-01-01T09:00:00.000000Z");
        assert_eq!(text_zu_zeit("created_at", &a).unwrap(), frueh);
    }

    #[test]
    fn ungueltiger_zeittext() {
        assert!(text_zu_zeit("created_at", "gestern").is_err());
    }
}
