//! Gemeinsame Identifikationstypen fuer nexablog
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Benutzer- und Beitrags-IDs zur Compilezeit auszuschliessen. Die Werte
//! entsprechen den Integer-Primaerschluesseln der Datenbank.

use serde::{Deserialize, Serialize};

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Gibt den inneren Integer-Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Eindeutige Beitrags-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl PostId {
    /// Gibt den inneren Integer-Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }

    /// Parst eine Beitrags-ID aus einem Pfadsegment
    ///
    /// Nur positive Dezimalzahlen sind gueltig; alles andere ergibt `None`.
    pub fn parsen(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse::<i64>().ok().filter(|id| *id >= 1).map(Self)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_gueltig() {
        assert_eq!(PostId::parsen("1"), Some(PostId(1)));
        assert_eq!(PostId::parsen("4711"), Some(PostId(4711)));
    }

    #[test]
    fn post_id_ungueltig() {
        assert_eq!(PostId::parsen("0"), None);
        assert_eq!(PostId::parsen("-3"), None);
        assert_eq!(PostId::parsen("+3"), None);
        assert_eq!(PostId::parsen("abc"), None);
        assert_eq!(PostId::parsen(""), None);
        // Ueberlauf
        assert_eq!(PostId::parsen("99999999999999999999"), None);
    }

    #[test]
    fn anzeige() {
        assert_eq!(UserId(7).to_string(), "7");
        assert_eq!(PostId(12).to_string(), "12");
    }
}
