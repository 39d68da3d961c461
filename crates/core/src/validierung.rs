//! Feldbasierte Eingabevalidierung
//!
//! Sammelt pro Feld genau eine Fehlermeldung (die erste gewinnt). Die
//! REST-Schicht gibt die gesammelten Meldungen als Feld→Meldung-Map zurueck.

use std::collections::BTreeMap;

/// Sammelt Validierungsfehler pro Feld
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    fehler: BTreeMap<String, String>,
}

impl Validator {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Erfasst `meldung` fuer `feld` wenn `bedingung` nicht erfuellt ist
    pub fn pruefen(&mut self, bedingung: bool, feld: &str, meldung: &str) {
        if !bedingung {
            self.fehler
                .entry(feld.to_string())
                .or_insert_with(|| meldung.to_string());
        }
    }

    /// Verbraucht den Validator: `Ok(())` wenn gueltig, sonst die Fehler-Map
    pub fn ergebnis(self) -> Result<(), BTreeMap<String, String>> {
        if self.fehler.is_empty() {
            Ok(())
        } else {
            Err(self.fehler)
        }
    }
}

/// `true` wenn der Text nach dem Trimmen nicht leer ist
pub fn nicht_leer(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Einfache syntaktische Pruefung einer E-Mail-Adresse
///
/// Erwartet genau ein `@`, einen nicht-leeren lokalen Teil und eine Domain
/// mit mindestens einem Punkt. Leerzeichen sind nicht erlaubt.
pub fn gueltige_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut teile = email.split('@');
    let (Some(lokal), Some(domain), None) = (teile.next(), teile.next(), teile.next()) else {
        return false;
    };
    if lokal.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
