//! Ein- und Ausgabetypen des Beitrags-Service

use serde::Deserialize;

use nexablog_core::validierung::{nicht_leer, Validator};

use crate::error::{BeitragError, BeitragResult};

/// Titel und Inhalt eines Beitrags (Anlage und Update)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeitragEingabe {
    pub title: String,
    pub body: String,
}

impl BeitragEingabe {
    pub fn validieren(&self) -> BeitragResult<()> {
        let mut v = Validator::neu();
        v.pruefen(nicht_leer(&self.title), "title", "darf nicht leer sein");
        v.pruefen(nicht_leer(&self.body), "body", "darf nicht leer sein");
        v.ergebnis().map_err(BeitragError::Validierung)
    }
}
