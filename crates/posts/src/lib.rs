//! nexablog-posts – Blog-Beitraege
//!
//! Dieses Crate implementiert den BeitragService: Anlage, Abruf,
//! Aktualisierung mit Versionspruefung und Loeschen. Schreibende
//! Operationen pruefen Authentifizierung, Berechtigung und Autorenschaft.

pub mod error;
pub mod service;
pub mod types;


// Bequeme Re-Exporte
pub use error::{BeitragError, BeitragResult};
pub use service::BeitragService;
pub use types::BeitragEingabe;
