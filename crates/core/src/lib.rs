//! nexablog-core – Gemeinsame Typen und Eingabevalidierung
//!
//! Dieses Crate stellt die Bausteine bereit, die von allen anderen
//! nexablog-Crates gemeinsam genutzt werden.

pub mod types;
pub mod validierung;

// Re-Exporte fuer bequemen Zugriff
pub use types::{PostId, UserId};
pub use validierung::Validator;
