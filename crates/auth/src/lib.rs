//! nexablog-auth – Auth- und Permission-Service
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Bearer-Tokens (zufaellig, nur SHA-256-Digest gespeichert)
//! - PermissionService (Code-basierte Berechtigungen)
//! - AuthPipeline (Authorization-Header → Identitaet)
//! - AuthService (Registrierung, Anmeldung)

pub mod error;
pub mod identitaet;
pub mod password;
pub mod permission_service;
pub mod pipeline;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use identitaet::Identitaet;
pub use password::{Argon2Kosten, PasswortHasher};
pub use permission_service::{codes, Berechtigungen, PermissionService};
pub use pipeline::AuthPipeline;
pub use service::{AuthService, Registrierung};
pub use token::{AusgestellterToken, TokenAussteller};
