//! nexablog-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit. Die Services kennen
//! nur die Traits aus [`repository`]; [`SqliteDb`] ist die einzige
//! Implementierung. Migrationen liegen unter `migrations/` und laufen beim
//! Oeffnen des Pools.

pub mod error;
pub mod frist;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use frist::{mit_frist, STANDARD_FRIST};
pub use repository::{
    DatabaseConfig, DbResult, PermissionRepository, PostRepository, TokenRepository,
    UserRepository,
};
pub use sqlite::SqliteDb;
