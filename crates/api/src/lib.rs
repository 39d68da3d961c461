//! nexablog-api – REST-Schnittstelle (Axum)
//!
//! Bildet HTTP-Anfragen auf AuthService und BeitragService ab. Die
//! Identitaet des Aufrufers wird pro Anfrage von einer Middleware bestimmt
//! und ueber Request-Extensions an die Handler gereicht.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

// Bequeme Re-Exporte
pub use error::{ApiFehler, ApiResult};
pub use server::{ApiServer, ApiServerKonfig, MAX_BODY_BYTES};
pub use state::AppState;
