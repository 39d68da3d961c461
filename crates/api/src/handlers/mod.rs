//! REST-Handler, gruppiert nach Ressource

pub mod index;
pub mod posts;
pub mod tokens;
pub mod users;
