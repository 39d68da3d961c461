//! Route-Definitionen fuer die REST-API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, state::AppState};

/// Erstellt den vollstaendigen Router (ohne Layer)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index::willkommen))
        .route("/health", get(handlers::index::health))
        // Benutzer
        .route("/users", post(handlers::users::registrieren))
        .route("/users/me", get(handlers::users::ich))
        // Tokens
        .route(
            "/tokens/authenticate",
            post(handlers::tokens::authentifizieren),
        )
        // Beitraege
        .route(
            "/posts",
            get(handlers::posts::liste).post(handlers::posts::erstellen),
        )
        .route(
            "/posts/:id",
            get(handlers::posts::laden)
                .put(handlers::posts::aktualisieren)
                .delete(handlers::posts::loeschen),
        )
}
