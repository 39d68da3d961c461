//! Axum-Extraktoren fuer Identitaet und JSON-Bodies

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

use nexablog_auth::{codes, Identitaet};
use nexablog_db::models::BenutzerRecord;

use crate::error::ApiFehler;
use crate::state::AppState;

/// Identitaet des Aufrufers, anonym oder angemeldet
#[derive(Debug, Clone)]
pub struct Aufrufer(pub Identitaet);

#[async_trait]
impl<S> FromRequestParts<S> for Aufrufer
where
    S: Send + Sync,
{
    type Rejection = ApiFehler;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Fehlt die Extension, ist die Auth-Middleware nicht montiert
        parts
            .extensions
            .get::<Identitaet>()
            .cloned()
            .map(Aufrufer)
            .ok_or_else(|| ApiFehler::Intern("Identitaet fehlt in den Request-Extensions".into()))
    }
}

/// Angemeldeter Benutzer; anonyme Aufrufer erhalten 401
#[derive(Debug, Clone)]
pub struct AuthBenutzer(pub BenutzerRecord);

#[async_trait]
impl<S> FromRequestParts<S> for AuthBenutzer
where
    S: Send + Sync,
{
    type Rejection = ApiFehler;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Aufrufer(identitaet) = Aufrufer::from_request_parts(parts, state).await?;
        let benutzer = identitaet.benutzer()?.clone();
        Ok(AuthBenutzer(benutzer))
    }
}

/// Angemeldeter Aufrufer mit `posts:write`
///
/// Steht in schreibenden Handlern vor dem Body-Extraktor, damit 401/403
/// feststehen, bevor der Body gelesen wird.
#[derive(Debug, Clone)]
pub struct Schreibrecht(pub Identitaet);

#[async_trait]
impl FromRequestParts<AppState> for Schreibrecht {
    type Rejection = ApiFehler;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Aufrufer(identitaet) = Aufrufer::from_request_parts(parts, state).await?;
        state
            .berechtigungen
            .erfordern(&identitaet, codes::POSTS_WRITE)
            .await?;
        Ok(Schreibrecht(identitaet))
    }
}

/// JSON-Body mit einheitlichem Fehlerformat (422 statt axums Klartext)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiFehler))]
pub struct JsonEingabe<T>(pub T);
