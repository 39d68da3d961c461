//! HTTP-Fehler der REST-Schnittstelle
//!
//! Domaenenfehler (`AuthError`, `BeitragError`) werden hier auf Statuscodes
//! abgebildet. Der Body hat immer die Form `{"detail": ...}`.

use std::any::Any;
use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use nexablog_auth::AuthError;
use nexablog_posts::BeitragError;

/// Fehler, die ein Handler als Antwort zurueckgeben kann
#[derive(Debug, Error)]
pub enum ApiFehler {
    /// Feldweise Validierungsfehler (422)
    #[error("Ungueltige Eingabe")]
    Validierung(BTreeMap<String, String>),

    /// Body oder Header nicht lesbar, etwa kaputtes JSON oder unbekannte Felder (422)
    #[error("{0}")]
    UngueltigeAnfrage(String),

    #[error("Anfrage zu gross")]
    ZuGross,

    #[error("{0}")]
    NichtAuthentifiziert(String),

    #[error("{0}")]
    Verboten(String),

    #[error("{0}")]
    NichtGefunden(String),

    #[error("{0}")]
    Konflikt(String),

    #[error("Zeitlimit der Anfrage ueberschritten")]
    Zeitlimit,

    /// Wird geloggt, nach aussen nur generisch
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl ApiFehler {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validierung(_) | Self::UngueltigeAnfrage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ZuGross => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NichtAuthentifiziert(_) => StatusCode::UNAUTHORIZED,
            Self::Verboten(_) => StatusCode::FORBIDDEN,
            Self::NichtGefunden(_) => StatusCode::NOT_FOUND,
            Self::Konflikt(_) => StatusCode::CONFLICT,
            Self::Zeitlimit => StatusCode::REQUEST_TIMEOUT,
            Self::Intern(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn nicht_gefunden() -> Self {
        Self::NichtGefunden("Ressource nicht gefunden".into())
    }
}

impl IntoResponse for ApiFehler {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::Validierung(felder) => json!(felder),
            Self::Intern(msg) => {
                tracing::error!(fehler = %msg, "Interner Fehler bei der Anfragebearbeitung");
                json!("Interner Serverfehler")
            }
            other => json!(other.to_string()),
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AuthError> for ApiFehler {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validierung(felder) => Self::Validierung(felder),
            AuthError::UngueltigeAnmeldedaten
            | AuthError::TokenUngueltig
            | AuthError::NichtAuthentifiziert => Self::NichtAuthentifiziert(e.to_string()),
            AuthError::ZugriffVerweigert(_) => Self::Verboten(e.to_string()),
            AuthError::EmailVergeben(_) => {
                Self::Konflikt("E-Mail-Adresse ist bereits vergeben".into())
            }
            AuthError::PasswortHashing | AuthError::Datenbank(_) | AuthError::Intern(_) => {
                Self::Intern(e.to_string())
            }
        }
    }
}

impl From<BeitragError> for ApiFehler {
    fn from(e: BeitragError) -> Self {
        match e {
            BeitragError::Validierung(felder) => Self::Validierung(felder),
            BeitragError::NichtGefunden(_) => Self::nicht_gefunden(),
            BeitragError::Konflikt(_) => Self::Konflikt(
                "Beitrag wurde zwischenzeitlich geaendert, bitte erneut laden".into(),
            ),
            BeitragError::KeinBesitzer(_) => Self::Verboten(e.to_string()),
            BeitragError::Auth(auth) => auth.into(),
            BeitragError::Datenbank(_) => Self::Intern(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiFehler {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::ZuGross;
        }
        Self::UngueltigeAnfrage(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiFehler>;

/// Antwort fuer einen abgefangenen Panic im Handler
pub fn panik_antwort(_panik: Box<dyn Any + Send + 'static>) -> Response {
    ApiFehler::Intern("Panic bei der Anfragebearbeitung".into()).into_response()
}

/// Ersetzt die leere 408 des Timeout-Layers durch einen `detail`-Body
pub async fn zeitlimit_als_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Anfrage wegen Zeitlimit abgebrochen");
        return ApiFehler::Zeitlimit.into_response();
    }
    response
}
