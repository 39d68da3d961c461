//! Gemeinsame Helfer fuer die API-Integrationstests

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use nexablog_api::{ApiServer, ApiServerKonfig, AppState};
use nexablog_auth::{Argon2Kosten, PasswortHasher};
use nexablog_db::{SqliteDb, STANDARD_FRIST};

/// Billige Argon2-Parameter, damit die Tests schnell bleiben
fn test_hasher() -> PasswortHasher {
    PasswortHasher::neu(Argon2Kosten {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

pub async fn test_state() -> AppState {
    let db = SqliteDb::in_memory().await.unwrap();
    AppState::aufbauen(db, test_hasher(), chrono::Duration::hours(24), STANDARD_FRIST)
}

pub async fn test_app() -> Router {
    ApiServer::neu(ApiServerKonfig::default()).app(test_state().await)
}

pub struct TestServer {
    pub url: String,
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Startet den kompletten Server auf einem freien Port
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = test_state().await;

        tokio::spawn(async move {
            ApiServer::neu(ApiServerKonfig::default())
                .starten(listener, state, std::future::pending())
                .await
                .unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            addr,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, pfad: &str) -> String {
        format!("{}{}", self.url, pfad)
    }

    /// Registriert einen Benutzer und liefert dessen Token
    pub async fn benutzer_mit_token(&self, name: &str) -> (Value, String) {
        let email = format!("{name}@example.com");
        let res = self
            .client
            .post(self.url("/users"))
            .json(&json!({ "username": name, "email": email, "password": "geheim123" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
        let user: Value = res.json().await.unwrap();

        let res = self
            .client
            .post(self.url("/tokens/authenticate"))
            .json(&json!({ "email": email, "password": "geheim123" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
        let token: Value = res.json().await.unwrap();

        (user, token["token"].as_str().unwrap().to_string())
    }
}
