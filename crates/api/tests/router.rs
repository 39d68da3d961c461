//! Router-Tests ohne Netzwerk (tower `oneshot`)

mod common;

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use nexablog_api::{ApiServer, ApiServerKonfig, MAX_BODY_BYTES};

async fn body_json(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(pfad: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(pfad)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn willkommen_und_health() {
    let app = common::test_app().await;

    let res = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.headers()[header::VARY], "Authorization");

    let res = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "ok");
}

#[tokio::test]
async fn validierungsfehler_feldweise() {
    let app = common::test_app().await;

    let res = app
        .oneshot(json_post(
            "/users",
            r#"{"username":" ","email":"kaputt","password":"kurz"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["detail"]["username"], "darf nicht leer sein");
    assert_eq!(body["detail"]["email"], "muss eine gueltige E-Mail-Adresse sein");
    assert_eq!(body["detail"]["password"], "muss mindestens 8 Zeichen lang sein");
}

#[tokio::test]
async fn kaputte_bodies_ergeben_422() {
    let app = common::test_app().await;

    for body in [
        "",
        "{",
        r#"{"username":1,"email":"a@b.de","password":"geheim123"}"#,
        r#"{"username":"a","email":"a@b.de","password":"geheim123","admin":true}"#,
    ] {
        let res = app.clone().oneshot(json_post("/users", body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "Body: {body}");
        assert!(body_json(res).await["detail"].is_string());
    }
}

#[tokio::test]
async fn zu_grosser_body_wird_abgewiesen() {
    let app = common::test_app().await;

    let gross = format!(
        r#"{{"username":"x","email":"x@example.com","password":"{}"}}"#,
        "a".repeat(MAX_BODY_BYTES + 1)
    );
    let res = app.oneshot(json_post("/users", gross)).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body_json(res).await["detail"].is_string());
}

#[tokio::test]
async fn anonyme_schreibzugriffe_ergeben_401_vor_dem_body() {
    let app = common::test_app().await;

    let anfragen = [
        json_post("/posts", "{}"),
        json_post("/posts", "{"),
        Request::post("/posts").body(Body::from("kein json")).unwrap(),
        Request::put("/posts/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap(),
        Request::put("/posts/abc").body(Body::empty()).unwrap(),
        Request::delete("/posts/abc").body(Body::empty()).unwrap(),
        Request::delete("/posts/1").body(Body::empty()).unwrap(),
    ];
    for anfrage in anfragen {
        let beschreibung = format!("{} {}", anfrage.method(), anfrage.uri());
        let res = app.clone().oneshot(anfrage).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{beschreibung}");
        assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
        assert!(body_json(res).await["detail"].is_string());
    }
}

#[tokio::test]
async fn panik_im_handler_ergibt_json_500() {
    async fn kaputt() -> StatusCode {
        panic!("absichtlich")
    }

    let routen = Router::new().route("/kaputt", get(kaputt));
    let app = ApiServer::neu(ApiServerKonfig::default())
        .mit_layern(routen, common::test_state().await);

    let res = app
        .oneshot(Request::get("/kaputt").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await["detail"], "Interner Serverfehler");
}

#[tokio::test]
async fn zeitlimit_ergibt_json_408() {
    async fn langsam() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(5)).await;
        StatusCode::OK
    }

    let routen = Router::new().route("/langsam", get(langsam));
    let app = ApiServer::neu(ApiServerKonfig {
        request_timeout: Duration::from_millis(50),
        ..ApiServerKonfig::default()
    })
    .mit_layern(routen, common::test_state().await);

    let res = app
        .oneshot(Request::get("/langsam").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        body_json(res).await["detail"],
        "Zeitlimit der Anfrage ueberschritten"
    );
}

#[tokio::test]
async fn ungueltige_beitrags_ids_ergeben_404() {
    let app = common::test_app().await;

    for pfad in ["/posts/abc", "/posts/0", "/posts/-3", "/posts/99"] {
        let res = app
            .clone()
            .oneshot(Request::get(pfad).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "Pfad: {pfad}");
    }
}

#[tokio::test]
async fn ich_ohne_token_ergibt_401() {
    let app = common::test_app().await;

    let res = app
        .oneshot(Request::get("/users/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
}
