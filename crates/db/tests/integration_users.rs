//! Integration-Tests fuer UserRepository (In-Memory SQLite)

use nexablog_db::{models::NeuerBenutzer, SqliteDb, UserRepository};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn neu<'a>(username: &'a str, email: &'a str) -> NeuerBenutzer<'a> {
    NeuerBenutzer {
        username,
        email,
        password_hash: "$argon2id$v=19$platzhalter",
    }
}

#[tokio::test]
async fn benutzer_erstellen_und_laden() {
    let db = db().await;

    let user = UserRepository::create(&db, neu("alice", "alice@example.com"))
        .await
        .expect("Benutzer erstellen fehlgeschlagen");

    assert_eq!(user.username, "alice");
    assert_eq!(user.version, 1);

    let geladen = UserRepository::get_by_email(&db, "alice@example.com")
        .await
        .expect("get_by_email fehlgeschlagen")
        .expect("Benutzer sollte gefunden werden");

    assert_eq!(geladen, user);
}

#[tokio::test]
async fn benutzer_nach_email_laden() {
    let db = db().await;

    UserRepository::create(&db, neu("bob", "bob@example.com"))
        .await
        .unwrap();

    let gefunden = UserRepository::get_by_email(&db, "bob@example.com")
        .await
        .unwrap()
        .expect("Benutzer 'bob' sollte gefunden werden");
    assert_eq!(gefunden.username, "bob");

    let nicht_gefunden = UserRepository::get_by_email(&db, "niemand@example.com")
        .await
        .unwrap();
    assert!(nicht_gefunden.is_none());
}

#[tokio::test]
async fn email_ist_eindeutig() {
    let db = db().await;

    UserRepository::create(&db, neu("charlie", "charlie@example.com"))
        .await
        .unwrap();

    let err = UserRepository::create(&db, neu("charlie2", "charlie@example.com"))
        .await
        .unwrap_err();
    assert!(err.ist_eindeutigkeit());

    let anzahl: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(anzahl, 1);
}

#[tokio::test]
async fn gleicher_username_ist_erlaubt() {
    let db = db().await;

    let a = UserRepository::create(&db, neu("dave", "dave1@example.com"))
        .await
        .unwrap();
    let b = UserRepository::create(&db, neu("dave", "dave2@example.com"))
        .await
        .unwrap();
    assert_ne!(a.id, b.id);
}
