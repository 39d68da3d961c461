//! SQLite-Implementierung des UserRepository

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::Row as _;

use nexablog_core::UserId;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::{text_zu_zeit, zeit_zu_text};

pub(crate) const BENUTZER_SPALTEN: &str = "id, username, email, password_hash, version, created_at";

#[async_trait]
impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let now = Utc::now().trunc_subsecs(6);

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash, version, created_at)
             VALUES (?, ?, ?, 1, ?)
             RETURNING id",
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(zeit_zu_text(now))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits vergeben", data.email))
            }
            other => DbError::Sqlx(other),
        })?;

        Ok(BenutzerRecord {
            id: UserId(id),
            username: data.username.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            version: 1,
            created_at: now,
        })
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {BENUTZER_SPALTEN} FROM users WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }
}

pub(crate) fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let created_at: String = row.try_get("created_at")?;

    Ok(BenutzerRecord {
        id: UserId(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        version: row.try_get("version")?,
        created_at: text_zu_zeit("created_at", &created_at)?,
    })
}
