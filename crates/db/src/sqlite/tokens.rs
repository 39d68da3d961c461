//! SQLite-Implementierung des TokenRepository
//!
//! Gespeichert wird ausschliesslich der SHA-256-Digest des Tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{BenutzerRecord, NeuerToken, TokenScope};
use crate::repository::{DbResult, TokenRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::users::row_to_benutzer;
use crate::sqlite::zeit_zu_text;

#[async_trait]
impl TokenRepository for SqliteDb {
    async fn create(&self, data: NeuerToken<'_>) -> DbResult<()> {
        sqlx::query("INSERT INTO tokens (hash, user_id, expires_at, scope) VALUES (?, ?, ?, ?)")
            .bind(data.hash)
            .bind(data.user_id.inner())
            .bind(zeit_zu_text(data.expires_at))
            .bind(data.scope.als_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_user_by_token(
        &self,
        hash: &[u8],
        scope: TokenScope,
        jetzt: DateTime<Utc>,
    ) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT u.id, u.username, u.email, u.password_hash, u.version, u.created_at
             FROM users u
             INNER JOIN tokens t ON t.user_id = u.id
             WHERE t.hash = ? AND t.scope = ? AND t.expires_at > ?",
        )
        .bind(hash)
        .bind(scope.als_str())
        .bind(zeit_zu_text(jetzt))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn delete_expired(&self, jetzt: DateTime<Utc>) -> DbResult<u64> {
        let geloescht = sqlx::query("DELETE FROM tokens WHERE expires_at <= ?")
            .bind(zeit_zu_text(jetzt))
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(geloescht)
    }
}
