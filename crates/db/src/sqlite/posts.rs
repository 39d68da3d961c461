//! SQLite-Implementierung des PostRepository

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::Row as _;

use nexablog_core::{PostId, UserId};

use crate::error::DbError;
use crate::models::{BeitragAenderung, BeitragRecord, NeuerBeitrag};
use crate::repository::{DbResult, PostRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::{text_zu_zeit, zeit_zu_text};

const BEITRAG_SPALTEN: &str = "id, title, body, author_id, version, created_at";

#[async_trait]
impl PostRepository for SqliteDb {
    async fn create(&self, data: NeuerBeitrag<'_>) -> DbResult<BeitragRecord> {
        let now = Utc::now().trunc_subsecs(6);
        let sql = format!(
            "INSERT INTO posts (title, body, author_id, version, created_at)
             VALUES (?, ?, ?, 1, ?)
             RETURNING {BEITRAG_SPALTEN}"
        );

        let row = sqlx::query(&sql)
            .bind(data.title)
            .bind(data.body)
            .bind(data.author_id.inner())
            .bind(zeit_zu_text(now))
            .fetch_one(&self.pool)
            .await?;

        row_to_beitrag(&row)
    }

    async fn list(&self) -> DbResult<Vec<BeitragRecord>> {
        let sql = format!("SELECT {BEITRAG_SPALTEN} FROM posts ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_beitrag).collect()
    }

    async fn get_by_id(&self, id: PostId) -> DbResult<Option<BeitragRecord>> {
        let sql = format!("SELECT {BEITRAG_SPALTEN} FROM posts WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.inner())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_beitrag(&r)).transpose()
    }

    async fn list_by_author(&self, author_id: UserId) -> DbResult<Vec<BeitragRecord>> {
        let sql = format!("SELECT {BEITRAG_SPALTEN} FROM posts WHERE author_id = ? ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(author_id.inner())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_beitrag).collect()
    }

    async fn update(
        &self,
        id: PostId,
        version: i64,
        data: BeitragAenderung<'_>,
    ) -> DbResult<BeitragRecord> {
        let sql = format!(
            "UPDATE posts SET title = ?, body = ?, version = version + 1
             WHERE id = ? AND version = ?
             RETURNING {BEITRAG_SPALTEN}"
        );

        let row = sqlx::query(&sql)
            .bind(data.title)
            .bind(data.body)
            .bind(id.inner())
            .bind(version)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => row_to_beitrag(&r),
            None => {
                // Keine Zeile getroffen: veraltete Version oder geloeschter Beitrag
                let existiert: Option<i64> =
                    sqlx::query_scalar("SELECT version FROM posts WHERE id = ?")
                        .bind(id.inner())
                        .fetch_optional(&self.pool)
                        .await?;
                match existiert {
                    Some(aktuell) => Err(DbError::konflikt(format!(
                        "Beitrag {id}: erwartet Version {version}, gespeichert {aktuell}"
                    ))),
                    None => Err(DbError::nicht_gefunden(format!("Beitrag {id}"))),
                }
            }
        }
    }

    async fn delete(&self, id: PostId) -> DbResult<()> {
        let affected = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Beitrag {id}")));
        }
        Ok(())
    }
}

fn row_to_beitrag(row: &sqlx::sqlite::SqliteRow) -> DbResult<BeitragRecord> {
    let created_at: String = row.try_get("created_at")?;

    Ok(BeitragRecord {
        id: PostId(row.try_get("id")?),
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        author_id: UserId(row.try_get("author_id")?),
        version: row.try_get("version")?,
        created_at: text_zu_zeit("created_at", &created_at)?,
    })
}
