//! SQLite-Implementierung des PermissionRepository

use async_trait::async_trait;

use nexablog_core::UserId;

use crate::repository::{DbResult, PermissionRepository};
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl PermissionRepository for SqliteDb {
    async fn grant(&self, user_id: UserId, codes: &[&str]) -> DbResult<()> {
        if codes.is_empty() {
            return Ok(());
        }

        // Ein Statement fuer alle Codes; bestehende Zuordnungen bleiben unveraendert
        let platzhalter = vec!["?"; codes.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO users_permissions (user_id, permission_id)
             SELECT ?, id FROM permissions WHERE code IN ({platzhalter})"
        );

        let mut q = sqlx::query(&sql).bind(user_id.inner());
        for code in codes {
            q = q.bind(*code);
        }
        q.execute(&self.pool).await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> DbResult<Vec<String>> {
        let codes: Vec<String> = sqlx::query_scalar(
            "SELECT p.code
             FROM permissions p
             INNER JOIN users_permissions up ON up.permission_id = p.id
             WHERE up.user_id = ?
             ORDER BY p.code",
        )
        .bind(user_id.inner())
        .fetch_all(&self.pool)
        .await?;
        Ok(codes)
    }
}
