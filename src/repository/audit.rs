//! Audit trail repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::audit::AuditEntry};

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Postgres>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an audit entry
    pub async fn insert(
        &self,
        user_id: Option<i32>,
        action: &str,
        description: &str,
        module: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO audit_log (user_id, action, description, module) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(action)
        .bind(description)
        .bind(module)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List the most recent entries, newest first
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query_as::<_, AuditEntry>(
            r#"
            SELECT a.id, a.user_id, u.username, a.action, a.description, a.module, a.created_at
            FROM audit_log a
            LEFT JOIN users u ON a.user_id = u.id
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Purge entries older than the retention window, returning the count
    pub async fn purge_older_than_days(&self, days: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM audit_log WHERE created_at < NOW() - make_interval(days => $1)",
        )
        .bind(days as i32)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
