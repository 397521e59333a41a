//! Audit trail service
//!
//! Writes are fire-and-forget: a failed audit insert must never break the
//! operation being audited, so failures are logged and swallowed here.

use crate::{
    error::AppResult,
    models::{audit::AuditEntry, user::Actor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record an action on behalf of the given actor, best-effort
    pub async fn record(&self, actor: &Actor, action: &str, description: &str, module: &str) {
        if let Err(e) = self
            .repository
            .audit
            .insert(actor.user_id, action, description, module)
            .await
        {
            tracing::warn!(
                action,
                module,
                actor = %actor.username,
                "audit write failed: {e}"
            );
        }
    }

    /// List the most recent entries, newest first. Limit defaults to 50,
    /// clamped to 1..=1000.
    pub async fn list_recent(&self, limit: Option<i64>) -> AppResult<Vec<AuditEntry>> {
        let limit = limit.unwrap_or(50).clamp(1, 1000);
        self.repository.audit.list_recent(limit).await
    }

    /// Drop entries older than the retention window, best-effort
    pub async fn purge_expired(&self, retention_days: i64) {
        match self
            .repository
            .audit
            .purge_older_than_days(retention_days)
            .await
        {
            Ok(purged) if purged > 0 => {
                tracing::info!(purged, retention_days, "purged expired audit entries");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("audit purge failed: {e}"),
        }
    }
}
