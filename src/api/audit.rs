//! Audit trail endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::audit::AuditEntry};

use super::AuthenticatedUser;

/// Audit listing query
#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditQuery {
    /// Maximum entries to return (default 50, max 1000)
    pub limit: Option<i64>,
}

/// List recent audit entries, newest first
#[utoipa::path(
    get,
    path = "/audit",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(AuditQuery),
    responses(
        (status = 200, description = "Audit entries", body = Vec<AuditEntry>),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn list_audit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<Vec<AuditEntry>>> {
    claims.require_admin()?;
    let entries = state.services.audit.list_recent(query.limit).await?;
    Ok(Json(entries))
}
