//! Analytics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Equipment counts by current operational state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StateDistribution {
    pub optimal: i64,
    pub defective: i64,
    pub inoperative: i64,
}

/// Equipment counts by maintenance-history trajectory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrajectorySummary {
    /// Equipment whose latest improving repair is recent
    pub improved: i64,
    /// Remainder of the whole roster, including never-serviced equipment
    pub unchanged: i64,
    /// Equipment whose history degraded
    pub worsened: i64,
}

/// Per-department state distribution card
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentStateStats {
    pub department_id: i32,
    pub department_name: String,
    pub states: StateDistribution,
}

/// Analytics dashboard payload
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    /// Organization-wide distribution of current states
    pub states: StateDistribution,
    /// Organization-wide trajectory summary
    pub trajectories: TrajectorySummary,
    /// Per-department distributions, hierarchy order; unassigned equipment
    /// and departments without equipment are absent
    pub departments: Vec<DepartmentStateStats>,
}

/// Get organization analytics
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment state and trajectory analytics", body = AnalyticsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_analytics(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<AnalyticsResponse>> {
    let analytics = state.services.analytics.overview().await?;
    Ok(Json(analytics))
}
