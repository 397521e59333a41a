//! Maintenance event model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Maintenance event record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceEvent {
    pub id: i32,
    pub equipment_id: i32,
    /// Service date; may be back- or post-dated by the user
    pub event_date: Option<NaiveDate>,
    pub description: String,
    /// State the equipment was left in. A missing value marks an
    /// informational record that does not change the equipment's state.
    pub resulting_state: Option<String>,
}

/// Maintenance event with its equipment context, for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceDetails {
    pub id: i32,
    pub equipment_id: i32,
    pub event_date: Option<NaiveDate>,
    pub description: String,
    pub resulting_state: Option<String>,
    pub equipment_code: String,
    pub equipment_description: String,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
}

/// Create maintenance event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceEvent {
    pub equipment_id: i32,
    /// ISO 8601 date; defaults to today when omitted
    pub event_date: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    /// Omit or send blank for an informational-only record
    pub resulting_state: Option<String>,
}

/// Update maintenance event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenanceEvent {
    pub equipment_id: Option<i32>,
    pub event_date: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    pub resulting_state: Option<String>,
}

/// Validated, fully-resolved maintenance fields ready for persistence.
/// Built by the service from a create request, or by merging an update
/// request over the existing row.
#[derive(Debug, Clone)]
pub struct MaintenanceWrite {
    pub equipment_id: i32,
    pub event_date: Option<NaiveDate>,
    pub description: String,
    pub resulting_state: Option<String>,
}
