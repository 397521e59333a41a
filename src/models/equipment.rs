//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Internal inventory code (unique per department)
    pub internal_code: String,
    pub description: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    /// Current operational state label (optimal/defective/inoperative).
    /// Kept in sync with the latest maintenance event's resulting state.
    pub state: String,
    pub created_date: NaiveDate,
    /// Owning department; unassigned equipment exists
    pub department_id: Option<i32>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 100))]
    pub internal_code: String,
    #[validate(length(min = 1, max = 300))]
    pub description: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    /// Defaults to "optimal" when omitted
    pub state: Option<String>,
    pub department_id: Option<i32>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 100))]
    pub internal_code: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub description: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub department_id: Option<i32>,
}
