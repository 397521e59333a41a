//! Department model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Department record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    /// Display name (de-duplicated at startup, not unique at schema level)
    pub name: String,
    pub active: bool,
}

/// Create department request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Update department request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub active: Option<bool>,
}
