//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// EquipmentState
// ---------------------------------------------------------------------------

/// Operational state of an equipment item.
///
/// Stored as a text label. Writes only accept the three canonical labels;
/// reads normalize anything else to `Optimal` so that analytics stays total
/// over whatever the store contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentState {
    Optimal,
    Defective,
    Inoperative,
}

impl EquipmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentState::Optimal => "optimal",
            EquipmentState::Defective => "defective",
            EquipmentState::Inoperative => "inoperative",
        }
    }

    /// Strict parse of a canonical label (case-insensitive)
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "optimal" => Some(EquipmentState::Optimal),
            "defective" => Some(EquipmentState::Defective),
            "inoperative" => Some(EquipmentState::Inoperative),
            _ => None,
        }
    }

    /// Defensive read: unknown or blank labels count as `Optimal`
    pub fn normalize(label: &str) -> Self {
        Self::parse(label).unwrap_or(EquipmentState::Optimal)
    }

    /// Rank used to compare states: higher is better
    pub fn rank(&self) -> u8 {
        match self {
            EquipmentState::Optimal => 2,
            EquipmentState::Defective => 1,
            EquipmentState::Inoperative => 0,
        }
    }

    /// Validate a state label supplied on a write path
    pub fn require_valid(label: &str) -> Result<Self, AppError> {
        Self::parse(label)
            .ok_or_else(|| AppError::Validation(format!("Invalid equipment state '{}'", label)))
    }
}

impl std::fmt::Display for EquipmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User role codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_unknown_labels_to_optimal() {
        assert_eq!(EquipmentState::normalize("defective"), EquipmentState::Defective);
        assert_eq!(EquipmentState::normalize("INOPERATIVE"), EquipmentState::Inoperative);
        assert_eq!(EquipmentState::normalize("unknown_value"), EquipmentState::Optimal);
        assert_eq!(EquipmentState::normalize(""), EquipmentState::Optimal);
    }

    #[test]
    fn rank_orders_states() {
        assert!(EquipmentState::Optimal.rank() > EquipmentState::Defective.rank());
        assert!(EquipmentState::Defective.rank() > EquipmentState::Inoperative.rank());
    }
}
