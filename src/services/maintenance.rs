//! Maintenance service
//!
//! Owns the equipment state synchronizer: every maintenance create or edit
//! that declares a resulting state brings the owning equipment's current
//! state in line with it. The event row and the equipment row are written in
//! one transaction (see the repository).

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentState,
        equipment::Equipment,
        maintenance::{
            CreateMaintenanceEvent, MaintenanceDetails, MaintenanceEvent, MaintenanceWrite,
            UpdateMaintenanceEvent,
        },
        user::Actor,
    },
    repository::Repository,
    services::audit::AuditService,
};

/// State that must be copied onto the equipment, if any.
///
/// A blank or absent resulting state marks an informational record and never
/// triggers a sync; a state equal to the equipment's current one needs no
/// write, which makes the synchronizer idempotent.
fn pending_state_sync(current_state: &str, resulting_state: Option<&str>) -> Option<EquipmentState> {
    let reported = resulting_state?.trim();
    if reported.is_empty() {
        return None;
    }
    let target = EquipmentState::parse(reported)?;
    if current_state == target.as_str() {
        None
    } else {
        Some(target)
    }
}

/// Parse an ISO date off a write request
fn parse_event_date(raw: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid event_date '{}'", s))),
    }
}

/// Canonicalize a resulting state off a write request: blank collapses to
/// None (informational record), anything else must be a valid label.
fn parse_resulting_state(raw: Option<&str>) -> AppResult<Option<String>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(EquipmentState::require_valid(s)?.as_str().to_string())),
    }
}

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
    audit: AuditService,
}

impl MaintenanceService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    pub async fn list(&self, department_id: Option<i32>) -> AppResult<Vec<MaintenanceDetails>> {
        self.repository.maintenance.list_details(department_id).await
    }

    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceEvent>> {
        // Surface NotFound for dangling equipment ids rather than an empty list
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.maintenance.list_by_equipment(equipment_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceEvent> {
        self.repository.maintenance.get_by_id(id).await
    }

    /// Record a maintenance event and synchronize the equipment's state
    pub async fn create(
        &self,
        actor: &Actor,
        data: &CreateMaintenanceEvent,
    ) -> AppResult<MaintenanceEvent> {
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;

        let write = MaintenanceWrite {
            equipment_id: equipment.id,
            event_date: parse_event_date(data.event_date.as_deref())?,
            description: data.description.clone(),
            resulting_state: parse_resulting_state(data.resulting_state.as_deref())?,
        };

        let synced = pending_state_sync(&equipment.state, write.resulting_state.as_deref());
        let event = self
            .repository
            .maintenance
            .create(&write, synced.map(|s| s.as_str()))
            .await?;

        self.audit_sync(actor, &equipment, synced).await;
        self.audit
            .record(
                actor,
                "Create maintenance",
                &format!("Equipment {}", equipment.internal_code),
                "maintenance",
            )
            .await;

        Ok(event)
    }

    /// Edit a maintenance event and synchronize the (possibly reassigned)
    /// equipment's state
    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        data: &UpdateMaintenanceEvent,
    ) -> AppResult<MaintenanceEvent> {
        let existing = self.repository.maintenance.get_by_id(id).await?;
        let equipment_id = data.equipment_id.unwrap_or(existing.equipment_id);
        let equipment = self.repository.equipment.get_by_id(equipment_id).await?;

        let write = MaintenanceWrite {
            equipment_id: equipment.id,
            event_date: match data.event_date.as_deref() {
                Some(s) => parse_event_date(Some(s))?,
                None => existing.event_date,
            },
            description: data.description.clone().unwrap_or(existing.description),
            resulting_state: match data.resulting_state.as_deref() {
                Some(s) => parse_resulting_state(Some(s))?,
                None => existing.resulting_state,
            },
        };

        let synced = pending_state_sync(&equipment.state, write.resulting_state.as_deref());
        let event = self
            .repository
            .maintenance
            .update(id, &write, synced.map(|s| s.as_str()))
            .await?;

        self.audit_sync(actor, &equipment, synced).await;
        self.audit
            .record(
                actor,
                "Edit maintenance",
                &format!("Equipment {}", equipment.internal_code),
                "maintenance",
            )
            .await;

        Ok(event)
    }

    /// Delete a maintenance event. The equipment's state is left as-is.
    pub async fn delete(&self, actor: &Actor, id: i32) -> AppResult<()> {
        let existing = self.repository.maintenance.get_by_id(id).await?;
        self.repository.maintenance.delete(id).await?;
        self.audit
            .record(
                actor,
                "Delete maintenance",
                &format!("Event {} of equipment {}", id, existing.equipment_id),
                "maintenance",
            )
            .await;
        Ok(())
    }

    async fn audit_sync(&self, actor: &Actor, equipment: &Equipment, synced: Option<EquipmentState>) {
        if let Some(state) = synced {
            self.audit
                .record(
                    actor,
                    "Automatic state update",
                    &format!("Equipment {} now {}", equipment.internal_code, state),
                    "maintenance",
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_is_idempotent() {
        // First call moves the state, second sees the already-synced value
        assert_eq!(
            pending_state_sync("optimal", Some("defective")),
            Some(EquipmentState::Defective)
        );
        assert_eq!(pending_state_sync("defective", Some("defective")), None);
    }

    #[test]
    fn blank_resulting_state_never_syncs() {
        assert_eq!(pending_state_sync("optimal", Some("")), None);
        assert_eq!(pending_state_sync("optimal", Some("   ")), None);
        assert_eq!(pending_state_sync("optimal", None), None);
    }

    #[test]
    fn matching_state_is_a_noop() {
        assert_eq!(pending_state_sync("optimal", Some("optimal")), None);
    }

    #[test]
    fn event_date_parsing() {
        assert_eq!(parse_event_date(None).unwrap(), None);
        assert_eq!(
            parse_event_date(Some("2025-03-14")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert!(parse_event_date(Some("14/03/2025")).is_err());
    }

    #[test]
    fn resulting_state_canonicalization() {
        assert_eq!(parse_resulting_state(None).unwrap(), None);
        assert_eq!(parse_resulting_state(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_resulting_state(Some("Defective")).unwrap(),
            Some("defective".to_string())
        );
        assert!(parse_resulting_state(Some("broken")).is_err());
    }
}
