//! Equipment service

use crate::{
    error::AppResult,
    models::{
        enums::EquipmentState,
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        user::Actor,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    audit: AuditService,
}

impl EquipmentService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    pub async fn list(&self, department_id: Option<i32>) -> AppResult<Vec<Equipment>> {
        match department_id {
            Some(dep) => self.repository.equipment.list_by_department(dep).await,
            None => self.repository.equipment.list().await,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, actor: &Actor, data: &CreateEquipment) -> AppResult<Equipment> {
        let state = match &data.state {
            Some(s) => EquipmentState::require_valid(s)?.as_str(),
            None => EquipmentState::Optimal.as_str(),
        };
        let equipment = self.repository.equipment.create(data, state).await?;
        self.audit
            .record(
                actor,
                "Create equipment",
                &format!("Equipment {}", equipment.internal_code),
                "equipment",
            )
            .await;
        Ok(equipment)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        mut data: UpdateEquipment,
    ) -> AppResult<Equipment> {
        // Manual state edits go through the same canonical labels the
        // synchronizer writes
        if let Some(ref s) = data.state {
            data.state = Some(EquipmentState::require_valid(s)?.as_str().to_string());
        }
        let equipment = self.repository.equipment.update(id, &data).await?;
        self.audit
            .record(
                actor,
                "Edit equipment",
                &format!("Equipment {}", equipment.internal_code),
                "equipment",
            )
            .await;
        Ok(equipment)
    }

    pub async fn delete(&self, actor: &Actor, id: i32) -> AppResult<()> {
        let equipment = self.repository.equipment.get_by_id(id).await?;
        self.repository.equipment.delete(id).await?;
        self.audit
            .record(
                actor,
                "Delete equipment",
                &format!("Equipment {}", equipment.internal_code),
                "equipment",
            )
            .await;
        Ok(())
    }
}
