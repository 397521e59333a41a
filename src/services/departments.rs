//! Departments service

use crate::{
    error::AppResult,
    models::{
        department::{CreateDepartment, Department, UpdateDepartment},
        user::Actor,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
    audit: AuditService,
}

impl DepartmentsService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    pub async fn create(&self, actor: &Actor, data: &CreateDepartment) -> AppResult<Department> {
        let department = self.repository.departments.create(data).await?;
        self.audit
            .record(
                actor,
                "Create department",
                &format!("Department {}", department.name),
                "departments",
            )
            .await;
        Ok(department)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        data: &UpdateDepartment,
    ) -> AppResult<Department> {
        let department = self.repository.departments.update(id, data).await?;
        self.audit
            .record(
                actor,
                "Edit department",
                &format!("Department {}", department.name),
                "departments",
            )
            .await;
        Ok(department)
    }

    pub async fn delete(&self, actor: &Actor, id: i32) -> AppResult<()> {
        let department = self.repository.departments.get_by_id(id).await?;
        self.repository.departments.delete(id).await?;
        self.audit
            .record(
                actor,
                "Delete department",
                &format!("Department {}", department.name),
                "departments",
            )
            .await;
        Ok(())
    }
}
