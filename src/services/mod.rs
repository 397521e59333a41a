//! Business logic services

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod bootstrap;
pub mod departments;
pub mod equipment;
pub mod maintenance;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub departments: departments::DepartmentsService,
    pub equipment: equipment::EquipmentService,
    pub maintenance: maintenance::MaintenanceService,
    pub analytics: analytics::AnalyticsService,
    pub audit: audit::AuditService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let audit = audit::AuditService::new(repository.clone());
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, audit.clone()),
            departments: departments::DepartmentsService::new(repository.clone(), audit.clone()),
            equipment: equipment::EquipmentService::new(repository.clone(), audit.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone(), audit.clone()),
            analytics: analytics::AnalyticsService::new(repository.clone()),
            audit,
            repository,
        }
    }

    /// Database connectivity probe for the readiness endpoint
    pub async fn ping_database(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        Ok(())
    }
}
