//! Repository layer for database operations

pub mod audit;
pub mod departments;
pub mod equipment;
pub mod maintenance;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub departments: departments::DepartmentsRepository,
    pub equipment: equipment::EquipmentRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub users: users::UsersRepository,
    pub audit: audit::AuditRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            departments: departments::DepartmentsRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            audit: audit::AuditRepository::new(pool.clone()),
            pool,
        }
    }
}
