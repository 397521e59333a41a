//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, audit, auth, departments, equipment, health, maintenance, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SCEI API",
        version = "1.0.0",
        description = "Equipment Maintenance Tracking System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Departments
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::list_equipment_maintenance,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::get_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance,
        maintenance::delete_maintenance,
        // Analytics
        analytics::get_analytics,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Audit
        audit::list_audit,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Departments
            crate::models::department::Department,
            crate::models::department::CreateDepartment,
            crate::models::department::UpdateDepartment,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::enums::EquipmentState,
            // Maintenance
            crate::models::maintenance::MaintenanceEvent,
            crate::models::maintenance::MaintenanceDetails,
            crate::models::maintenance::CreateMaintenanceEvent,
            crate::models::maintenance::UpdateMaintenanceEvent,
            // Analytics
            analytics::AnalyticsResponse,
            analytics::StateDistribution,
            analytics::TrajectorySummary,
            analytics::DepartmentStateStats,
            // Users
            crate::models::user::UserInfo,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::enums::UserRole,
            // Audit
            crate::models::audit::AuditEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "departments", description = "Department management"),
        (name = "equipment", description = "Equipment management"),
        (name = "maintenance", description = "Maintenance event management"),
        (name = "analytics", description = "Equipment state and trajectory analytics"),
        (name = "users", description = "User management"),
        (name = "audit", description = "Audit trail")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
