//! Department API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::department::{CreateDepartment, Department, UpdateDepartment},
};

use super::AuthenticatedUser;

/// List all departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Department list", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.departments.list().await?;
    Ok(Json(departments))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Department>> {
    let department = state.services.departments.get_by_id(id).await?;
    Ok(Json(department))
}

/// Create department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn create_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    claims.require_admin()?;
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let department = state
        .services
        .departments
        .create(&claims.actor(), &data)
        .await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// Update department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    claims.require_admin()?;
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let department = state
        .services
        .departments
        .update(&claims.actor(), id, &data)
        .await?;
    Ok(Json(department))
}

/// Delete department. Equipment it owned becomes unassigned.
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state
        .services
        .departments
        .delete(&claims.actor(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
