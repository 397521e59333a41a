//! Maintenance API endpoints
//!
//! Create and update run the equipment state synchronizer: the owning
//! equipment's current state follows the event's resulting state.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::maintenance::{
        CreateMaintenanceEvent, MaintenanceDetails, MaintenanceEvent, UpdateMaintenanceEvent,
    },
};

use super::AuthenticatedUser;

/// Maintenance list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct MaintenanceQuery {
    /// Restrict to equipment of one department
    pub department_id: Option<i32>,
}

/// List maintenance events with equipment context
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(MaintenanceQuery),
    responses(
        (status = 200, description = "Maintenance events", body = Vec<MaintenanceDetails>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<MaintenanceQuery>,
) -> AppResult<Json<Vec<MaintenanceDetails>>> {
    let events = state.services.maintenance.list(query.department_id).await?;
    Ok(Json(events))
}

/// Get maintenance event by ID
#[utoipa::path(
    get,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance event ID")),
    responses(
        (status = 200, description = "Maintenance event", body = MaintenanceEvent),
        (status = 404, description = "Maintenance event not found")
    )
)]
pub async fn get_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceEvent>> {
    let event = state.services.maintenance.get_by_id(id).await?;
    Ok(Json(event))
}

/// Record a maintenance event
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceEvent,
    responses(
        (status = 201, description = "Maintenance event created", body = MaintenanceEvent),
        (status = 404, description = "Referenced equipment not found")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenanceEvent>,
) -> AppResult<(StatusCode, Json<MaintenanceEvent>)> {
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let event = state
        .services
        .maintenance
        .create(&claims.actor(), &data)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Edit a maintenance event
#[utoipa::path(
    put,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance event ID")),
    request_body = UpdateMaintenanceEvent,
    responses(
        (status = 200, description = "Maintenance event updated", body = MaintenanceEvent),
        (status = 404, description = "Maintenance event or equipment not found")
    )
)]
pub async fn update_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceEvent>,
) -> AppResult<Json<MaintenanceEvent>> {
    data.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let event = state
        .services
        .maintenance
        .update(&claims.actor(), id, &data)
        .await?;
    Ok(Json(event))
}

/// Delete a maintenance event. Equipment state is not recomputed.
#[utoipa::path(
    delete,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance event ID")),
    responses(
        (status = 204, description = "Maintenance event deleted"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Maintenance event not found")
    )
)]
pub async fn delete_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state
        .services
        .maintenance
        .delete(&claims.actor(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
