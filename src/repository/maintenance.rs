//! Maintenance events repository
//!
//! Writes that declare a resulting state also carry the owning equipment's
//! state update; both rows are committed in one transaction so a crash
//! cannot leave the cached equipment state behind its latest event.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::maintenance::{MaintenanceDetails, MaintenanceEvent, MaintenanceWrite},
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all maintenance events (raw rows, analytics input)
    pub async fn list(&self) -> AppResult<Vec<MaintenanceEvent>> {
        let rows = sqlx::query_as::<_, MaintenanceEvent>(
            "SELECT * FROM maintenance_events ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List maintenance events with equipment and department context,
    /// optionally restricted to one department
    pub async fn list_details(
        &self,
        department_id: Option<i32>,
    ) -> AppResult<Vec<MaintenanceDetails>> {
        let base = r#"
            SELECT m.id, m.equipment_id, m.event_date, m.description, m.resulting_state,
                   e.internal_code AS equipment_code, e.description AS equipment_description,
                   e.department_id, d.name AS department_name
            FROM maintenance_events m
            JOIN equipment e ON m.equipment_id = e.id
            LEFT JOIN departments d ON e.department_id = d.id
        "#;
        let rows = if let Some(dep) = department_id {
            sqlx::query_as::<_, MaintenanceDetails>(&format!(
                "{} WHERE e.department_id = $1 ORDER BY m.id DESC",
                base
            ))
            .bind(dep)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, MaintenanceDetails>(&format!("{} ORDER BY m.id DESC", base))
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows)
    }

    /// List events for one equipment, oldest first
    pub async fn list_by_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceEvent>> {
        let rows = sqlx::query_as::<_, MaintenanceEvent>(
            "SELECT * FROM maintenance_events WHERE equipment_id = $1 ORDER BY event_date, id",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get maintenance event by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceEvent> {
        sqlx::query_as::<_, MaintenanceEvent>("SELECT * FROM maintenance_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance event {} not found", id)))
    }

    /// Insert an event. When `synced_state` is set, the owning equipment's
    /// state is updated in the same transaction.
    pub async fn create(
        &self,
        data: &MaintenanceWrite,
        synced_state: Option<&str>,
    ) -> AppResult<MaintenanceEvent> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MaintenanceEvent>(
            r#"
            INSERT INTO maintenance_events (equipment_id, event_date, description, resulting_state)
            VALUES ($1, COALESCE($2, CURRENT_DATE), $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.event_date)
        .bind(&data.description)
        .bind(&data.resulting_state)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(state) = synced_state {
            sqlx::query("UPDATE equipment SET state = $1 WHERE id = $2")
                .bind(state)
                .bind(data.equipment_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Replace an event's fields with the merged values. When `synced_state`
    /// is set, the owning equipment's state is updated in the same
    /// transaction.
    pub async fn update(
        &self,
        id: i32,
        data: &MaintenanceWrite,
        synced_state: Option<&str>,
    ) -> AppResult<MaintenanceEvent> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MaintenanceEvent>(
            r#"
            UPDATE maintenance_events
            SET equipment_id = $1, event_date = $2, description = $3, resulting_state = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.event_date)
        .bind(&data.description)
        .bind(&data.resulting_state)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance event {} not found", id)))?;

        if let Some(state) = synced_state {
            sqlx::query("UPDATE equipment SET state = $1 WHERE id = $2")
                .bind(state)
                .bind(data.equipment_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a maintenance event. No state recompute happens on delete.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance event {} not found",
                id
            )));
        }
        Ok(())
    }
}
