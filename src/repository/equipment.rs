//! Equipment repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

/// Map a unique-constraint violation on (internal_code, department_id)
/// to a Conflict, anything else to the generic database error.
fn map_code_conflict(e: sqlx::Error, code: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.constraint() == Some("uq_equipment_code_department") {
            return AppError::Conflict(format!(
                "Internal code '{}' already exists in this department",
                code
            ));
        }
    }
    AppError::Database(e)
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment, newest first
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List equipment owned by a department, newest first
    pub async fn list_by_department(&self, department_id: i32) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE department_id = $1 ORDER BY id DESC",
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment, state: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (internal_code, description, brand, model, serial_number, location, state, department_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.internal_code)
        .bind(&data.description)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.location)
        .bind(state)
        .bind(data.department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_code_conflict(e, &data.internal_code))
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.internal_code, "internal_code");
        add_field!(data.description, "description");
        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.location, "location");
        add_field!(data.state, "state");
        add_field!(data.department_id, "department_id");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }
        let _ = idx;

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.internal_code);
        bind_field!(data.description);
        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.serial_number);
        bind_field!(data.location);
        bind_field!(data.state);
        bind_field!(data.department_id);

        builder
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_code_conflict(e, data.internal_code.as_deref().unwrap_or(""))
            })?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment. Its maintenance history goes with it (cascade).
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
