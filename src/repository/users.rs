//! Users repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserInfo},
};

fn map_username_conflict(e: sqlx::Error, username: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.constraint() == Some("users_username_key") {
            return AppError::Conflict(format!("Username '{}' already exists", username));
        }
    }
    AppError::Database(e)
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all users, by username
    pub async fn list(&self) -> AppResult<Vec<UserInfo>> {
        let rows = sqlx::query_as::<_, UserInfo>(
            "SELECT id, username, full_name, role, email, created_at FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by username, if any
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create a user with an already-hashed password
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        full_name: Option<&str>,
        role: &str,
        email: Option<&str>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, full_name, role, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_username_conflict(e, username))
    }

    /// Update a user; absent fields keep their values
    pub async fn update(
        &self,
        id: i32,
        username: Option<&str>,
        password_hash: Option<&str>,
        full_name: Option<&str>,
        role: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($1, username),
                password_hash = COALESCE($2, password_hash),
                full_name = COALESCE($3, full_name),
                role = COALESCE($4, role),
                email = COALESCE($5, email)
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_username_conflict(e, username.unwrap_or("")))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Delete a user. Their audit entries remain, detached.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
