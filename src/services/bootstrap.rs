//! Startup tasks: seed data, department de-duplication, audit retention
//!
//! Runs once after migrations. The schema itself is owned by the versioned
//! migration sequence; this module only touches rows.

use crate::{
    config::BootstrapConfig,
    error::AppResult,
    repository::Repository,
    services::{audit::AuditService, auth::hash_password},
};

/// Institution department roster seeded on first start
pub const SEED_DEPARTMENTS: &[&str] = &[
    "Presidencia",
    "Vicepresidencia",
    "Secretaría",
    "Dirección de Legislación",
    "Dirección de Administración",
    "Coordinación de Bienes",
    "Coordinación de Compras",
    "Dirección de Informática",
    "Dirección de Gestión Humana",
    "Coordinación de Servicios Generales",
    "División de Seguridad Industrial",
    "Desarrollo Social Integral",
    "Ejidos y Bienes Municipales",
    "Servicios Públicos, Transporte y Tránsito",
    "Contraloría",
    "Educación, Cultura, Deporte y Recreación",
    "Finanzas",
    "Urbanismo y Obras Públicas",
    "Desarrollo Turístico, Agroturístico, Ecología y Protección Ambiental",
    "Participación Ciudadana y Poder Popular",
];

/// Run all startup tasks. Seeding failures are fatal (a missing admin locks
/// the system out); de-duplication and retention are best-effort.
pub async fn run(
    repository: &Repository,
    audit: &AuditService,
    config: &BootstrapConfig,
) -> AppResult<()> {
    seed_departments(repository).await?;
    dedupe_departments(repository).await;
    seed_admin(repository, config).await?;
    audit.purge_expired(config.audit_retention_days).await;
    Ok(())
}

async fn seed_departments(repository: &Repository) -> AppResult<()> {
    for name in SEED_DEPARTMENTS {
        sqlx::query(
            r#"
            INSERT INTO departments (name, active)
            SELECT $1, TRUE
            WHERE NOT EXISTS (SELECT 1 FROM departments WHERE name = $1)
            "#,
        )
        .bind(name)
        .execute(&repository.pool)
        .await?;
    }
    Ok(())
}

/// Merge departments sharing a display name: keep the oldest row, re-point
/// equipment at it, drop the duplicates. Avoids filters landing on orphaned
/// department ids.
async fn dedupe_departments(repository: &Repository) {
    if let Err(e) = try_dedupe_departments(repository).await {
        tracing::warn!("department de-duplication failed: {e}");
    }
}

async fn try_dedupe_departments(repository: &Repository) -> AppResult<()> {
    let duplicated: Vec<String> =
        sqlx::query_scalar("SELECT name FROM departments GROUP BY name HAVING COUNT(*) > 1")
            .fetch_all(&repository.pool)
            .await?;

    for name in duplicated {
        let keep: Option<i32> = sqlx::query_scalar("SELECT MIN(id) FROM departments WHERE name = $1")
            .bind(&name)
            .fetch_one(&repository.pool)
            .await?;
        let Some(keep) = keep else { continue };

        sqlx::query(
            r#"
            UPDATE equipment SET department_id = $1
            WHERE department_id IN (SELECT id FROM departments WHERE name = $2 AND id <> $1)
            "#,
        )
        .bind(keep)
        .bind(&name)
        .execute(&repository.pool)
        .await?;

        sqlx::query("DELETE FROM departments WHERE name = $1 AND id <> $2")
            .bind(&name)
            .bind(keep)
            .execute(&repository.pool)
            .await?;

        tracing::info!(department = %name, kept = keep, "merged duplicate departments");
    }
    Ok(())
}

async fn seed_admin(repository: &Repository, config: &BootstrapConfig) -> AppResult<()> {
    if repository
        .users
        .find_by_username(&config.admin_username)
        .await?
        .is_some()
    {
        return Ok(());
    }
    let password_hash = hash_password(&config.admin_password)?;
    repository
        .users
        .create(&config.admin_username, &password_hash, None, "admin", None)
        .await?;
    tracing::info!(username = %config.admin_username, "seeded admin account");
    Ok(())
}
