//! Versioned schema migrations embedded from `migrations/` and applied at startup.

use crate::error::StartupError;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: usize,
    pub pending: usize,
}

/// Apply every pending migration in version order, then count applied and pending ones.
/// Any failure is fatal to startup.
pub async fn apply_migrations(pool: &PgPool) -> Result<MigrationReport, StartupError> {
    tracing::info!(known = MIGRATOR.iter().count(), "applying pending migrations");
    MIGRATOR.run(pool).await?;
    tracing::info!("migrations completed successfully");

    let applied_versions: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success = true ORDER BY version")
            .fetch_all(pool)
            .await
            .map_err(MigrateError::Execute)?;
    let pending = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied_versions.contains(&m.version))
        .count();

    let report = MigrationReport {
        applied: applied_versions.len(),
        pending,
    };
    tracing::info!(count = report.applied, "applied migrations");
    tracing::info!(count = report.pending, "pending migrations");
    Ok(report)
}
