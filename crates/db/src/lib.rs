//! PostgreSQL connection pool factory and idempotent schema bootstrap.

use std::time::Duration;

use anyhow::Context;
use shelf_kernel::{settings::DatabaseSettings, TableDef};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Open the shared connection pool.
///
/// The pool is created once at process start and cloned into every gateway.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    tracing::info!(
        target: "shelf-db",
        max_connections = settings.max_connections,
        "connecting to postgres"
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect(&settings.url)
        .await
        .with_context(|| "failed to connect to postgres")?;

    Ok(pool)
}

/// Create every table that does not exist yet, in the order given.
///
/// Each definition is expected to be idempotent; nothing is versioned or
/// recorded.
pub async fn ensure_schema(pool: &PgPool, tables: &[(&'static str, TableDef)]) -> anyhow::Result<()> {
    for (module, table) in tables {
        tracing::info!(target: "shelf-db", module, table = table.name, "ensuring table");

        sqlx::raw_sql(table.ddl)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create table '{}' for module '{}'", table.name, module))?;
    }

    Ok(())
}
