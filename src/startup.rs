//! Startup phase: log configuration, connect, migrate, then serve.
//! Any failure before the listener is bound aborts the process.

use crate::config::{mask_connection_string, parse_connection_string, Settings};
use crate::error::StartupError;
use crate::migration::apply_migrations;
use crate::routes::router;
use crate::state::AppState;
use crate::store::PgTodoStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};
use tokio::net::TcpListener;

/// Log the resolved settings; secrets are masked.
pub fn log_settings(settings: &Settings) {
    tracing::info!(environment = %settings.environment, "environment");
    if let Ok(dir) = std::env::current_dir() {
        tracing::info!(content_root = %dir.display(), "content root");
    }
    tracing::info!(port = settings.port, "port");
    tracing::info!(
        connection_string = %mask_connection_string(&settings.connection_string),
        "connection string found"
    );
    for (key, value) in settings.masked_entries() {
        tracing::info!(key = %key, value = %value, "config");
    }
}

/// Prove the database is reachable with one direct connection, then build the pool.
/// The pool retries refused connections until its acquire timeout, so the first attempt is made directly.
pub async fn connect(settings: &Settings) -> Result<PgPool, StartupError> {
    let options = parse_connection_string(&settings.connection_string)?;
    tracing::info!("testing database connection");
    let mut conn = PgConnection::connect_with(&options)
        .await
        .map_err(StartupError::Connect)?;
    sqlx::query("SELECT 1")
        .execute(&mut conn)
        .await
        .map_err(StartupError::Connect)?;
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "closing connectivity test connection");
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .map_err(StartupError::Connect)?;
    tracing::info!(max_connections = settings.max_connections, "database connection successful");
    Ok(pool)
}

/// Run the service until the server stops.
pub async fn run(settings: Settings) -> Result<(), StartupError> {
    tracing::info!("application starting");
    log_settings(&settings);

    let pool = match connect(&settings).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            return Err(e);
        }
    };
    if let Err(e) = apply_migrations(&pool).await {
        tracing::error!(error = %e, "failed to run migrations");
        return Err(e);
    }

    let state = AppState::new(PgTodoStore::new(pool));
    let app = router(state);

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
