use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

/// Open the process-wide SQLite pool, creating the database file if needed.
///
/// `sqlite::memory:` yields a private in-memory database shared by every
/// connection of the returned pool. It is dropped with the last connection,
/// so connections are never reaped for idleness or age.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    Ok(pool)
}

/// Apply embedded schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");
    Ok(())
}
