use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Sets up the store by creating the `kv` table if it doesn't exist.
///
/// The whole persistence surface is one key-value table; the daily profile
/// lives under a single fixed key. No versioning: anything unreadable is
/// treated as "no profile".
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates a connection pool for the given SQLx URL, creating the database
/// file first if needed.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!(url = %database_url, "opening profile store");

    let in_memory = database_url.contains(":memory:");
    if !in_memory && !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await.map_err(|e| {
            color_eyre::eyre::eyre!("Failed to create database at {database_url}: {e}")
        })?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect to {database_url}: {e}"))?;

    setup_database(&pool).await?;

    Ok(pool)
}
