use sqlx::{migrate::MigrateDatabase, Pool, Sqlite, SqlitePool};

use crate::db::migration;

/// Open the pool, enable WAL and foreign keys, and bring the schema up.
pub async fn establish_connection(database_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePool::connect(database_url).await?;

    // Enable WAL mode for better concurrency
    sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
    sqlx::query("PRAGMA foreign_keys=ON").execute(&pool).await?;

    migration::run_migrations(&pool).await?;

    Ok(pool)
}
