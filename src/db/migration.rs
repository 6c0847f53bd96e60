use sqlx::SqlitePool;
use tracing::info;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS jettons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            symbol TEXT NOT NULL,
            decimals INTEGER NOT NULL,
            total_supply TEXT,
            created_at INTEGER NOT NULL,
            UNIQUE(name, symbol)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS holders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            jetton_id INTEGER NOT NULL,
            owner_address TEXT NOT NULL,
            owner_name TEXT,
            balance TEXT NOT NULL,
            FOREIGN KEY (jetton_id) REFERENCES jettons(id),
            UNIQUE(jetton_id, owner_address)
        )",
    )
    .execute(pool)
    .await?;

    // Snapshots are append-only; rows are never updated or deleted.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            holder_id INTEGER NOT NULL,
            balance TEXT NOT NULL,
            captured_at INTEGER NOT NULL,
            FOREIGN KEY (holder_id) REFERENCES holders(id)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_holders_jetton
         ON holders(jetton_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_snapshots_holder
         ON snapshots(holder_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_snapshots_captured_at
         ON snapshots(captured_at)",
    )
    .execute(pool)
    .await?;

    info!("Database migrations completed successfully");
    Ok(())
}
