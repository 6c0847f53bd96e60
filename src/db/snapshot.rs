use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::str::FromStr;

use crate::models::Snapshot;

pub async fn for_holder(pool: &SqlitePool, holder_id: i64) -> Result<Vec<Snapshot>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, holder_id, balance, captured_at
         FROM snapshots WHERE holder_id = ? ORDER BY captured_at ASC, id ASC",
    )
    .bind(holder_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(from_row).collect()
}

pub async fn count_for_holder(pool: &SqlitePool, holder_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query("SELECT COUNT(*) FROM snapshots WHERE holder_id = ?")
        .bind(holder_id)
        .fetch_one(pool)
        .await
        .map(|row| row.get(0))
}

fn from_row(row: SqliteRow) -> Result<Snapshot, sqlx::Error> {
    let text: String = row.get("balance");
    let balance = Decimal::from_str(&text).map_err(|e| sqlx::Error::ColumnDecode {
        index: "balance".into(),
        source: Box::new(e),
    })?;

    Ok(Snapshot {
        id: row.get("id"),
        holder_id: row.get("holder_id"),
        balance,
        captured_at: row.get("captured_at"),
    })
}
