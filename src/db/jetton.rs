use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::str::FromStr;

use crate::models::Jetton;

pub async fn find_by_name_symbol(
    pool: &SqlitePool,
    name: &str,
    symbol: &str,
) -> Result<Option<Jetton>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, name, symbol, decimals, total_supply, created_at
         FROM jettons WHERE name = ? AND symbol = ?",
    )
    .bind(name)
    .bind(symbol)
    .fetch_optional(pool)
    .await?;

    row.map(from_row).transpose()
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query("SELECT COUNT(*) FROM jettons")
        .fetch_one(pool)
        .await
        .map(|row| row.get(0))
}

fn from_row(row: SqliteRow) -> Result<Jetton, sqlx::Error> {
    let total_supply = row
        .get::<Option<String>, _>("total_supply")
        .map(|text| {
            Decimal::from_str(&text).map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_supply".into(),
                source: Box::new(e),
            })
        })
        .transpose()?;

    Ok(Jetton {
        id: row.get("id"),
        name: row.get("name"),
        symbol: row.get("symbol"),
        decimals: row.get::<i64, _>("decimals") as u32,
        total_supply,
        created_at: row.get("created_at"),
    })
}
