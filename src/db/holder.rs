use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::str::FromStr;

use crate::models::Holder;

pub async fn find(
    pool: &SqlitePool,
    jetton_id: i64,
    owner_address: &str,
) -> Result<Option<Holder>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, jetton_id, owner_address, owner_name, balance
         FROM holders WHERE jetton_id = ? AND owner_address = ?",
    )
    .bind(jetton_id)
    .bind(owner_address)
    .fetch_optional(pool)
    .await?;

    row.map(from_row).transpose()
}

pub async fn all_for_jetton(pool: &SqlitePool, jetton_id: i64) -> Result<Vec<Holder>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, jetton_id, owner_address, owner_name, balance
         FROM holders WHERE jetton_id = ? ORDER BY id ASC",
    )
    .bind(jetton_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(from_row).collect()
}

/// Every stored holder as `(owner_address, balance)`, for reporting.
pub async fn all_balances(pool: &SqlitePool) -> Result<Vec<(String, Decimal)>, sqlx::Error> {
    let rows = sqlx::query("SELECT owner_address, balance FROM holders")
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| {
            let text: String = row.get("balance");
            Ok((row.get("owner_address"), decode_balance(&text)?))
        })
        .collect()
}

fn from_row(row: SqliteRow) -> Result<Holder, sqlx::Error> {
    let text: String = row.get("balance");
    Ok(Holder {
        id: row.get("id"),
        jetton_id: row.get("jetton_id"),
        owner_address: row.get("owner_address"),
        owner_name: row.get("owner_name"),
        balance: decode_balance(&text)?,
    })
}

fn decode_balance(text: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(text).map_err(|e| sqlx::Error::ColumnDecode {
        index: "balance".into(),
        source: Box::new(e),
    })
}
