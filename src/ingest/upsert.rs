//! Transactional reconciliation of fetched holder records.

use sqlx::{Row, SqlitePool};
use tracing::warn;

use crate::models::{scale_balance, HolderRecord, JettonMeta};

#[derive(Debug)]
pub struct UpsertOutcome {
    pub jetton_id: i64,
    pub holders_written: usize,
    pub snapshots_written: usize,
    pub skipped: usize,
}

/// Persist one pass: refresh holder rows and append one snapshot each.
///
/// Everything commits as a single transaction; on any failure none of the
/// pass's writes are retained. An existing holder's balance is replaced,
/// never accumulated. A record with an unparseable balance is logged and
/// skipped rather than aborting the pass.
pub async fn persist_pass(
    pool: &SqlitePool,
    meta: &JettonMeta,
    records: &[HolderRecord],
    captured_at: i64,
) -> Result<UpsertOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Resolve or create the jetton row once per pass.
    let existing = sqlx::query("SELECT id FROM jettons WHERE name = ? AND symbol = ?")
        .bind(&meta.name)
        .bind(&meta.symbol)
        .fetch_optional(&mut *tx)
        .await?;

    let jetton_id: i64 = match existing {
        Some(row) => row.get(0),
        None => sqlx::query(
            "INSERT INTO jettons (name, symbol, decimals, total_supply, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&meta.name)
        .bind(&meta.symbol)
        .bind(meta.decimals as i64)
        .bind(meta.total_supply.as_ref().map(|supply| supply.to_string()))
        .bind(captured_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid(),
    };

    let mut holders_written = 0usize;
    let mut snapshots_written = 0usize;
    let mut skipped = 0usize;

    for record in records {
        let balance = match scale_balance(&record.raw_balance, meta.decimals) {
            Some(balance) => balance,
            None => {
                warn!(
                    "skipping holder {}: unparseable balance {:?}",
                    record.owner_address, record.raw_balance
                );
                skipped += 1;
                continue;
            }
        };
        let balance_text = balance.to_string();

        let found = sqlx::query("SELECT id FROM holders WHERE jetton_id = ? AND owner_address = ?")
            .bind(jetton_id)
            .bind(&record.owner_address)
            .fetch_optional(&mut *tx)
            .await?;

        let holder_id: i64 = match found {
            Some(row) => {
                let id: i64 = row.get(0);
                sqlx::query(
                    "UPDATE holders SET balance = ?, owner_name = ?, jetton_id = ? WHERE id = ?",
                )
                .bind(&balance_text)
                .bind(&record.owner_name)
                .bind(jetton_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
                id
            }
            None => sqlx::query(
                "INSERT INTO holders (jetton_id, owner_address, owner_name, balance)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(jetton_id)
            .bind(&record.owner_address)
            .bind(&record.owner_name)
            .bind(&balance_text)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid(),
        };
        holders_written += 1;

        // One snapshot per holder per pass, even when the balance is unchanged.
        sqlx::query("INSERT INTO snapshots (holder_id, balance, captured_at) VALUES (?, ?, ?)")
            .bind(holder_id)
            .bind(&balance_text)
            .bind(captured_at)
            .execute(&mut *tx)
            .await?;
        snapshots_written += 1;
    }

    tx.commit().await?;

    Ok(UpsertOutcome {
        jetton_id,
        holders_written,
        snapshots_written,
        skipped,
    })
}
