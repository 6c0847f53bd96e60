// Persistence entities and the fetched-record shape shared by the
// ingestion pipeline, plus the fixed-point balance conversion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A jetton master, created once when first observed and reused thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jetton {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Total supply already scaled by `decimals`.
    pub total_supply: Option<Decimal>,
    pub created_at: i64,
}

/// Current view of one holder; `balance` is always the latest observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holder {
    pub id: i64,
    pub jetton_id: i64,
    pub owner_address: String,
    pub owner_name: Option<String>,
    pub balance: Decimal,
}

/// One immutable balance observation; appended every pass, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: i64,
    pub holder_id: i64,
    pub balance: Decimal,
    pub captured_at: i64,
}

/// A holder tuple as fetched from the upstream, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderRecord {
    pub owner_address: String,
    pub owner_name: Option<String>,
    /// Unscaled integer balance as reported upstream.
    pub raw_balance: String,
}

/// Jetton metadata needed by the persistence phase.
#[derive(Debug, Clone)]
pub struct JettonMeta {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub total_supply: Option<Decimal>,
}

/// Fixed-point to decimal conversion: `raw / 10^decimals`.
///
/// Returns `None` when `raw` is not an integer or the value does not fit
/// a `Decimal` mantissa.
pub fn scale_balance(raw: &str, decimals: u32) -> Option<Decimal> {
    let units: i128 = raw.trim().parse().ok()?;
    Decimal::try_from_i128_with_scale(units, decimals)
        .ok()
        .map(|d| d.normalize())
}
