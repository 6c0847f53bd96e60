//! Cohort analysis over stored holders.
//!
//! Buckets every holder by the USD value of its balance at a fixed,
//! externally supplied token price. Known liquidity pools and exchange
//! accounts land in their own cohort regardless of size.

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::holder;

pub const KNOWN_LIQUIDITY_POOLS: &[(&str, &str)] = &[
    (
        "DEX DeDust",
        "0:6bebcc2448012bba42e151f5d140448cf7be8e22a2233d8da3a1423bdc244aac",
    ),
    (
        "DEX StonFi",
        "0:779dcc815138d9500e449c5291e7f12738c23d575b5310000f6a253bd607384e",
    ),
    (
        "CEX xRocket Cold Storage",
        "0:45614fee399c43d77bb597558791831bc0ee31754cbb2b5b1fbf5a3488ed9940",
    ),
    (
        "CEX xRocket Bot",
        "0:011a8f0a0b36b779af033473274966666d1cd6fb4e77df679375fbd6f970d012",
    ),
    (
        "MEXC 3",
        "0:d887d0e2d1c4fc4126e71c970d33ab1896940000eae703bb1ab6cecc830777e3",
    ),
    (
        "Burned",
        "0:0000000000000000000000000000000000000000000000000000000000000000",
    ),
    (
        "Anon Space Staking",
        "0:e3fa13950c93bab4f9b7901abd7959f8111e8dabc0aae76e6c6000683068241d",
    ),
];

// USD bands: [lower, upper) per cohort, the last one open-ended.
const BANDS: &[(&str, u64, Option<u64>)] = &[
    ("Micro holders ($0 - $34)", 0, Some(34)),
    ("Small holders ($34 - $170)", 34, Some(170)),
    ("Medium holders ($170 - $3,400)", 170, Some(3_400)),
    ("Large holders ($3,400 - $34,000)", 3_400, Some(34_000)),
    ("Mega holders ($34,000+)", 34_000, None),
];

const POOLS_LABEL: &str = "Liquidity Pools & CEX";

#[derive(Debug, Clone)]
pub struct Cohort {
    pub label: &'static str,
    pub holders: u64,
    pub total_balance: Decimal,
    pub total_value_usd: Decimal,
}

impl Cohort {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            holders: 0,
            total_balance: Decimal::ZERO,
            total_value_usd: Decimal::ZERO,
        }
    }
}

pub async fn build_cohorts(
    pool: &SqlitePool,
    token_price_usd: Decimal,
) -> Result<Vec<Cohort>, sqlx::Error> {
    let mut cohorts: Vec<Cohort> = BANDS
        .iter()
        .map(|(label, _, _)| Cohort::new(label))
        .collect();
    cohorts.push(Cohort::new(POOLS_LABEL));
    let pools_index = cohorts.len() - 1;

    for (owner_address, balance) in holder::all_balances(pool).await? {
        let value_usd = balance * token_price_usd;

        let index = if KNOWN_LIQUIDITY_POOLS
            .iter()
            .any(|(_, address)| *address == owner_address)
        {
            pools_index
        } else {
            BANDS
                .iter()
                .position(|(_, lower, upper)| {
                    value_usd >= Decimal::from(*lower)
                        && upper.map_or(true, |u| value_usd < Decimal::from(u))
                })
                .unwrap_or(BANDS.len() - 1)
        };

        let cohort = &mut cohorts[index];
        cohort.holders += 1;
        cohort.total_balance += balance;
        cohort.total_value_usd += value_usd;
    }

    Ok(cohorts)
}

pub fn render_cohorts(cohorts: &[Cohort]) -> String {
    let mut out = String::from("Cohort Analysis:\n");
    out.push_str(&format!(
        "{:<35} {:<10} {:>18} {:>18}\n",
        "Cohort", "Holders", "Total Balance", "Total Value (USD)"
    ));
    for cohort in cohorts {
        out.push_str(&format!(
            "{:<35} {:<10} {:>18} {:>18}\n",
            cohort.label,
            cohort.holders,
            cohort.total_balance.round_dp(2),
            cohort.total_value_usd.round_dp(2)
        ));
    }
    out
}
