pub mod fetcher;
pub mod polling;
pub mod upsert;

use thiserror::Error;
use tracing::{info, warn};

use crate::state::AppState;
use crate::tonapi::client::{ClientError, TonapiClient};
use crate::tonapi::models::extract_meta;

#[derive(Error, Debug)]
pub enum PassError {
    #[error("jetton info fetch failed: {0}")]
    Fetch(#[from] ClientError),

    #[error("jetton {0} reports unusable metadata")]
    Metadata(String),

    #[error("persistence failed: {0}")]
    Persistence(#[from] sqlx::Error),
}

#[derive(Debug)]
pub struct PassSummary {
    pub jetton_id: i64,
    pub holders: usize,
    pub snapshots: usize,
    pub declared_holders: i64,
}

/// One full ingestion pass: fetch the holder set, then persist it.
///
/// The fetch phase and the single-writer persistence phase never overlap;
/// a persistence failure rolls the whole pass back.
pub async fn run_pass(state: &AppState, client: &TonapiClient) -> Result<PassSummary, PassError> {
    let jetton_address = &state.config.jetton_address;

    let info = client.get_jetton_info(jetton_address).await?;
    let meta =
        extract_meta(&info).ok_or_else(|| PassError::Metadata(jetton_address.to_string()))?;

    info!(
        "jetton {} ({}): supply {}, {} holders declared",
        meta.name,
        meta.symbol,
        meta.total_supply
            .map(|supply| supply.to_string())
            .unwrap_or_else(|| "?".to_string()),
        info.holders_count
    );

    let records = fetcher::fetch_all_holders(
        client,
        jetton_address,
        state.config.holders_page_size,
        state.config.fetch_concurrency,
    )
    .await;

    // An empty page caused by a transient failure ends the pass early; the
    // declared total makes that shortfall visible in the logs.
    if (records.len() as i64) < info.holders_count {
        warn!(
            "accumulated {} holders but upstream declares {}",
            records.len(),
            info.holders_count
        );
    }

    let captured_at = chrono::Utc::now().timestamp();
    let outcome = upsert::persist_pass(&state.db_pool, &meta, &records, captured_at).await?;

    info!(
        "pass complete: {} holders, {} snapshots, {} records skipped",
        outcome.holders_written, outcome.snapshots_written, outcome.skipped
    );

    Ok(PassSummary {
        jetton_id: outcome.jetton_id,
        holders: outcome.holders_written,
        snapshots: outcome.snapshots_written,
        declared_holders: info.holders_count,
    })
}
