use std::sync::Arc;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::ingest;
use crate::state::AppState;
use crate::tonapi::client::TonapiClient;

/// Run ingestion passes on the configured interval until shutdown.
///
/// The first pass starts immediately; a failed pass is logged and the
/// loop keeps its cadence.
pub async fn start_polling(state: Arc<AppState>, client: TonapiClient, shutdown: CancellationToken) {
    info!(
        "starting snapshot polling every {:?}",
        state.config.poll_interval
    );

    let mut ticker = interval(state.config.poll_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match ingest::run_pass(&state, &client).await {
                    Ok(summary) => info!(
                        "snapshot pass stored {} holders ({} declared upstream) for jetton {}",
                        summary.holders, summary.declared_holders, summary.jetton_id
                    ),
                    Err(e) => error!("ingestion pass failed: {}", e),
                }
            }
            _ = shutdown.cancelled() => {
                info!("shutting down snapshot polling");
                break;
            }
        }
    }
}
