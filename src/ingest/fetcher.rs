//! Paginated holder collection under a bounded concurrency budget.

use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::models::HolderRecord;
use crate::tonapi::client::{ClientError, TonapiClient};

/// Drain the holder list behind `fetch`, a page at a time.
///
/// Offsets advance in batches of `concurrency`; each fetch holds a
/// semaphore permit so at most `concurrency` requests are in flight.
/// A failed fetch is logged and counts as an empty page, and the first
/// empty page in a batch ends the pass with everything accumulated so
/// far. Offsets within one pass never overlap; every launched fetch is
/// awaited even after a sibling has already come back empty.
pub async fn collect_holders<F, Fut>(
    fetch: F,
    page_size: u64,
    concurrency: usize,
) -> Vec<HolderRecord>
where
    F: Fn(u64, u64) -> Fut,
    Fut: Future<Output = Result<Vec<HolderRecord>, ClientError>>,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let fetch = &fetch;

    let mut holders = Vec::new();
    let mut offset: u64 = 0;

    loop {
        let batch = (0..concurrency as u64).map(|i| {
            let semaphore = semaphore.clone();
            let page_offset = offset + i * page_size;
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("semaphore is never closed");
                match fetch(page_size, page_offset).await {
                    Ok(records) => records,
                    Err(e) => {
                        warn!("holders page at offset {} failed: {}", page_offset, e);
                        Vec::new()
                    }
                }
            }
        });

        let pages: Vec<Vec<HolderRecord>> = join_all(batch).await;
        let saw_empty = pages.iter().any(|page| page.is_empty());
        for page in pages {
            holders.extend(page);
        }
        if saw_empty {
            break;
        }

        offset += concurrency as u64 * page_size;
        debug!(
            "accumulated {} holders, advancing to offset {}",
            holders.len(),
            offset
        );
    }

    holders
}

/// The complete holder set for one jetton, via the tonapi client.
pub async fn fetch_all_holders(
    client: &TonapiClient,
    jetton_address: &str,
    page_size: u64,
    concurrency: usize,
) -> Vec<HolderRecord> {
    collect_holders(
        move |limit, offset| async move {
            let page = client.get_jetton_holders(jetton_address, limit, offset).await?;
            Ok(page.addresses.into_iter().map(HolderRecord::from).collect())
        },
        page_size,
        concurrency,
    )
    .await
}
