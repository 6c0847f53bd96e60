//! tests/fetcher_tests.rs - Pagination, termination and concurrency bounds

#[cfg(test)]
mod tests {
    use crate::ingest::fetcher::collect_holders;
    use crate::models::HolderRecord;
    use crate::tonapi::client::ClientError;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn record(index: u64) -> HolderRecord {
        HolderRecord {
            owner_address: format!("0:{:064x}", index),
            owner_name: None,
            raw_balance: "1".to_string(),
        }
    }

    fn page_of(total: u64, limit: u64, offset: u64) -> Vec<HolderRecord> {
        (offset..total.min(offset + limit)).map(record).collect()
    }

    #[tokio::test]
    async fn collects_until_empty_page() {
        let total = 25u64;
        let holders = collect_holders(
            move |limit, offset| async move { Ok::<_, ClientError>(page_of(total, limit, offset)) },
            10,
            3,
        )
        .await;

        assert_eq!(holders.len(), 25);

        // Offsets never overlap within a pass, so every record is distinct.
        let distinct: HashSet<_> = holders.iter().map(|h| h.owner_address.clone()).collect();
        assert_eq!(distinct.len(), 25);
    }

    #[tokio::test]
    async fn failed_page_counts_as_empty() {
        let holders = collect_holders(
            move |limit, offset| async move {
                if offset == 0 {
                    Err(ClientError::Api {
                        status: 500,
                        message: "boom".to_string(),
                    })
                } else {
                    Ok(page_of(25, limit, offset))
                }
            },
            5,
            2,
        )
        .await;

        // The failure ends the pass, keeping the sibling page that succeeded.
        assert_eq!(holders.len(), 5);
        assert!(holders.iter().all(|h| !h.owner_address.is_empty()));
    }

    #[tokio::test]
    async fn never_more_than_n_fetches_in_flight() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let fetch = {
            let in_flight = in_flight.clone();
            let max_seen = max_seen.clone();
            move |limit: u64, offset: u64| {
                let in_flight = in_flight.clone();
                let max_seen = max_seen.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, ClientError>(page_of(35, limit, offset))
                }
            }
        };

        let holders = collect_holders(fetch, 10, 4).await;

        assert_eq!(holders.len(), 35);
        assert!(max_seen.load(Ordering::SeqCst) <= 4);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn launched_offsets_are_disjoint_and_batched() {
        let seen_offsets = Arc::new(Mutex::new(Vec::new()));

        let fetch = {
            let seen_offsets = seen_offsets.clone();
            move |limit: u64, offset: u64| {
                let seen_offsets = seen_offsets.clone();
                async move {
                    seen_offsets.lock().unwrap().push(offset);
                    Ok::<_, ClientError>(page_of(20, limit, offset))
                }
            }
        };

        let holders = collect_holders(fetch, 10, 2).await;
        assert_eq!(holders.len(), 20);

        let mut offsets = seen_offsets.lock().unwrap().clone();
        offsets.sort_unstable();
        // Two full batches: the second one hits end-of-data.
        assert_eq!(offsets, vec![0, 10, 20, 30]);
    }

    #[tokio::test]
    async fn empty_source_terminates_immediately() {
        let holders =
            collect_holders(|_, _| async { Ok::<_, ClientError>(Vec::new()) }, 10, 4).await;
        assert!(holders.is_empty());
    }
}
