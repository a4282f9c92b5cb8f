//! Offset/limit pagination.

use crate::error::{ensure_range, Result};
use std::future::Future;
use tracing::warn;

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Total number of records, as reported by the server.
    pub total_count: u64,
    /// Records in this page, in server order.
    pub records: Vec<T>,
}

/// Fetch every record of an offset/limit list endpoint.
///
/// The first page is requested with `initial_limit`; its `total_count` is
/// authoritative. Later pages start at the number of records received so far
/// and use [`MAX_PAGE_SIZE`]. The loop ends once the accumulated length
/// reaches the total, so short pages are handled. An empty page before that
/// point also ends the loop, since the server's count cannot be trusted then.
pub async fn paginate<T, F, Fut>(initial_limit: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    ensure_range("limit", initial_limit, 1, MAX_PAGE_SIZE)?;

    let first = fetch(0, initial_limit).await?;
    let total = first.total_count;
    let mut records = first.records;

    while (records.len() as u64) < total {
        let offset = u32::try_from(records.len()).unwrap_or(u32::MAX);
        let page = fetch(offset, MAX_PAGE_SIZE).await?;
        if page.records.is_empty() {
            warn!(
                received = records.len(),
                total_count = total,
                "Server returned an empty page before the reported total was reached"
            );
            break;
        }
        records.extend(page.records);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    /// A fake list endpoint holding `0..total` and reporting `reported_total`.
    fn fake_source(total: u64, reported_total: u64) -> impl Fn(u32, u32) -> Page<u64> {
        move |offset, limit| {
            let start = u64::from(offset).min(total);
            let end = (start + u64::from(limit)).min(total);
            Page {
                total_count: reported_total,
                records: (start..end).collect(),
            }
        }
    }

    #[tokio::test]
    async fn test_collects_all_records_in_order() {
        for total in [0u64, 1, 99, 100, 101, 250, 1000] {
            for limit in [1u32, 7, 50, 100] {
                let source = fake_source(total, total);
                let records = paginate(limit, |offset, limit| {
                    let page = source(offset, limit);
                    async move { Ok::<_, Error>(page) }
                })
                .await
                .unwrap();
                assert_eq!(records, (0..total).collect::<Vec<_>>(), "total={total} limit={limit}");
            }
        }
    }

    #[tokio::test]
    async fn test_zero_total_fetches_one_page() {
        let calls = RefCell::new(0);
        let records: Vec<u64> = paginate(100, |_, _| {
            *calls.borrow_mut() += 1;
            async { Ok::<_, Error>(Page { total_count: 0, records: vec![] }) }
        })
        .await
        .unwrap();
        assert!(records.is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_later_pages_use_accumulated_offset() {
        let requested = RefCell::new(Vec::new());
        let source = fake_source(230, 230);
        let records = paginate(10, |offset, limit| {
            requested.borrow_mut().push((offset, limit));
            let page = source(offset, limit);
            async move { Ok::<_, Error>(page) }
        })
        .await
        .unwrap();
        assert_eq!(records.len(), 230);
        assert_eq!(
            *requested.borrow(),
            vec![(0, 10), (10, 100), (110, 100), (210, 100)]
        );
    }

    #[tokio::test]
    async fn test_short_pages_are_tolerated() {
        // The server never returns more than 30 records per call.
        let source = fake_source(95, 95);
        let records = paginate(100, |offset, limit| {
            let page = source(offset, limit.min(30));
            async move { Ok::<_, Error>(page) }
        })
        .await
        .unwrap();
        assert_eq!(records, (0..95).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_overreported_total_terminates() {
        let calls = RefCell::new(0);
        let source = fake_source(150, 500);
        let records = paginate(100, |offset, limit| {
            *calls.borrow_mut() += 1;
            let page = source(offset, limit);
            async move { Ok::<_, Error>(page) }
        })
        .await
        .unwrap();
        assert_eq!(records.len(), 150);
        assert_eq!(*calls.borrow(), 3);
    }

    #[tokio::test]
    async fn test_invalid_limit_fetches_nothing() {
        for limit in [0u32, 101] {
            let calls = RefCell::new(0);
            let result: Result<Vec<u64>> = paginate(limit, |_, _| {
                *calls.borrow_mut() += 1;
                async { Ok::<_, Error>(Page { total_count: 0, records: vec![] }) }
            })
            .await;
            assert!(matches!(result, Err(Error::Validation(_))));
            assert_eq!(*calls.borrow(), 0);
        }
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let result: Result<Vec<u64>> = paginate(100, |_, _| async {
            Err::<Page<u64>, _>(Error::Api {
                status: 500,
                message: "boom".into(),
            })
        })
        .await;
        assert!(matches!(result, Err(Error::Api { status: 500, .. })));
    }
}
