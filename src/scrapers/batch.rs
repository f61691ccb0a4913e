use crate::scrapers::types::BatchSettings;
use futures::future::join_all;
use std::future::Future;
use tracing::debug;

/// Run `scrape` over `urls` in fixed-size concurrent batches.
///
/// Each batch is awaited as a whole before the next starts, with
/// `settings.delay` between batches (not after the last). Results keep URL
/// order; `None` outcomes are dropped.
pub async fn scrape_in_batches<'a, T, F, Fut>(
    urls: &'a [String],
    settings: BatchSettings,
    scrape: F,
) -> Vec<T>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let size = settings.size.max(1);
    let total_batches = urls.len().div_ceil(size);
    let mut records = Vec::with_capacity(urls.len());

    for (index, batch) in urls.chunks(size).enumerate() {
        debug!(
            "Batch {}/{}: {} URLs",
            index + 1,
            total_batches,
            batch.len()
        );

        let outcomes = join_all(batch.iter().map(|url| scrape(url.as_str()))).await;
        records.extend(outcomes.into_iter().flatten());

        if index + 1 < total_batches && !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }
    }

    records
}
