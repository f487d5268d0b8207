//! Batch lookups over a bounded worker pool.
//!
//! Row order contract: with a concurrency of 1 rows come back in input
//! order. With more workers rows come back in completion order, so callers
//! must match rows to terms by `search_term`, not by position. Either way
//! there is exactly one row per input term.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use genius_core::ResultRow;

use crate::lookup::LookupPipeline;

/// Look up every term, `concurrency` at a time.
///
/// Each term runs in its own task, so a panicking lookup only costs its
/// own row (reported as an error) and never the batch. A concurrency of 0
/// is treated as 1; anything above the number of terms is capped at it.
pub async fn lookup_all<I, S>(
    pipeline: Arc<LookupPipeline>,
    terms: I,
    concurrency: usize,
) -> Vec<ResultRow>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let terms: Vec<String> = terms.into_iter().map(Into::into).collect();

    if concurrency == 0 {
        log::warn!("Batch concurrency of 0 requested; running serially");
    }
    // Never more workers than terms.
    let workers = concurrency.clamp(1, terms.len().max(1));

    log::info!(
        "Looking up {} terms with {} worker{}",
        terms.len(),
        workers,
        if workers == 1 { "" } else { "s" }
    );

    let rows = if workers == 1 {
        lookup_serial(pipeline, terms).await
    } else {
        lookup_concurrent(pipeline, terms, workers).await
    };

    let resolved = rows.iter().filter(|r| r.is_resolved()).count();
    log::info!("Batch complete: {}/{} terms resolved", resolved, rows.len());
    rows
}

async fn lookup_serial(pipeline: Arc<LookupPipeline>, terms: Vec<String>) -> Vec<ResultRow> {
    let mut rows = Vec::with_capacity(terms.len());

    for term in terms {
        let task_pipeline = Arc::clone(&pipeline);
        let task_term = term.clone();
        let joined = tokio::spawn(async move { task_pipeline.row(&task_term).await }).await;

        rows.push(joined.unwrap_or_else(|e| worker_failed(term, &e)));
    }

    rows
}

async fn lookup_concurrent(
    pipeline: Arc<LookupPipeline>,
    terms: Vec<String>,
    workers: usize,
) -> Vec<ResultRow> {
    let permits = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();

    for (index, term) in terms.iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let permits = Arc::clone(&permits);
        let term = term.clone();

        tasks.spawn(async move {
            // Acquisition only fails once the semaphore is closed.
            let row = match permits.acquire_owned().await {
                Ok(_permit) => pipeline.row(&term).await,
                Err(e) => ResultRow::failed(term, format!("worker pool unavailable: {e}")),
            };
            (index, row)
        });
    }

    let mut rows = Vec::with_capacity(terms.len());
    let mut finished = vec![false; terms.len()];

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, row)) => {
                finished[index] = true;
                rows.push(row);
            }
            Err(e) => log::error!("Lookup worker failed: {}", e),
        }
    }

    // Terms whose task panicked still get their row.
    for (term, _) in terms
        .into_iter()
        .zip(finished)
        .filter(|(_, done)| !done)
    {
        rows.push(ResultRow::failed(term, "lookup worker terminated unexpectedly"));
    }

    rows
}

fn worker_failed(term: String, err: &tokio::task::JoinError) -> ResultRow {
    log::error!("Lookup worker for '{}' failed: {}", term, err);
    ResultRow::failed(term, "lookup worker terminated unexpectedly")
}
