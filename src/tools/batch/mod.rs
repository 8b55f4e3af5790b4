//! Batch Tools

mod pacer;
pub mod types;

pub use types::*;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::tools::extract::{extract_match_detailed, Extraction};
use crate::tools::fetch::PageFetcher;
use crate::types::{Identifier, MatchRecord};
use pacer::Pacer;

/// Fetch and extract every distinct identifier once.
///
/// A failed fetch is logged and recorded as an empty record, so the outcome
/// always has one record per distinct identifier. Dispatches are spaced by
/// `options.pacing`, and every finished fetch is followed by the same rest,
/// whether it succeeded or not.
pub async fn scrape_batch<F>(
    identifiers: Vec<Identifier>,
    fetcher: &F,
    options: &BatchOptions,
) -> BatchOutcome
where
    F: PageFetcher + ?Sized,
{
    let started_at = Utc::now();
    let requested = identifiers.len();
    let distinct: Vec<Identifier> = crate::dedupe!(identifiers);
    info!(
        requested,
        distinct = distinct.len(),
        fetcher = fetcher.name(),
        "starting batch"
    );

    let pacer = Pacer::new(options.pacing);
    let results: Vec<(Identifier, Result<Extraction, FetchError>)> = stream::iter(distinct)
        .map(|identifier| scrape_one(identifier, fetcher, &pacer))
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    let mut records = HashMap::with_capacity(results.len());
    let mut failures = Vec::new();
    let mut gaps = 0;
    let mut anomalies = Vec::new();

    for (identifier, result) in results {
        let record = match result {
            Ok(extraction) => {
                gaps += extraction.gaps.len();
                anomalies.extend(
                    extraction
                        .anomalies
                        .into_iter()
                        .map(|a| (identifier.clone(), a)),
                );
                extraction.record
            }
            Err(error) => {
                failures.push(BatchFailure {
                    identifier: identifier.clone(),
                    error,
                });
                MatchRecord::empty(identifier.clone())
            }
        };
        records.insert(identifier, record);
    }

    let outcome = BatchOutcome {
        requested,
        records,
        failures,
        gaps,
        anomalies,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        distinct = outcome.distinct(),
        succeeded = outcome.succeeded(),
        failed = outcome.failed(),
        gaps = outcome.gaps,
        "batch finished"
    );
    outcome
}

async fn scrape_one<F>(
    identifier: Identifier,
    fetcher: &F,
    pacer: &Pacer,
) -> (Identifier, Result<Extraction, FetchError>)
where
    F: PageFetcher + ?Sized,
{
    pacer.wait().await;

    let fetched = fetcher.fetch_page(&identifier).await;
    pacer.done().await;

    let page = match fetched {
        Ok(page) => page,
        Err(error) => {
            warn!(url = %identifier, kind = error.kind(), error = %error, "fetch failed, recording empty record");
            return (identifier, Err(error));
        }
    };

    let extraction = extract_match_detailed(&identifier, &page.html);
    for gap in &extraction.gaps {
        debug!(url = %identifier, gap = %gap, "section missing");
    }
    for anomaly in &extraction.anomalies {
        warn!(url = %identifier, anomaly = %anomaly, "ambiguous map outcome");
    }
    debug!(
        url = %identifier,
        title = %page.title,
        maps = extraction.record.maps.len(),
        veto = extraction.record.veto.len(),
        "extracted"
    );

    (identifier, Ok(extraction))
}
