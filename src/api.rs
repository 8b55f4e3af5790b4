use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::store::{load_dataset, save_dataset};
use crate::tools::batch::{scrape_batch, BatchOptions, BatchOutcome};
use crate::tools::fetch::{PageFetcher, ProxyFetcher, ProxySettings};
use crate::tools::merge::{merge_records, Dataset};

/// One identifier that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub url: String,
    pub kind: String,
    pub reason: String,
}

/// Summary of one enrichment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub entries: usize,
    pub distinct: usize,
    pub succeeded: usize,
    pub failed: Vec<FailureReport>,
    pub gaps: usize,
    pub anomalies: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    fn new(input: &Path, output: &Path, dataset: &Dataset, outcome: &BatchOutcome) -> Self {
        let mut failed: Vec<FailureReport> = outcome
            .failures
            .iter()
            .map(|f| FailureReport {
                url: f.identifier.to_string(),
                kind: f.error.kind().to_string(),
                reason: f.error.to_string(),
            })
            .collect();
        failed.sort_by(|a, b| a.url.cmp(&b.url));

        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            entries: dataset.len(),
            distinct: outcome.distinct(),
            succeeded: outcome.succeeded(),
            failed,
            gaps: outcome.gaps,
            anomalies: outcome
                .anomalies
                .iter()
                .map(|(id, a)| format!("{id}: {a}"))
                .collect(),
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
        }
    }
}

/// Scrape every identifier in `dataset` and merge the results back in.
pub async fn enrich<F>(
    dataset: &Dataset,
    fetcher: &F,
    options: &BatchOptions,
) -> (Dataset, BatchOutcome)
where
    F: PageFetcher + ?Sized,
{
    let outcome = scrape_batch(dataset.identifiers(), fetcher, options).await;
    let merged = merge_records(dataset, &outcome.records);
    (merged, outcome)
}

/// Load `input`, enrich it through the rendering proxy, write `output`.
///
/// Fails before any request if the input does not load or the config is
/// invalid. Per-page failures never fail the run.
pub async fn enrich_file(input: &Path, output: &Path, config: &Config) -> Result<RunReport> {
    config.validate()?;
    let dataset = load_dataset(input)?;
    let fetcher = ProxyFetcher::new(ProxySettings::from(config))?;
    enrich_file_with(input, output, &dataset, &fetcher, &BatchOptions::from(config)).await
}

/// [`enrich_file`] with an already loaded dataset and any fetcher.
pub async fn enrich_file_with<F>(
    input: &Path,
    output: &Path,
    dataset: &Dataset,
    fetcher: &F,
    options: &BatchOptions,
) -> Result<RunReport>
where
    F: PageFetcher + ?Sized,
{
    let (merged, outcome) = enrich(dataset, fetcher, options).await;
    save_dataset(output, &merged)?;

    let report = RunReport::new(input, output, dataset, &outcome);
    info!(
        output = %output.display(),
        entries = report.entries,
        succeeded = report.succeeded,
        failed = report.failed.len(),
        "dataset written"
    );
    Ok(report)
}
