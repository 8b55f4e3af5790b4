use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::Config;
use crate::error::FetchError;
use crate::tools::extract::OutcomeAnomaly;
use crate::types::{Identifier, MatchRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Minimum spacing between requests hitting the proxy. Not adaptive.
    pub pacing: Duration,
    /// In-flight fetch limit. 1 keeps the batch strictly sequential.
    pub concurrency: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for BatchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            pacing: cfg.pacing(),
            concurrency: cfg.concurrency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub identifier: Identifier,
    pub error: FetchError,
}

/// Everything a batch produced. `records` covers every distinct identifier.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub requested: usize,
    pub records: HashMap<Identifier, MatchRecord>,
    pub failures: Vec<BatchFailure>,
    /// Missing sections across all pages.
    pub gaps: usize,
    pub anomalies: Vec<(Identifier, OutcomeAnomaly)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchOutcome {
    pub fn distinct(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records.len().saturating_sub(self.failures.len())
    }
}
