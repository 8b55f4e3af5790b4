use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::MatchRecord;

/// Which side of a results block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// A section the page did not have. Degraded data, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ExtractionGap {
    MatchContainer,
    FormatBox,
    VetoBox,
    MapName { map: usize },
    Results { map: usize },
    TeamBlock { map: usize, side: Side },
    TeamName { map: usize, side: Side },
    TeamScore { map: usize, side: Side },
    HalfTime { map: usize },
}

impl fmt::Display for ExtractionGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionGap::MatchContainer => write!(f, "match container"),
            ExtractionGap::FormatBox => write!(f, "format box"),
            ExtractionGap::VetoBox => write!(f, "veto box"),
            ExtractionGap::MapName { map } => write!(f, "map {map} name"),
            ExtractionGap::Results { map } => write!(f, "map {map} results"),
            ExtractionGap::TeamBlock { map, side } => write!(f, "map {map} {side:?} team block"),
            ExtractionGap::TeamName { map, side } => write!(f, "map {map} {side:?} team name"),
            ExtractionGap::TeamScore { map, side } => write!(f, "map {map} {side:?} team score"),
            ExtractionGap::HalfTime { map } => write!(f, "map {map} half-time score"),
        }
    }
}

/// Results block whose won markers do not name exactly one winner.
///
/// Statuses are kept as marked; the anomaly is only reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeAnomaly {
    BothWon { map: usize, map_name: String },
    NeitherWon { map: usize, map_name: String },
}

impl fmt::Display for OutcomeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeAnomaly::BothWon { map, map_name } => {
                write!(f, "map {map} ({map_name}): both sides marked won")
            }
            OutcomeAnomaly::NeitherWon { map, map_name } => {
                write!(f, "map {map} ({map_name}): neither side marked won")
            }
        }
    }
}

/// Record plus what was missing or odd on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub record: MatchRecord,
    pub gaps: Vec<ExtractionGap>,
    pub anomalies: Vec<OutcomeAnomaly>,
}

impl Extraction {
    pub fn into_record(self) -> MatchRecord {
        self.record
    }
}
