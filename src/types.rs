use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::FetchError;

/// Map name used when a map holder carries no name element.
pub const UNKNOWN_MAP: &str = "Unknown";

/// Dataset keys written by the extractor. Every other key belongs to someone else.
pub const EXTRACTION_FIELDS: [&str; 4] = ["format", "stage", "veto", "maps"];

/// Opaque key naming one match report (the match page URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Identifier(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve to an absolute http(s) URL the proxy can render.
    pub fn to_url(&self) -> Result<Url, FetchError> {
        let url = Url::parse(&self.0).map_err(|e| FetchError::InvalidIdentifier {
            identifier: self.0.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::InvalidIdentifier {
                identifier: self.0.clone(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier(s)
    }
}

/// Outcome marker of one side on one map. Taken from the markup, never from the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    Won,
    #[default]
    Lost,
}

/// One team's line on a map. `score` is raw text so placeholders like "-" survive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub score: String,
    pub status: TeamStatus,
}

/// One map of a series, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapResult {
    pub map_name: String,
    pub team1: TeamScore,
    pub team2: TeamScore,
    pub half_time: String,
}

impl Default for MapResult {
    fn default() -> Self {
        Self {
            map_name: UNKNOWN_MAP.to_string(),
            team1: TeamScore::default(),
            team2: TeamScore::default(),
            half_time: String::new(),
        }
    }
}

impl MapResult {
    /// Map with a name but no results block (unplayed or forfeited).
    pub fn unplayed(map_name: impl Into<String>) -> Self {
        Self {
            map_name: map_name.into(),
            ..Default::default()
        }
    }

    pub fn is_played(&self) -> bool {
        self.team1 != TeamScore::default() || self.team2 != TeamScore::default()
    }
}

/// Structured extraction result for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub url: Identifier,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub veto: Vec<String>,
    #[serde(default)]
    pub maps: Vec<MapResult>,
}

impl MatchRecord {
    /// Record with every extraction-owned field empty.
    pub fn empty(url: Identifier) -> Self {
        Self {
            url,
            format: String::new(),
            stage: String::new(),
            veto: Vec::new(),
            maps: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.format.is_empty()
            && self.stage.is_empty()
            && self.veto.is_empty()
            && self.maps.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
