//! Run Configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{Result, ResultsError};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:8191/v1";
pub const DEFAULT_MAX_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_PACING_MS: u64 = 1_000;
pub const DEFAULT_REFERER: &str = "https://www.hltv.org/stats";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
pub const DEFAULT_TIMEZONE: &str = "Europe/Copenhagen";
pub const DEFAULT_TIMEZONE_COOKIE: &str = "hltvTimeZone";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Rendering proxy endpoint (FlareSolverr-compatible).
    pub proxy_url: String,
    /// Upper bound the proxy may spend rendering one page.
    pub max_timeout_ms: u64,
    /// Minimum spacing between two requests hitting the proxy.
    pub pacing_ms: u64,
    pub concurrency: usize,
    pub referer: String,
    pub user_agent: String,
    /// Rendering locale forwarded as a cookie so dates render consistently.
    pub timezone: String,
    pub timezone_cookie: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            max_timeout_ms: DEFAULT_MAX_TIMEOUT_MS,
            pacing_ms: DEFAULT_PACING_MS,
            concurrency: 1,
            referer: DEFAULT_REFERER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timezone_cookie: DEFAULT_TIMEZONE_COOKIE.to_string(),
        }
    }
}

impl Config {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ResultsError::Config(format!("{}: {e}", path.display())))?;
        let cfg: Config = serde_json::from_str(&raw)
            .map_err(|e| ResultsError::Config(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `config.json` from the platform config dir, or defaults when there is none.
    pub fn load_default() -> Result<Self> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(ResultsError::Config("concurrency must be at least 1".into()));
        }
        Url::parse(&self.proxy_url)
            .map_err(|e| ResultsError::Config(format!("proxy url {:?}: {e}", self.proxy_url)))?;
        if self.timezone.trim().is_empty() {
            return Err(ResultsError::Config("timezone must not be empty".into()));
        }
        Ok(())
    }

    pub fn max_timeout(&self) -> Duration {
        Duration::from_millis(self.max_timeout_ms)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Where `load_default` looks.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "hltv-results", "hltv-results")
        .map(|proj| proj.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_values() {
        let cfg = Config::default();
        assert_eq!(cfg.proxy_url, "http://localhost:8191/v1");
        assert_eq!(cfg.max_timeout_ms, 60_000);
        assert_eq!(cfg.pacing(), Duration::from_secs(1));
        assert_eq!(cfg.concurrency, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pacingMs": 250, "timezone": "UTC"}}"#).unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.pacing_ms, 250);
        assert_eq!(cfg.timezone, "UTC");
        assert_eq!(cfg.proxy_url, DEFAULT_PROXY_URL);
    }

    #[test]
    fn rejects_zero_concurrency() {
        let cfg = Config {
            concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ResultsError::Config(_))));
    }

    #[test]
    fn rejects_bad_proxy_url() {
        let cfg = Config {
            proxy_url: "not a url".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ nope").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ResultsError::Config(_))
        ));
    }
}
