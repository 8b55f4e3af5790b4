use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::types::Identifier;

/// Rendered document for one identifier. A failed fetch is the `Err` arm instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub identifier: Identifier,
    pub html: String,
    /// `<title>` text, empty when the page has none.
    pub title: String,
}

impl RawPage {
    pub fn into_html(self) -> String {
        self.html
    }
}

/// Request identity and limits sent to the rendering proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub proxy_url: String,
    pub max_timeout: Duration,
    pub referer: String,
    pub user_agent: String,
    pub timezone: String,
    pub timezone_cookie: String,
}

impl From<&Config> for ProxySettings {
    fn from(cfg: &Config) -> Self {
        Self {
            proxy_url: cfg.proxy_url.clone(),
            max_timeout: cfg.max_timeout(),
            referer: cfg.referer.clone(),
            user_agent: cfg.user_agent.clone(),
            timezone: cfg.timezone.clone(),
            timezone_cookie: cfg.timezone_cookie.clone(),
        }
    }
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// `request.get` command body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub cmd: String,
    pub url: String,
    pub max_timeout: u64,
}

impl ProxyRequest {
    pub fn get(url: &str, max_timeout: Duration) -> Self {
        Self {
            cmd: "request.get".to_string(),
            url: url.to_string(),
            max_timeout: max_timeout.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub solution: Option<ProxySolution>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxySolution {
    #[serde(default)]
    pub response: Option<String>,
}
