mod client;
mod headers;
mod utils;

pub mod types;

// Re-export types for public use
pub use types::*;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::types::Identifier;

/// Source of rendered match pages.
///
/// One call is one outbound request. Implementations never retry; the batch
/// decides what a failure means.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_page(&self, identifier: &Identifier) -> Result<RawPage, FetchError>;
}

/// Fetcher that asks a FlareSolverr-style proxy to render the page.
pub struct ProxyFetcher {
    client: Client,
    settings: ProxySettings,
}

impl ProxyFetcher {
    pub fn new(settings: ProxySettings) -> Result<Self, FetchError> {
        let client =
            client::build_client(&settings).map_err(|e| FetchError::transport(&settings.proxy_url, &e))?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    fn name(&self) -> &'static str {
        "rendering-proxy"
    }

    async fn fetch_page(&self, identifier: &Identifier) -> Result<RawPage, FetchError> {
        let url = identifier.to_url()?;
        let start = Instant::now();
        debug!(url = %url, proxy = %self.settings.proxy_url, "requesting render");

        let body = ProxyRequest::get(url.as_str(), self.settings.max_timeout);
        let response = self
            .client
            .post(&self.settings.proxy_url)
            .headers(headers::headers_for_settings(&self.settings))
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::transport(identifier.as_str(), &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = (!text.trim().is_empty()).then(|| text.trim().to_string());
            warn!(url = %identifier, status = status.as_u16(), "proxy returned non-success status");
            return Err(FetchError::upstream(identifier.as_str(), status.as_u16(), message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::transport(identifier.as_str(), &e))?;
        let decoded: ProxyResponse = serde_json::from_str(&text).map_err(|e| {
            FetchError::upstream(
                identifier.as_str(),
                "malformed",
                Some(format!("undecodable proxy payload: {e}")),
            )
        })?;

        let page = utils::page_from_response(identifier, decoded)?;
        debug!(
            url = %identifier,
            title = %page.title,
            bytes = page.html.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "rendered page"
        );
        Ok(page)
    }
}

/// Fetch one page with default proxy settings.
///
/// # Examples
/// ```no_run
/// use hltv_results::tools::fetch::fetch_page;
/// use hltv_results::Identifier;
///
/// # async fn example() -> Result<(), hltv_results::FetchError> {
/// let id = Identifier::new("https://www.hltv.org/matches/2370000/a-vs-b");
/// let page = fetch_page(&id).await?;
/// println!("{}", page.title);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page(identifier: &Identifier) -> Result<RawPage, FetchError> {
    ProxyFetcher::new(ProxySettings::default())?
        .fetch_page(identifier)
        .await
}
