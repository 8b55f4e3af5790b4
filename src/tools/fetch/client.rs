use super::types::ProxySettings;
use reqwest::Client;
use std::time::Duration;

/// Extra time on top of `maxTimeout` so the proxy reports its own timeout first.
const TIMEOUT_SLACK_MS: u64 = 5_000;
const CONNECT_TIMEOUT_SEC: u64 = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

pub(crate) fn client_timeout(settings: &ProxySettings) -> Duration {
    settings.max_timeout + Duration::from_millis(TIMEOUT_SLACK_MS)
}

/// Build the reqwest client used to talk to the rendering proxy.
pub(crate) fn build_client(settings: &ProxySettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(client_timeout(settings))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SEC))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .build()
}
