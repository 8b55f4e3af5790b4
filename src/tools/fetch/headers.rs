use super::types::ProxySettings;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER, USER_AGENT};

/// Browser-like identity plus the locale cookie for every proxy request.
pub(crate) fn headers_for_settings(settings: &ProxySettings) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&settings.user_agent)
            .unwrap_or(HeaderValue::from_static("Mozilla/5.0")),
    );

    // Skip invalid referer values silently; the proxy does not require one
    if let Ok(referer) = HeaderValue::from_str(&settings.referer) {
        headers.insert(REFERER, referer);
    }

    let cookie = format!("{}={}", settings.timezone_cookie, settings.timezone);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(COOKIE, value);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_carry_identity_and_locale() {
        let headers = headers_for_settings(&ProxySettings::default());
        assert_eq!(
            headers.get("referer").and_then(|v| v.to_str().ok()),
            Some("https://www.hltv.org/stats")
        );
        assert!(headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ua| ua.starts_with("Mozilla/5.0")));
        assert_eq!(
            headers.get("cookie").and_then(|v| v.to_str().ok()),
            Some("hltvTimeZone=Europe/Copenhagen")
        );
    }

    #[test]
    fn bad_referer_is_dropped() {
        let settings = ProxySettings {
            referer: "bad\nvalue".into(),
            ..Default::default()
        };
        let headers = headers_for_settings(&settings);
        assert!(!headers.contains_key("referer"));
        assert!(headers.contains_key("user-agent"));
    }
}
