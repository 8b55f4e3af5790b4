use scraper::Html;

use super::types::{ProxyResponse, RawPage};
use crate::error::FetchError;
use crate::selectors::TITLE_SELECTOR;
use crate::types::Identifier;

const STATUS_OK: &str = "ok";

/// Turn a decoded proxy payload into a page or an upstream failure.
pub(super) fn page_from_response(
    identifier: &Identifier,
    response: ProxyResponse,
) -> Result<RawPage, FetchError> {
    if response.status != STATUS_OK {
        let status = if response.status.is_empty() {
            "missing".to_string()
        } else {
            response.status
        };
        return Err(FetchError::upstream(
            identifier.as_str(),
            status,
            response.message,
        ));
    }

    let html = response
        .solution
        .and_then(|s| s.response)
        .ok_or_else(|| {
            FetchError::upstream(
                identifier.as_str(),
                STATUS_OK,
                Some("solution.response missing".to_string()),
            )
        })?;

    Ok(RawPage {
        identifier: identifier.clone(),
        title: page_title(&html),
        html,
    })
}

/// Trimmed `<title>` text.
pub(crate) fn page_title(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
