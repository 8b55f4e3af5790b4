pub mod types;
mod utils;

pub use types::*;
pub use utils::NodeQuery;
use utils::*;

use crate::selectors::{MAP_HOLDER_SELECTOR, MATCH_CONTAINER_SELECTOR};
use crate::types::{Identifier, MatchRecord};
use scraper::Html;

/// Extract format, stage, veto and maps from a rendered match page.
///
/// Never fails: a page without the maps grid (older reports predate it) gives
/// an empty record.
///
/// # Examples
/// ```
/// use hltv_results::tools::extract::extract_match;
/// use hltv_results::Identifier;
///
/// let record = extract_match(&Identifier::new("https://www.hltv.org/matches/1/x"), "<html></html>");
/// assert!(record.is_empty());
/// ```
pub fn extract_match(identifier: &Identifier, html: &str) -> MatchRecord {
    extract_match_detailed(identifier, html).into_record()
}

/// Same as [`extract_match`], also reporting missing sections and outcome anomalies.
pub fn extract_match_detailed(identifier: &Identifier, html: &str) -> Extraction {
    let doc = Html::parse_document(html);
    let mut record = MatchRecord::empty(identifier.clone());
    let mut gaps = Vec::new();
    let mut anomalies = Vec::new();

    let Some(container) = doc.select(&MATCH_CONTAINER_SELECTOR).next() else {
        gaps.push(ExtractionGap::MatchContainer);
        return Extraction {
            record,
            gaps,
            anomalies,
        };
    };

    let (format, stage) = format_and_stage(&container, &mut gaps);
    record.format = format;
    record.stage = stage;
    record.veto = veto_steps(&container, &mut gaps);
    record.maps = container
        .find_all(&MAP_HOLDER_SELECTOR)
        .iter()
        .enumerate()
        .map(|(idx, holder)| map_result(holder, idx + 1, &mut gaps, &mut anomalies))
        .collect();

    Extraction {
        record,
        gaps,
        anomalies,
    }
}
