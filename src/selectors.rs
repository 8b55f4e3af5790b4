//! Shared Selectors
//!
//! Match pages keep maps, veto and format inside one `div.g-grid.maps` grid.

use once_cell::sync::Lazy;
use scraper::Selector;

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid static selector")
}

/// Selector for `<title>` tags.
pub static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| sel("title"));

/// Container holding veto boxes and map holders.
pub static MATCH_CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| sel("div.g-grid.maps"));

/// Format/stage block ("Best of 3 (LAN)\n\n* Grand final").
pub static FORMAT_BOX_SELECTOR: Lazy<Selector> =
    Lazy::new(|| sel(".veto-box .preformatted-text"));

/// Padding blocks inside veto boxes; the veto list is the one that is not preformatted.
pub static VETO_PADDING_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".veto-box .padding"));

pub static MAP_HOLDER_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".mapholder"));

pub static MAP_NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".mapname"));

pub static RESULTS_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".results"));

/// Left side is a `div`, right side is usually a `span`; match on class only.
pub static RESULTS_LEFT_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".results-left"));

pub static RESULTS_RIGHT_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".results-right"));

pub static TEAM_NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".results-teamname"));

pub static TEAM_SCORE_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".results-team-score"));

pub static HALF_TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".results-center-half-score"));
