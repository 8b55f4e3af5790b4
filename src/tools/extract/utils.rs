use scraper::node::Node;
use scraper::{ElementRef, Selector};

use super::types::{ExtractionGap, OutcomeAnomaly, Side};
use crate::selectors::*;
use crate::types::{MapResult, TeamScore, TeamStatus, UNKNOWN_MAP};

const WON_CLASS: &str = "won";
const PREFORMATTED_CLASS: &str = "preformatted-text";

/// Structural queries over one markup node.
pub trait NodeQuery<'a> {
    /// First descendant matching `selector`, in document order.
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>>;

    /// Every descendant matching `selector`, in document order.
    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>>;

    /// All descendant text, trimmed.
    fn trimmed_text(&self) -> String;

    /// Whether the class attribute contains `class` as a whole token.
    fn has_class_token(&self, class: &str) -> bool;

    /// Text split on newlines and `<br>`, trimmed, blank lines dropped.
    fn text_lines(&self) -> Vec<String>;
}

impl<'a> NodeQuery<'a> for ElementRef<'a> {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }

    fn trimmed_text(&self) -> String {
        self.text().collect::<String>().trim().to_string()
    }

    fn has_class_token(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn text_lines(&self) -> Vec<String> {
        let mut buf = String::new();
        for node in self.descendants() {
            match node.value() {
                Node::Text(text) => buf.push_str(text),
                Node::Element(el) if el.name() == "br" => buf.push('\n'),
                _ => {}
            }
        }
        buf.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Strip a leading marker character ("* Grand final") and the space after it.
pub(super) fn strip_marker(line: &str) -> String {
    let line = line.trim();
    match line.chars().next() {
        Some(c) if !c.is_alphanumeric() && c != '(' => line[c.len_utf8()..].trim_start().to_string(),
        _ => line.to_string(),
    }
}

/// Format label and stage label from the preformatted box.
pub(super) fn format_and_stage(container: &ElementRef, gaps: &mut Vec<ExtractionGap>) -> (String, String) {
    let Some(format_box) = container.find_first(&FORMAT_BOX_SELECTOR) else {
        gaps.push(ExtractionGap::FormatBox);
        return (String::new(), String::new());
    };

    let lines = format_box.text_lines();
    let format = lines.first().cloned().unwrap_or_default();
    let stage = lines.get(1).map(|l| strip_marker(l)).unwrap_or_default();
    (format, stage)
}

/// Veto steps from the padding block that is not the format box.
pub(super) fn veto_steps(container: &ElementRef, gaps: &mut Vec<ExtractionGap>) -> Vec<String> {
    let Some(block) = container
        .find_all(&VETO_PADDING_SELECTOR)
        .into_iter()
        .find(|el| !el.has_class_token(PREFORMATTED_CLASS))
    else {
        gaps.push(ExtractionGap::VetoBox);
        return Vec::new();
    };

    let children: Vec<ElementRef> = block.children().filter_map(ElementRef::wrap).collect();
    if children.is_empty() {
        return block.text_lines();
    }
    children
        .iter()
        .map(|child| child.trimmed_text())
        .filter(|line| !line.is_empty())
        .collect()
}

/// One map holder. `map` is the 1-based position used in gap reports.
pub(super) fn map_result(
    holder: &ElementRef,
    map: usize,
    gaps: &mut Vec<ExtractionGap>,
    anomalies: &mut Vec<OutcomeAnomaly>,
) -> MapResult {
    let map_name = match holder.find_first(&MAP_NAME_SELECTOR) {
        Some(el) => el.trimmed_text(),
        None => {
            gaps.push(ExtractionGap::MapName { map });
            UNKNOWN_MAP.to_string()
        }
    };

    let Some(results) = holder.find_first(&RESULTS_SELECTOR) else {
        gaps.push(ExtractionGap::Results { map });
        return MapResult::unplayed(map_name);
    };

    let team1 = team_score(&results, &RESULTS_LEFT_SELECTOR, map, Side::Left, gaps);
    let team2 = team_score(&results, &RESULTS_RIGHT_SELECTOR, map, Side::Right, gaps);
    let half_time = match results.find_first(&HALF_TIME_SELECTOR) {
        Some(el) => el.trimmed_text(),
        None => {
            gaps.push(ExtractionGap::HalfTime { map });
            String::new()
        }
    };

    match (team1.status, team2.status) {
        (TeamStatus::Won, TeamStatus::Won) => anomalies.push(OutcomeAnomaly::BothWon {
            map,
            map_name: map_name.clone(),
        }),
        (TeamStatus::Lost, TeamStatus::Lost) => anomalies.push(OutcomeAnomaly::NeitherWon {
            map,
            map_name: map_name.clone(),
        }),
        _ => {}
    }

    MapResult {
        map_name,
        team1,
        team2,
        half_time,
    }
}

/// Name, score and won marker of one side. Missing pieces default to empty.
fn team_score(
    results: &ElementRef,
    side_selector: &Selector,
    map: usize,
    side: Side,
    gaps: &mut Vec<ExtractionGap>,
) -> TeamScore {
    let Some(block) = results.find_first(side_selector) else {
        gaps.push(ExtractionGap::TeamBlock { map, side });
        return TeamScore::default();
    };

    let name = match block.find_first(&TEAM_NAME_SELECTOR) {
        Some(el) => el.trimmed_text(),
        None => {
            gaps.push(ExtractionGap::TeamName { map, side });
            String::new()
        }
    };
    let score = match block.find_first(&TEAM_SCORE_SELECTOR) {
        Some(el) => el.trimmed_text(),
        None => {
            gaps.push(ExtractionGap::TeamScore { map, side });
            String::new()
        }
    };
    let status = if block.has_class_token(WON_CLASS) {
        TeamStatus::Won
    } else {
        TeamStatus::Lost
    };

    TeamScore {
        name,
        score,
        status,
    }
}
