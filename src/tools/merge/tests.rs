#[cfg(test)]
mod tests {
    use crate::tools::merge::*;
    use crate::types::{Identifier, MapResult, MatchRecord, TeamScore, TeamStatus, EXTRACTION_FIELDS};
    use serde_json::json;
    use std::collections::HashMap;

    fn dataset(value: serde_json::Value) -> Dataset {
        Dataset::from_value(value).unwrap()
    }

    fn record(url: &str) -> MatchRecord {
        MatchRecord {
            url: Identifier::from(url),
            format: "Best of 3 (LAN)".into(),
            stage: "Semi-final".into(),
            veto: vec!["1. A removed Nuke".into(), "2. B removed Anubis".into()],
            maps: vec![MapResult {
                map_name: "Mirage".into(),
                team1: TeamScore {
                    name: "A".into(),
                    score: "13".into(),
                    status: TeamStatus::Won,
                },
                team2: TeamScore {
                    name: "B".into(),
                    score: "9".into(),
                    status: TeamStatus::Lost,
                },
                half_time: "(8:4; 5:5)".into(),
            }],
        }
    }

    fn records(urls: &[&str]) -> HashMap<Identifier, MatchRecord> {
        urls.iter()
            .map(|u| (Identifier::from(*u), record(u)))
            .collect()
    }

    #[test]
    fn sets_owned_fields_and_keeps_the_rest() {
        let input = dataset(json!([
            {"url": "A", "team1": "Alpha", "team2": "Bravo", "date": "2024-05-01", "event_id": 7001}
        ]));
        let merged = merge_records(&input, &records(&["A"]));

        let entry = &merged.entries()[0];
        assert_eq!(entry["team1"], json!("Alpha"));
        assert_eq!(entry["event_id"], json!(7001));
        assert_eq!(entry["format"], json!("Best of 3 (LAN)"));
        assert_eq!(entry["stage"], json!("Semi-final"));
        assert_eq!(entry["veto"], json!(["1. A removed Nuke", "2. B removed Anubis"]));
        assert_eq!(
            entry["maps"],
            json!([{
                "map_name": "Mirage",
                "team1": {"name": "A", "score": "13", "status": "won"},
                "team2": {"name": "B", "score": "9", "status": "lost"},
                "half_time": "(8:4; 5:5)"
            }])
        );
    }

    #[test]
    fn foreign_fields_are_identical_after_merge() {
        let input = dataset(json!([
            {"url": "A", "team1": "Alpha", "nested": {"x": [1, 2, {"y": null}]}, "format": "stale"},
            {"url": "B", "score": "2-1"}
        ]));
        let merged = merge_records(&input, &records(&["A", "B"]));

        for (before, after) in input.entries().iter().zip(merged.entries()) {
            for (key, value) in before {
                if EXTRACTION_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                assert_eq!(after.get(key), Some(value), "field {key} changed");
            }
        }
    }

    #[test]
    fn key_order_is_preserved() {
        let input = dataset(json!([{"maps": [], "url": "A", "winner": "Alpha"}]));
        let merged = merge_records(&input, &records(&["A"]));

        let keys: Vec<&str> = merged.entries()[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["maps", "url", "winner", "format", "stage", "veto"]);
    }

    #[test]
    fn merge_writes_exactly_the_extraction_fields() {
        let input = dataset(json!([{"url": "A"}]));
        let merged = merge_records(&input, &records(&["A"]));

        let added: Vec<&str> = merged.entries()[0]
            .keys()
            .map(String::as_str)
            .filter(|k| *k != "url")
            .collect();
        assert_eq!(added, EXTRACTION_FIELDS.to_vec());
    }

    #[test]
    fn merge_is_idempotent() {
        let input = dataset(json!([{"url": "A", "x": 1}, {"url": "B"}, {"url": "A"}]));
        let recs = records(&["A", "B"]);

        let once = merge_records(&input, &recs);
        let twice = merge_records(&once, &recs);
        assert_eq!(once, twice);
    }

    #[test]
    fn length_and_order_preserved_with_duplicates() {
        let input = dataset(json!([{"url": "A", "i": 0}, {"url": "B", "i": 1}, {"url": "A", "i": 2}]));
        let merged = merge_records(&input, &records(&["A", "B"]));

        assert_eq!(merged.len(), 3);
        let order: Vec<(String, i64)> = merged
            .entries()
            .iter()
            .map(|e| (e["url"].as_str().unwrap().to_string(), e["i"].as_i64().unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![("A".into(), 0), ("B".into(), 1), ("A".into(), 2)]
        );
        assert_eq!(merged.entries()[0]["maps"], merged.entries()[2]["maps"]);
        assert_eq!(merged.entries()[0]["veto"], merged.entries()[2]["veto"]);
    }

    #[test]
    fn entries_without_record_pass_through() {
        let input = dataset(json!([{"url": "A"}, {"url": "Z", "note": "kept"}]));
        let merged = merge_records(&input, &records(&["A"]));

        assert_eq!(merged.entries()[1], input.entries()[1]);
        assert!(!merged.entries()[1].contains_key("format"));
    }

    #[test]
    fn empty_record_clears_owned_fields() {
        let input = dataset(json!([{"url": "C", "format": "Best of 1", "maps": [1]}]));
        let mut recs = HashMap::new();
        recs.insert(Identifier::from("C"), MatchRecord::empty(Identifier::from("C")));

        let merged = merge_records(&input, &recs);
        let entry = &merged.entries()[0];
        assert_eq!(entry["format"], json!(""));
        assert_eq!(entry["stage"], json!(""));
        assert_eq!(entry["veto"], json!([]));
        assert_eq!(entry["maps"], json!([]));
    }

    #[test]
    fn identifiers_in_entry_order() {
        let input = dataset(json!([{"url": "A"}, {"url": "B"}, {"url": "A"}]));
        let ids: Vec<String> = input.identifiers().into_iter().map(|i| i.0).collect();
        assert_eq!(ids, vec!["A", "B", "A"]);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(Dataset::from_value(json!({"url": "A"})).is_err());
        assert!(Dataset::from_value(json!([1, 2])).is_err());
        assert!(Dataset::from_value(json!([{"team": "A"}]))
            .unwrap_err()
            .contains("missing `url`"));
        assert!(Dataset::from_value(json!([{"url": 5}])).is_err());
        assert!(Dataset::from_value(json!([])).unwrap().is_empty());
    }
}
