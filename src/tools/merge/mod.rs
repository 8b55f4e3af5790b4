mod tests;
pub mod types;

pub use types::*;

use serde_json::Value;
use std::collections::HashMap;

use crate::types::{Identifier, MatchRecord, EXTRACTION_FIELDS};

/// Write extracted fields into a copy of `dataset`.
///
/// Same length, same order. Only the [`EXTRACTION_FIELDS`] keys are added or
/// overwritten; entries without a record pass through untouched.
pub fn merge_records(dataset: &Dataset, records: &HashMap<Identifier, MatchRecord>) -> Dataset {
    Dataset(
        dataset
            .entries()
            .iter()
            .map(|entry| {
                let mut entry = entry.clone();
                if let Some(record) = entry_identifier(&entry).and_then(|id| records.get(&id)) {
                    apply_record(&mut entry, record);
                }
                entry
            })
            .collect(),
    )
}

/// Set the extraction-owned keys of one entry. Existing keys keep their position.
pub fn apply_record(entry: &mut Entry, record: &MatchRecord) {
    for (key, value) in record_fields(record) {
        entry.insert(key.to_string(), value);
    }
}

fn record_fields(record: &MatchRecord) -> [(&'static str, Value); 4] {
    let [format, stage, veto, maps] = EXTRACTION_FIELDS;
    [
        (format, Value::String(record.format.clone())),
        (stage, Value::String(record.stage.clone())),
        (
            veto,
            Value::Array(record.veto.iter().cloned().map(Value::String).collect()),
        ),
        (
            maps,
            serde_json::to_value(&record.maps).unwrap_or_else(|_| Value::Array(Vec::new())),
        ),
    ]
}
