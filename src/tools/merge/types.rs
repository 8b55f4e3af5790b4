use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Identifier;

/// Key holding the identifier in every dataset entry.
pub const IDENTIFIER_FIELD: &str = "url";

/// One dataset entry. Key order is preserved through load and save.
pub type Entry = Map<String, Value>;

/// Ordered results dataset. Entries may repeat an identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(pub Vec<Entry>);

impl Dataset {
    /// Validate a parsed document: an array of objects, each with a string `url`.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let Value::Array(items) = value else {
            return Err("expected a JSON array of match entries".to_string());
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(entry) => match entry.get(IDENTIFIER_FIELD) {
                    Some(Value::String(_)) => Ok(entry),
                    Some(_) => Err(format!("entry {idx}: `{IDENTIFIER_FIELD}` is not a string")),
                    None => Err(format!("entry {idx}: missing `{IDENTIFIER_FIELD}`")),
                },
                _ => Err(format!("entry {idx}: not an object")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Dataset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    /// Identifier of every entry in order, duplicates included.
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.0.iter().filter_map(entry_identifier).collect()
    }
}

pub fn entry_identifier(entry: &Entry) -> Option<Identifier> {
    entry
        .get(IDENTIFIER_FIELD)
        .and_then(Value::as_str)
        .map(Identifier::from)
}
