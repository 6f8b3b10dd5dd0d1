use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::char_table::parse_key;
use super::TableError;
use crate::char::CharPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircledKind {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CircledEntry {
    /// Text drawn inside the circle or square.
    pub rendering: String,
    pub kind: CircledKind,
    #[serde(default)]
    pub emoji: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CircledTable {
    entries: HashMap<CharPair, CircledEntry>,
}

impl CircledTable {
    pub fn get(&self, key: &CharPair) -> Option<&CircledEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CharPair, &CircledEntry)> {
        self.entries.iter()
    }
}

#[derive(Deserialize)]
struct CircledFile {
    mappings: BTreeMap<String, CircledEntry>,
}

pub fn parse_circled_toml(toml_str: &str) -> Result<CircledTable, TableError> {
    const NAME: &str = "circled_or_squared";
    let file: CircledFile =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
    if file.mappings.is_empty() {
        return Err(TableError::Empty(NAME));
    }

    let mut entries = HashMap::with_capacity(file.mappings.len());
    for (key, entry) in file.mappings {
        if entry.rendering.is_empty() {
            return Err(TableError::InvalidValue {
                table: NAME,
                key,
                reason: "rendering must not be empty".to_string(),
            });
        }
        entries.insert(parse_key(NAME, &key)?, entry);
    }
    Ok(CircledTable { entries })
}
