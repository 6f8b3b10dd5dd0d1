use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::TableError;
use crate::char::CharPair;

/// One logical character mapped to zero or more replacement characters.
///
/// An empty replacement deletes the character.
#[derive(Debug, Clone, Default)]
pub struct CharTable {
    map: HashMap<CharPair, Box<[CharPair]>>,
}

impl CharTable {
    pub fn get(&self, key: &CharPair) -> Option<&[CharPair]> {
        self.map.get(key).map(|v| &**v)
    }

    pub fn insert(&mut self, key: CharPair, value: Vec<CharPair>) {
        self.map.insert(key, value.into_boxed_slice());
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CharPair, &[CharPair])> {
        self.map.iter().map(|(k, v)| (k, &**v))
    }
}

impl FromIterator<(CharPair, Vec<CharPair>)> for CharTable {
    fn from_iter<I: IntoIterator<Item = (CharPair, Vec<CharPair>)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k, v.into_boxed_slice()))
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct MappingFile {
    mappings: BTreeMap<String, String>,
}

/// Parse a `[mappings]` TOML table of `"key" = "replacement"` strings.
pub fn parse_char_table(name: &'static str, toml_str: &str) -> Result<CharTable, TableError> {
    let file: MappingFile =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
    if file.mappings.is_empty() {
        return Err(TableError::Empty(name));
    }

    let mut table = CharTable::default();
    for (key, value) in &file.mappings {
        table.insert(parse_key(name, key)?, CharPair::split(value));
    }
    Ok(table)
}

pub(super) fn parse_key(table: &'static str, key: &str) -> Result<CharPair, TableError> {
    CharPair::parse_one(key).ok_or_else(|| TableError::InvalidKey {
        table,
        key: key.to_string(),
        reason: "must be exactly one character".to_string(),
    })
}
