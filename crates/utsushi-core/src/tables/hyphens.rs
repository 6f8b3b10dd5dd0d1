use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::char_table::parse_key;
use super::TableError;
use crate::char::CharPair;

/// Target charsets a hyphen-like character can be normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HyphensCharset {
    Ascii,
    Jisx0201,
    Jisx0208_90,
    Jisx0208_90Windows,
    Jisx0208Verbatim,
}

impl HyphensCharset {
    pub const DEFAULT_PRECEDENCE: [HyphensCharset; 2] =
        [HyphensCharset::Jisx0208_90Windows, HyphensCharset::Jisx0201];
}

/// Replacements for one source character, per target charset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyphensRecord {
    pub ascii: Option<Vec<CharPair>>,
    pub jisx0201: Option<Vec<CharPair>>,
    pub jisx0208_90: Option<Vec<CharPair>>,
    pub jisx0208_90_windows: Option<Vec<CharPair>>,
    pub jisx0208_verbatim: Option<Vec<CharPair>>,
}

impl HyphensRecord {
    pub fn get(&self, charset: HyphensCharset) -> Option<&[CharPair]> {
        match charset {
            HyphensCharset::Ascii => self.ascii.as_deref(),
            HyphensCharset::Jisx0201 => self.jisx0201.as_deref(),
            HyphensCharset::Jisx0208_90 => self.jisx0208_90.as_deref(),
            HyphensCharset::Jisx0208_90Windows => self.jisx0208_90_windows.as_deref(),
            HyphensCharset::Jisx0208Verbatim => self.jisx0208_verbatim.as_deref(),
        }
    }

    /// First replacement found walking `precedence` in order.
    pub fn resolve(&self, precedence: &[HyphensCharset]) -> Option<&[CharPair]> {
        precedence.iter().find_map(|&c| self.get(c))
    }
}

#[derive(Debug, Clone, Default)]
pub struct HyphensTable {
    records: HashMap<CharPair, HyphensRecord>,
}

impl HyphensTable {
    pub fn get(&self, key: &CharPair) -> Option<&HyphensRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CharPair, &HyphensRecord)> {
        self.records.iter()
    }
}

#[derive(Deserialize)]
struct RawRecord {
    ascii: Option<String>,
    jisx0201: Option<String>,
    jisx0208_90: Option<String>,
    jisx0208_90_windows: Option<String>,
    jisx0208_verbatim: Option<String>,
}

#[derive(Deserialize)]
struct HyphensFile {
    mappings: BTreeMap<String, RawRecord>,
}

pub fn parse_hyphens_toml(toml_str: &str) -> Result<HyphensTable, TableError> {
    const NAME: &str = "hyphens";
    let file: HyphensFile =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
    if file.mappings.is_empty() {
        return Err(TableError::Empty(NAME));
    }

    let split = |v: Option<String>| v.as_deref().map(CharPair::split);
    let mut records = HashMap::with_capacity(file.mappings.len());
    for (key, raw) in file.mappings {
        let record = HyphensRecord {
            ascii: split(raw.ascii),
            jisx0201: split(raw.jisx0201),
            jisx0208_90: split(raw.jisx0208_90),
            jisx0208_90_windows: split(raw.jisx0208_90_windows),
            jisx0208_verbatim: split(raw.jisx0208_verbatim),
        };
        if record == HyphensRecord::default() {
            return Err(TableError::InvalidValue {
                table: NAME,
                key,
                reason: "at least one charset is required".to_string(),
            });
        }
        records.insert(parse_key(NAME, &key)?, record);
    }
    Ok(HyphensTable { records })
}
