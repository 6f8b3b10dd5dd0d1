use serde::{Deserialize, Serialize};

use super::TableError;
use crate::char::CharPair;

/// Charset profile that decides which plain code point a variation
/// sequence resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
    #[serde(rename = "unijis_90")]
    Unijis90,
    #[default]
    #[serde(rename = "unijis_2004")]
    Unijis2004,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IvsSvsRecord {
    pub ivs: CharPair,
    pub svs: Option<CharPair>,
    pub base90: Option<char>,
    pub base2004: Option<char>,
}

impl IvsSvsRecord {
    pub fn base(&self, charset: Charset) -> Option<char> {
        match charset {
            Charset::Unijis90 => self.base90,
            Charset::Unijis2004 => self.base2004,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    ivs: String,
    svs: Option<String>,
    base90: Option<String>,
    base2004: Option<String>,
}

#[derive(Deserialize)]
struct IvsSvsFile {
    records: Vec<RawRecord>,
}

pub fn parse_ivs_svs_toml(toml_str: &str) -> Result<Vec<IvsSvsRecord>, TableError> {
    let file: IvsSvsFile =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
    if file.records.is_empty() {
        return Err(TableError::Empty(NAME));
    }

    let mut records = Vec::with_capacity(file.records.len());
    for raw in &file.records {
        let parse_opt_base = |v: &Option<String>| {
            v.as_deref()
                .map(|s| parse_base(&raw.ivs, s))
                .transpose()
        };
        records.push(IvsSvsRecord {
            ivs: parse_sequence(&raw.ivs, &raw.ivs)?,
            svs: raw
                .svs
                .as_deref()
                .map(|s| parse_sequence(&raw.ivs, s))
                .transpose()?,
            base90: parse_opt_base(&raw.base90)?,
            base2004: parse_opt_base(&raw.base2004)?,
        });
    }
    Ok(records)
}

const NAME: &str = "ivs_svs_base";

fn parse_sequence(key: &str, s: &str) -> Result<CharPair, TableError> {
    match CharPair::parse_one(s) {
        Some(pair) if pair.selector.is_some() => Ok(pair),
        _ => Err(TableError::InvalidValue {
            table: NAME,
            key: key.to_string(),
            reason: format!("{s:?} is not a variation sequence"),
        }),
    }
}

fn parse_base(key: &str, s: &str) -> Result<char, TableError> {
    match CharPair::parse_one(s).and_then(|p| p.plain()) {
        Some(c) => Ok(c),
        None => Err(TableError::InvalidValue {
            table: NAME,
            key: key.to_string(),
            reason: format!("base {s:?} must be a single code point"),
        }),
    }
}
