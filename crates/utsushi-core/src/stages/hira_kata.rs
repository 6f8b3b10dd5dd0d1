use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::TableStream;
use crate::chain::Transliterator;
use crate::char::CharPair;
use crate::stream::BoxStream;
use crate::tables::kana::{KANA_TABLE, SMALL_KANA_TABLE};
use crate::tables::CharTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HiraKataMode {
    #[default]
    HiraToKata,
    KataToHira,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiraKataOptions {
    pub mode: HiraKataMode,
}

/// Converts between hiragana and katakana.
pub struct HiraKata {
    table: &'static CharTable,
}

impl HiraKata {
    pub fn new(options: &HiraKataOptions) -> Self {
        Self {
            table: mapping_table(options.mode),
        }
    }
}

impl Transliterator for HiraKata {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(TableStream::new(input, self.table))
    }

    fn name(&self) -> &'static str {
        "hira-kata"
    }
}

fn mapping_table(mode: HiraKataMode) -> &'static CharTable {
    static HIRA_TO_KATA: OnceLock<CharTable> = OnceLock::new();
    static KATA_TO_HIRA: OnceLock<CharTable> = OnceLock::new();
    let cell = match mode {
        HiraKataMode::HiraToKata => &HIRA_TO_KATA,
        HiraKataMode::KataToHira => &KATA_TO_HIRA,
    };
    cell.get_or_init(|| {
        let table = build_table(mode);
        debug!(?mode, entries = table.len(), "hira-kata table built");
        table
    })
}

fn build_table(mode: HiraKataMode) -> CharTable {
    let mut pairs: Vec<(char, char)> = Vec::new();
    for entry in KANA_TABLE {
        let (h, k) = (entry.hiragana, entry.katakana);
        pairs.push((h.base, k.base));
        // Voiced forms that exist on one side only (ヷ..ヺ) are left alone.
        if let (Some(hv), Some(kv)) = (h.voiced, k.voiced) {
            pairs.push((hv, kv));
        }
        if let (Some(hs), Some(ks)) = (h.semivoiced, k.semivoiced) {
            pairs.push((hs, ks));
        }
    }
    for entry in SMALL_KANA_TABLE {
        pairs.push((entry.hiragana, entry.katakana));
    }

    pairs
        .into_iter()
        .map(|(hira, kata)| match mode {
            HiraKataMode::HiraToKata => (hira, kata),
            HiraKataMode::KataToHira => (kata, hira),
        })
        .map(|(from, to)| (CharPair::new(from), vec![CharPair::new(to)]))
        .collect()
}
