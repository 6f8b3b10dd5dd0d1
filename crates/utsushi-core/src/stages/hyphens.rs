use serde::{Deserialize, Serialize};

use super::table::TableStream;
use crate::chain::Transliterator;
use crate::stream::BoxStream;
use crate::tables::{hyphens, CharTable, HyphensCharset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyphensOptions {
    /// Target charsets, tried in order. Empty means the default order.
    pub precedence: Vec<HyphensCharset>,
}

impl Default for HyphensOptions {
    fn default() -> Self {
        Self {
            precedence: HyphensCharset::DEFAULT_PRECEDENCE.to_vec(),
        }
    }
}

/// Normalizes hyphens and dashes to the first target charset that has a
/// mapping for them.
pub struct Hyphens {
    table: CharTable,
}

impl Hyphens {
    pub fn new(options: &HyphensOptions) -> Self {
        let precedence: &[HyphensCharset] = if options.precedence.is_empty() {
            &HyphensCharset::DEFAULT_PRECEDENCE
        } else {
            &options.precedence
        };
        let table = hyphens()
            .iter()
            .filter_map(|(key, record)| {
                let replacement = record.resolve(precedence)?;
                Some((*key, replacement.to_vec()))
            })
            .collect();
        Self { table }
    }
}

impl Transliterator for Hyphens {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(TableStream::new(input, &self.table))
    }

    fn name(&self) -> &'static str {
        "hyphens"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing::{assert_offsets, run};

    fn stage(precedence: Vec<HyphensCharset>) -> Hyphens {
        Hyphens::new(&HyphensOptions { precedence })
    }

    #[test]
    fn ascii_precedence() {
        let s = stage(vec![HyphensCharset::Ascii]);
        assert_eq!(run(&s, "a—b―c"), "a-b-c");
        assert_eq!(run(&s, "x⸺y"), "x--y");
        assert_offsets(&s, "x⸺y");
    }

    #[test]
    fn falls_through_to_next_charset() {
        // No ascii mapping for the double vertical line.
        let s = stage(vec![HyphensCharset::Ascii, HyphensCharset::Jisx0208_90]);
        assert_eq!(run(&s, "‖-"), "‖-");
        assert_eq!(run(&s, "∥"), "‖");
    }

    #[test]
    fn unmapped_in_all_charsets_passes_through() {
        let s = stage(vec![HyphensCharset::Ascii]);
        assert_eq!(run(&s, "‖"), "‖");
        assert_eq!(run(&s, "漢"), "漢");
    }

    #[test]
    fn default_precedence() {
        let s = Hyphens::new(&HyphensOptions::default());
        assert_eq!(run(&s, "〜"), "～");
        assert_eq!(run(&s, "−"), "－");
        let empty = stage(Vec::new());
        assert_eq!(run(&empty, "〜"), "～");
    }
}
