use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::TableStream;
use crate::chain::Transliterator;
use crate::char::CharPair;
use crate::stream::BoxStream;
use crate::tables::{circled_or_squared, CharTable, CircledKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircledOrSquaredOptions {
    /// Template for circled characters; `?` is replaced by the inner text.
    pub template_for_circled: String,
    pub template_for_squared: String,
    pub include_emojis: bool,
}

impl Default for CircledOrSquaredOptions {
    fn default() -> Self {
        Self {
            template_for_circled: "（?）".to_string(),
            template_for_squared: "［?］".to_string(),
            include_emojis: true,
        }
    }
}

/// Spells out circled and squared characters through a template.
pub struct CircledOrSquared {
    table: CharTable,
}

impl CircledOrSquared {
    pub fn new(options: &CircledOrSquaredOptions) -> Self {
        let table: CharTable = circled_or_squared()
            .iter()
            .filter(|(_, entry)| options.include_emojis || !entry.emoji)
            .map(|(key, entry)| {
                let template = match entry.kind {
                    CircledKind::Circle => &options.template_for_circled,
                    CircledKind::Square => &options.template_for_squared,
                };
                (*key, CharPair::split(&template.replace('?', &entry.rendering)))
            })
            .collect();
        debug!(
            entries = table.len(),
            include_emojis = options.include_emojis,
            "circled-or-squared table built"
        );
        Self { table }
    }
}

impl Transliterator for CircledOrSquared {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(TableStream::new(input, &self.table))
    }

    fn name(&self) -> &'static str {
        "circled-or-squared"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing::{assert_offsets, run};

    #[test]
    fn default_templates() {
        let s = CircledOrSquared::new(&Default::default());
        assert_eq!(run(&s, "①②③"), "（1）（2）（3）");
        assert_eq!(run(&s, "ⒶⒷⒸ"), "（A）（B）（C）");
        assert_eq!(run(&s, "🅰"), "［A］");
        assert_offsets(&s, "①x②");
    }

    #[test]
    fn custom_templates() {
        let s = CircledOrSquared::new(&CircledOrSquaredOptions {
            template_for_circled: "(?)".to_string(),
            template_for_squared: "[?]".to_string(),
            include_emojis: true,
        });
        assert_eq!(run(&s, "⑩🆎"), "(10)[AB]");
    }

    #[test]
    fn emojis_can_be_excluded() {
        let s = CircledOrSquared::new(&CircledOrSquaredOptions {
            include_emojis: false,
            ..Default::default()
        });
        assert_eq!(run(&s, "🆎①"), "🆎（1）");
    }

    #[test]
    fn other_characters_pass_through() {
        let s = CircledOrSquared::new(&Default::default());
        assert_eq!(run(&s, "abc あ"), "abc あ");
    }
}
