//! Transliteration stages and the factory that builds them from
//! [`StageConfig`] descriptions.

mod circled_or_squared;
mod hira_kata;
mod hira_kata_composition;
mod hyphens;
mod ivs_svs_base;
mod japanese_iteration_marks;
mod jisx0201_and_alike;
mod prolonged_sound_marks;
mod table;

use serde::{Deserialize, Serialize};

use crate::chain::Transliterator;
use crate::tables;

pub use circled_or_squared::{CircledOrSquared, CircledOrSquaredOptions};
pub use hira_kata::{HiraKata, HiraKataMode, HiraKataOptions};
pub use hira_kata_composition::{HiraKataComposition, HiraKataCompositionOptions};
pub use hyphens::{Hyphens, HyphensOptions};
pub use ivs_svs_base::{IvsSvsBase, IvsSvsBaseOptions, IvsSvsMode};
pub use japanese_iteration_marks::JapaneseIterationMarks;
pub use jisx0201_and_alike::{Jisx0201AndAlike, Jisx0201AndAlikeOptions, Tristate};
pub use prolonged_sound_marks::{ProlongedSoundMarks, ProlongedSoundMarksOptions};
pub use table::TableStage;

/// Inert description of one stage.
///
/// Serialized as `{"name": "...", "options": {...}}`; stages without
/// options carry the name alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options", rename_all = "kebab-case")]
pub enum StageConfig {
    Spaces,
    Radicals,
    MathematicalAlphanumerics,
    IdeographicAnnotations,
    RomanNumerals,
    Combined,
    KanjiOldNew,
    CircledOrSquared(CircledOrSquaredOptions),
    Hyphens(HyphensOptions),
    HiraKata(HiraKataOptions),
    HiraKataComposition(HiraKataCompositionOptions),
    JapaneseIterationMarks,
    ProlongedSoundMarks(ProlongedSoundMarksOptions),
    IvsSvsBase(IvsSvsBaseOptions),
    #[serde(rename = "jisx0201-and-alike")]
    Jisx0201AndAlike(Jisx0201AndAlikeOptions),
}

impl StageConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StageConfig::Spaces => "spaces",
            StageConfig::Radicals => "radicals",
            StageConfig::MathematicalAlphanumerics => "mathematical-alphanumerics",
            StageConfig::IdeographicAnnotations => "ideographic-annotations",
            StageConfig::RomanNumerals => "roman-numerals",
            StageConfig::Combined => "combined",
            StageConfig::KanjiOldNew => "kanji-old-new",
            StageConfig::CircledOrSquared(_) => "circled-or-squared",
            StageConfig::Hyphens(_) => "hyphens",
            StageConfig::HiraKata(_) => "hira-kata",
            StageConfig::HiraKataComposition(_) => "hira-kata-composition",
            StageConfig::JapaneseIterationMarks => "japanese-iteration-marks",
            StageConfig::ProlongedSoundMarks(_) => "prolonged-sound-marks",
            StageConfig::IvsSvsBase(_) => "ivs-svs-base",
            StageConfig::Jisx0201AndAlike(_) => "jisx0201-and-alike",
        }
    }

    /// Instantiate the stage this config describes.
    pub fn build(&self) -> Box<dyn Transliterator> {
        let name = self.name();
        match self {
            StageConfig::Spaces => Box::new(TableStage::new(name, tables::spaces())),
            StageConfig::Radicals => Box::new(TableStage::new(name, tables::radicals())),
            StageConfig::MathematicalAlphanumerics => Box::new(TableStage::new(
                name,
                tables::mathematical_alphanumerics(),
            )),
            StageConfig::IdeographicAnnotations => {
                Box::new(TableStage::new(name, tables::ideographic_annotations()))
            }
            StageConfig::RomanNumerals => {
                Box::new(TableStage::new(name, tables::roman_numerals()))
            }
            StageConfig::Combined => Box::new(TableStage::new(name, tables::combined())),
            StageConfig::KanjiOldNew => Box::new(TableStage::new(name, tables::kanji_old_new())),
            StageConfig::CircledOrSquared(o) => Box::new(CircledOrSquared::new(o)),
            StageConfig::Hyphens(o) => Box::new(Hyphens::new(o)),
            StageConfig::HiraKata(o) => Box::new(HiraKata::new(o)),
            StageConfig::HiraKataComposition(o) => Box::new(HiraKataComposition::new(o)),
            StageConfig::JapaneseIterationMarks => Box::new(JapaneseIterationMarks),
            StageConfig::ProlongedSoundMarks(o) => Box::new(ProlongedSoundMarks::new(o)),
            StageConfig::IvsSvsBase(o) => Box::new(IvsSvsBase::new(o)),
            StageConfig::Jisx0201AndAlike(o) => Box::new(Jisx0201AndAlike::new(o)),
        }
    }

    /// One default-configured instance of every stage.
    pub fn all_defaults() -> Vec<StageConfig> {
        vec![
            StageConfig::Spaces,
            StageConfig::Radicals,
            StageConfig::MathematicalAlphanumerics,
            StageConfig::IdeographicAnnotations,
            StageConfig::RomanNumerals,
            StageConfig::Combined,
            StageConfig::KanjiOldNew,
            StageConfig::CircledOrSquared(Default::default()),
            StageConfig::Hyphens(Default::default()),
            StageConfig::HiraKata(Default::default()),
            StageConfig::HiraKataComposition(Default::default()),
            StageConfig::JapaneseIterationMarks,
            StageConfig::ProlongedSoundMarks(Default::default()),
            StageConfig::IvsSvsBase(Default::default()),
            StageConfig::Jisx0201AndAlike(Default::default()),
        ]
    }
}
