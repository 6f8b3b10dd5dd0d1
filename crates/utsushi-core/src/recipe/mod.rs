//! Declarative recipes and their compilation into ordered stage lists.
//!
//! A [`Recipe`] names the effects wanted; [`Recipe::build_configs`] decides
//! which stages provide them and in what order. Recipes are read from TOML:
//!
//! ```toml
//! kanji_old_new = true
//! to_fullwidth = "u005c-as-yen-sign"
//!
//! [replace_hyphens]
//! enabled = true
//! precedence = ["jisx0208_90_windows", "jisx0201"]
//! ```

mod builder;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stages::{
    CircledOrSquaredOptions, HiraKataCompositionOptions, HiraKataMode, HiraKataOptions,
    HyphensOptions, IvsSvsBaseOptions, IvsSvsMode, Jisx0201AndAlikeOptions,
    ProlongedSoundMarksOptions, StageConfig, Tristate,
};
use crate::tables::{Charset, HyphensCharset};
use builder::ConfigBuilder;

pub const DEFAULT_RECIPE_TOML: &str = include_str!("default_recipe.toml");

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("TOML parse error: {0}")]
    Parse(String),
}

/// Raw form of a multi-valued knob: `false`, `true`, or a variant name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Knob {
    Flag(bool),
    Name(String),
}

macro_rules! recipe_knob {
    (
        $(#[$doc:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),* $(,)?
        }
        $(true => $yes:ident)?
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "Knob", into = "Knob")]
        pub enum $name {
            #[default]
            No,
            $($variant),*
        }

        impl TryFrom<Knob> for $name {
            type Error = String;

            fn try_from(knob: Knob) -> Result<Self, String> {
                match knob {
                    Knob::Flag(false) => Ok(Self::No),
                    $(Knob::Flag(true) => Ok(Self::$yes),)?
                    #[allow(unreachable_patterns)]
                    Knob::Flag(true) => Err(format!(
                        "{} needs one of: {}",
                        stringify!($name),
                        [$($text),*].join(", ")
                    )),
                    Knob::Name(s) => match s.as_str() {
                        "no" => Ok(Self::No),
                        $($text => Ok(Self::$variant),)*
                        other => Err(format!("unknown {} value {other:?}", stringify!($name))),
                    },
                }
            }
        }

        impl From<$name> for Knob {
            fn from(value: $name) -> Knob {
                match value {
                    $name::No => Knob::Flag(false),
                    $($name::$variant => Knob::Name($text.to_string()),)*
                }
            }
        }
    };
}

recipe_knob! {
    /// Direction of hiragana/katakana conversion.
    pub enum HiraKataRecipe {
        HiraToKata => "hira-to-kata",
        KataToHira => "kata-to-hira",
    }
}

recipe_knob! {
    pub enum CircledRecipe {
        Yes => "yes",
        ExcludeEmojis => "exclude-emojis",
    }
    true => Yes
}

recipe_knob! {
    /// Widen halfwidth characters. The yen variant reads U+005C as the yen
    /// sign of JIS X 0201.
    pub enum ToFullwidth {
        Yes => "yes",
        U005cAsYenSign => "u005c-as-yen-sign",
    }
    true => Yes
}

recipe_knob! {
    /// Narrow fullwidth characters. Katakana are narrowed only with
    /// `hankaku-kana`.
    pub enum ToHalfwidth {
        Yes => "yes",
        HankakuKana => "hankaku-kana",
    }
    true => Yes
}

recipe_knob! {
    pub enum RemoveIvsSvs {
        Yes => "yes",
        DropAllSelectors => "drop-all-selectors",
    }
    true => Yes
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceHyphens {
    pub enabled: bool,
    /// Target charsets in order of preference. Empty means
    /// `jisx0208_90_windows` then `jisx0201`.
    pub precedence: Vec<HyphensCharset>,
}

/// The effects a transliteration should have. Every field defaults to off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Recipe {
    /// 舊字體 → 旧字体.
    pub kanji_old_new: bool,
    pub hira_kata: HiraKataRecipe,
    /// 時々 → 時時, いすゞ → いすず.
    pub replace_japanese_iteration_marks: bool,
    /// スーパ- → スーパー.
    pub replace_suspicious_hyphens_to_prolonged_sound_marks: bool,
    /// ㍻ → 平成.
    pub replace_combined_characters: bool,
    pub replace_circled_or_squared_characters: CircledRecipe,
    pub replace_ideographic_annotations: bool,
    /// Kangxi radicals to the CJK ideographs they resemble.
    pub replace_radicals: bool,
    pub replace_spaces: bool,
    pub replace_mathematical_alphanumerics: bool,
    /// Ⅻ → XII.
    pub replace_roman_numerals: bool,
    /// か + U+3099 → が.
    pub combine_decomposed_hiraganas_and_katakanas: bool,
    pub to_fullwidth: ToFullwidth,
    pub to_halfwidth: ToHalfwidth,
    pub remove_ivs_svs: RemoveIvsSvs,
    /// Charset profile for variation sequence handling.
    pub charset: Charset,
    /// Kept last so it serializes as a trailing TOML table.
    pub replace_hyphens: ReplaceHyphens,
}

pub fn parse_recipe_toml(toml_str: &str) -> Result<Recipe, RecipeError> {
    let recipe: Recipe =
        toml::from_str(toml_str).map_err(|e| RecipeError::Parse(e.to_string()))?;
    recipe.validate()?;
    Ok(recipe)
}

impl Recipe {
    /// The embedded recipe used when the caller supplies none.
    pub fn default_toml() -> &'static str {
        DEFAULT_RECIPE_TOML
    }

    /// Parse [`Recipe::default_toml`].
    pub fn standard() -> Result<Recipe, RecipeError> {
        parse_recipe_toml(DEFAULT_RECIPE_TOML)
    }

    /// Check option combinations, reporting every conflict found.
    pub fn validate(&self) -> Result<(), RecipeError> {
        let mut errors = Vec::new();
        if self.to_fullwidth != ToFullwidth::No && self.to_halfwidth != ToHalfwidth::No {
            errors.push("to_fullwidth and to_halfwidth are mutually exclusive".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(RecipeError::Invalid(errors))
        }
    }

    /// Compile into an ordered stage list.
    ///
    /// Validation runs first; an invalid recipe yields no list at all.
    pub fn build_configs(&self) -> Result<Vec<StageConfig>, RecipeError> {
        self.validate()?;
        let mut b = ConfigBuilder::default();

        if self.kanji_old_new {
            self.bracket_ivs_svs(&mut b, false);
            b.insert_middle(StageConfig::KanjiOldNew, false);
        }
        if self.replace_suspicious_hyphens_to_prolonged_sound_marks {
            b.insert_middle(
                StageConfig::ProlongedSoundMarks(ProlongedSoundMarksOptions {
                    replace_prolonged_marks_following_alnums: true,
                    ..Default::default()
                }),
                false,
            );
        }
        if self.replace_circled_or_squared_characters != CircledRecipe::No {
            b.insert_middle(
                StageConfig::CircledOrSquared(CircledOrSquaredOptions {
                    include_emojis: self.replace_circled_or_squared_characters
                        != CircledRecipe::ExcludeEmojis,
                    ..Default::default()
                }),
                false,
            );
        }
        if self.replace_combined_characters {
            b.insert_middle(StageConfig::Combined, false);
        }
        if self.replace_ideographic_annotations {
            b.insert_middle(StageConfig::IdeographicAnnotations, false);
        }
        if self.replace_radicals {
            b.insert_middle(StageConfig::Radicals, false);
        }
        if self.replace_spaces {
            b.insert_middle(StageConfig::Spaces, false);
        }
        if self.replace_hyphens.enabled {
            let mut options = HyphensOptions {
                precedence: self.replace_hyphens.precedence.clone(),
            };
            if options.precedence.is_empty() {
                options = HyphensOptions::default();
            }
            b.insert_middle(StageConfig::Hyphens(options), false);
        }
        if self.replace_mathematical_alphanumerics {
            b.insert_middle(StageConfig::MathematicalAlphanumerics, false);
        }
        if self.replace_roman_numerals {
            b.insert_middle(StageConfig::RomanNumerals, false);
        }
        if self.combine_decomposed_hiraganas_and_katakanas {
            b.insert_head(composition(), false);
        }
        if self.to_fullwidth != ToFullwidth::No {
            b.insert_tail(
                StageConfig::Jisx0201AndAlike(Jisx0201AndAlikeOptions {
                    fullwidth_to_halfwidth: false,
                    u005c_as_yen_sign: Tristate::from(
                        self.to_fullwidth == ToFullwidth::U005cAsYenSign,
                    ),
                    ..Default::default()
                }),
                false,
            );
        }
        let mode = match self.hira_kata {
            HiraKataRecipe::No => None,
            HiraKataRecipe::HiraToKata => Some(HiraKataMode::HiraToKata),
            HiraKataRecipe::KataToHira => Some(HiraKataMode::KataToHira),
        };
        if let Some(mode) = mode {
            b.insert_middle(StageConfig::HiraKata(HiraKataOptions { mode }), false);
        }
        if self.replace_japanese_iteration_marks {
            // Marks are resolved against precomposed kana.
            b.insert_head(composition(), false);
            b.insert_middle(StageConfig::JapaneseIterationMarks, false);
        }
        if self.to_halfwidth != ToHalfwidth::No {
            b.insert_tail(
                StageConfig::Jisx0201AndAlike(Jisx0201AndAlikeOptions {
                    fullwidth_to_halfwidth: true,
                    convert_gl: true,
                    convert_gr: self.to_halfwidth == ToHalfwidth::HankakuKana,
                    ..Default::default()
                }),
                false,
            );
        }
        if self.remove_ivs_svs != RemoveIvsSvs::No {
            let drop_all = self.remove_ivs_svs == RemoveIvsSvs::DropAllSelectors;
            self.bracket_ivs_svs(&mut b, drop_all);
        }

        let configs = b.build();
        debug!(
            stages = configs.len(),
            names = ?configs.iter().map(StageConfig::name).collect::<Vec<_>>(),
            "recipe compiled"
        );
        Ok(configs)
    }

    /// Attach selectors up front so table lookups see a uniform form, and
    /// strip them again at the end.
    fn bracket_ivs_svs(&self, b: &mut ConfigBuilder, drop_selectors_altogether: bool) {
        b.insert_head(
            StageConfig::IvsSvsBase(IvsSvsBaseOptions {
                mode: IvsSvsMode::IvsOrSvs,
                charset: self.charset,
                ..Default::default()
            }),
            true,
        );
        b.insert_tail(
            StageConfig::IvsSvsBase(IvsSvsBaseOptions {
                mode: IvsSvsMode::Base,
                charset: self.charset,
                drop_selectors_altogether,
                prefer_svs: false,
            }),
            true,
        );
    }
}

fn composition() -> StageConfig {
    StageConfig::HiraKataComposition(HiraKataCompositionOptions {
        compose_non_combining_marks: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(recipe: &Recipe) -> Vec<&'static str> {
        recipe
            .build_configs()
            .unwrap()
            .iter()
            .map(StageConfig::name)
            .collect()
    }

    #[test]
    fn empty_recipe_compiles_to_nothing() {
        assert!(Recipe::default().build_configs().unwrap().is_empty());
    }

    #[test]
    fn default_charset_is_unijis_2004() {
        assert_eq!(Recipe::default().charset, Charset::Unijis2004);
    }

    #[test]
    fn single_flags_map_to_single_stages() {
        let cases: [(Recipe, &str); 6] = [
            (
                Recipe {
                    replace_spaces: true,
                    ..Default::default()
                },
                "spaces",
            ),
            (
                Recipe {
                    replace_radicals: true,
                    ..Default::default()
                },
                "radicals",
            ),
            (
                Recipe {
                    replace_roman_numerals: true,
                    ..Default::default()
                },
                "roman-numerals",
            ),
            (
                Recipe {
                    replace_combined_characters: true,
                    ..Default::default()
                },
                "combined",
            ),
            (
                Recipe {
                    combine_decomposed_hiraganas_and_katakanas: true,
                    ..Default::default()
                },
                "hira-kata-composition",
            ),
            (
                Recipe {
                    replace_suspicious_hyphens_to_prolonged_sound_marks: true,
                    ..Default::default()
                },
                "prolonged-sound-marks",
            ),
        ];
        for (recipe, name) in cases {
            assert_eq!(names(&recipe), vec![name]);
        }
    }

    #[test]
    fn kanji_old_new_is_bracketed_by_ivs_svs() {
        let recipe = Recipe {
            kanji_old_new: true,
            ..Default::default()
        };
        let configs = recipe.build_configs().unwrap();
        assert_eq!(
            configs.iter().map(StageConfig::name).collect::<Vec<_>>(),
            vec!["ivs-svs-base", "kanji-old-new", "ivs-svs-base"]
        );
        assert!(matches!(
            &configs[0],
            StageConfig::IvsSvsBase(IvsSvsBaseOptions {
                mode: IvsSvsMode::IvsOrSvs,
                ..
            })
        ));
        assert!(matches!(
            &configs[2],
            StageConfig::IvsSvsBase(IvsSvsBaseOptions {
                mode: IvsSvsMode::Base,
                drop_selectors_altogether: false,
                ..
            })
        ));
    }

    #[test]
    fn remove_ivs_svs_drop_all_overrides_kanji_bracket() {
        let recipe = Recipe {
            kanji_old_new: true,
            remove_ivs_svs: RemoveIvsSvs::DropAllSelectors,
            charset: Charset::Unijis90,
            ..Default::default()
        };
        let configs = recipe.build_configs().unwrap();
        let ivs: Vec<_> = configs
            .iter()
            .filter_map(|c| match c {
                StageConfig::IvsSvsBase(o) => Some(o),
                _ => None,
            })
            .collect();
        assert_eq!(ivs.len(), 2);
        assert!(ivs.iter().all(|o| o.charset == Charset::Unijis90));
        assert!(ivs[1].drop_selectors_altogether);
    }

    #[test]
    fn basic_recipe_order() {
        let recipe = Recipe {
            kanji_old_new: true,
            replace_spaces: true,
            replace_suspicious_hyphens_to_prolonged_sound_marks: true,
            replace_circled_or_squared_characters: CircledRecipe::Yes,
            replace_combined_characters: true,
            replace_japanese_iteration_marks: true,
            to_fullwidth: ToFullwidth::Yes,
            ..Default::default()
        };
        assert_eq!(
            names(&recipe),
            vec![
                "hira-kata-composition",
                "ivs-svs-base",
                "japanese-iteration-marks",
                "spaces",
                "combined",
                "circled-or-squared",
                "prolonged-sound-marks",
                "kanji-old-new",
                "ivs-svs-base",
                "jisx0201-and-alike",
            ]
        );
    }

    #[test]
    fn combined_runs_before_circled() {
        let recipe = Recipe {
            replace_circled_or_squared_characters: CircledRecipe::Yes,
            replace_combined_characters: true,
            ..Default::default()
        };
        assert_eq!(names(&recipe), vec!["combined", "circled-or-squared"]);
    }

    #[test]
    fn circled_exclude_emojis() {
        let recipe = Recipe {
            replace_circled_or_squared_characters: CircledRecipe::ExcludeEmojis,
            ..Default::default()
        };
        let configs = recipe.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::CircledOrSquared(CircledOrSquaredOptions {
                include_emojis: false,
                ..
            })
        ));
    }

    #[test]
    fn hyphens_precedence() {
        let default = Recipe {
            replace_hyphens: ReplaceHyphens {
                enabled: true,
                precedence: Vec::new(),
            },
            ..Default::default()
        };
        let configs = default.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::Hyphens(o) if o.precedence == HyphensCharset::DEFAULT_PRECEDENCE
        ));

        let custom = Recipe {
            replace_hyphens: ReplaceHyphens {
                enabled: true,
                precedence: vec![HyphensCharset::Ascii],
            },
            ..Default::default()
        };
        let configs = custom.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::Hyphens(o) if o.precedence == [HyphensCharset::Ascii]
        ));
    }

    #[test]
    fn disabled_hyphens_ignore_precedence() {
        let recipe = Recipe {
            replace_hyphens: ReplaceHyphens {
                enabled: false,
                precedence: vec![HyphensCharset::Ascii],
            },
            ..Default::default()
        };
        assert!(recipe.build_configs().unwrap().is_empty());
    }

    #[test]
    fn to_fullwidth_yen_variant() {
        let yes = Recipe {
            to_fullwidth: ToFullwidth::Yes,
            ..Default::default()
        };
        let configs = yes.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::Jisx0201AndAlike(o)
                if !o.fullwidth_to_halfwidth && o.u005c_as_yen_sign == Tristate::False
        ));

        let yen = Recipe {
            to_fullwidth: ToFullwidth::U005cAsYenSign,
            ..Default::default()
        };
        let configs = yen.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::Jisx0201AndAlike(o) if o.u005c_as_yen_sign == Tristate::True
        ));
    }

    #[test]
    fn to_halfwidth_hankaku_kana() {
        let plain = Recipe {
            to_halfwidth: ToHalfwidth::Yes,
            ..Default::default()
        };
        let configs = plain.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::Jisx0201AndAlike(o)
                if o.fullwidth_to_halfwidth && o.convert_gl && !o.convert_gr
        ));

        let kana = Recipe {
            to_halfwidth: ToHalfwidth::HankakuKana,
            ..Default::default()
        };
        let configs = kana.build_configs().unwrap();
        assert!(matches!(
            &configs[0],
            StageConfig::Jisx0201AndAlike(o) if o.convert_gr
        ));
    }

    #[test]
    fn width_conversion_runs_last() {
        let recipe = Recipe {
            kanji_old_new: true,
            replace_suspicious_hyphens_to_prolonged_sound_marks: true,
            replace_spaces: true,
            combine_decomposed_hiraganas_and_katakanas: true,
            to_halfwidth: ToHalfwidth::Yes,
            ..Default::default()
        };
        assert_eq!(names(&recipe).last(), Some(&"jisx0201-and-alike"));
    }

    #[test]
    fn iteration_marks_share_one_composition_stage() {
        let recipe = Recipe {
            combine_decomposed_hiraganas_and_katakanas: true,
            replace_japanese_iteration_marks: true,
            ..Default::default()
        };
        assert_eq!(
            names(&recipe),
            vec!["hira-kata-composition", "japanese-iteration-marks"]
        );
    }

    #[test]
    fn mutual_exclusion_is_an_error() {
        let recipe = Recipe {
            to_fullwidth: ToFullwidth::Yes,
            to_halfwidth: ToHalfwidth::HankakuKana,
            ..Default::default()
        };
        let err = recipe.build_configs().unwrap_err();
        assert!(matches!(&err, RecipeError::Invalid(v) if v.len() == 1));
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn build_is_deterministic() {
        let recipe = Recipe::standard().unwrap();
        assert_eq!(recipe.build_configs().unwrap(), recipe.build_configs().unwrap());
    }

    #[test]
    fn parse_knobs_from_bools_and_names() {
        let recipe = parse_recipe_toml(
            r#"
kanji_old_new = true
hira_kata = "kata-to-hira"
replace_circled_or_squared_characters = true
to_halfwidth = "hankaku-kana"
remove_ivs_svs = "drop-all-selectors"
charset = "unijis_90"

[replace_hyphens]
enabled = true
precedence = ["ascii", "jisx0208_90"]
"#,
        )
        .unwrap();
        assert!(recipe.kanji_old_new);
        assert_eq!(recipe.hira_kata, HiraKataRecipe::KataToHira);
        assert_eq!(recipe.replace_circled_or_squared_characters, CircledRecipe::Yes);
        assert_eq!(recipe.to_halfwidth, ToHalfwidth::HankakuKana);
        assert_eq!(recipe.remove_ivs_svs, RemoveIvsSvs::DropAllSelectors);
        assert_eq!(recipe.charset, Charset::Unijis90);
        assert_eq!(
            recipe.replace_hyphens.precedence,
            vec![HyphensCharset::Ascii, HyphensCharset::Jisx0208_90]
        );
    }

    #[test]
    fn parse_rejects_true_for_direction_knob() {
        let err = parse_recipe_toml("hira_kata = true").unwrap_err();
        assert!(matches!(err, RecipeError::Parse(_)));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!(matches!(
            parse_recipe_toml(r#"to_fullwidth = "sideways""#),
            Err(RecipeError::Parse(_))
        ));
        assert!(matches!(
            parse_recipe_toml("replace_everything = true"),
            Err(RecipeError::Parse(_))
        ));
    }

    #[test]
    fn parse_validates() {
        let err = parse_recipe_toml("to_fullwidth = true\nto_halfwidth = true").unwrap_err();
        assert!(matches!(err, RecipeError::Invalid(_)));
    }

    #[test]
    fn toml_round_trip() {
        let recipe = Recipe {
            hira_kata: HiraKataRecipe::HiraToKata,
            to_fullwidth: ToFullwidth::U005cAsYenSign,
            remove_ivs_svs: RemoveIvsSvs::Yes,
            ..Default::default()
        };
        let text = toml::to_string(&recipe).unwrap();
        assert_eq!(parse_recipe_toml(&text).unwrap(), recipe);
    }

    #[test]
    fn standard_recipe_compiles() {
        let recipe = Recipe::standard().unwrap();
        assert!(!recipe.build_configs().unwrap().is_empty());
    }
}
