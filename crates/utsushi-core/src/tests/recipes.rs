//! End-to-end transliteration through compiled recipes.

use crate::recipe::{
    CircledRecipe, HiraKataRecipe, RemoveIvsSvs, ReplaceHyphens, ToFullwidth, ToHalfwidth,
};
use crate::tables::{Charset, HyphensCharset};
use crate::{transliterate, BuildError, Chain, Recipe, RecipeError, StageConfig};

fn run(recipe: &Recipe, text: &str) -> String {
    transliterate(recipe, text).unwrap()
}

#[test]
fn basic_recipe() {
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
        run(&recipe, "①②③　ⒶⒷⒸ　㍿㍑㌠㋿"),
        "（１）（２）（３）　（Ａ）（Ｂ）（Ｃ）　株式会社リットルサンチーム令和"
    );
}

#[test]
fn standard_recipe_matches_basic_scenario() {
    let recipe = Recipe::standard().unwrap();
    assert_eq!(
        run(&recipe, "①②③　ⒶⒷⒸ　㍿㍑㌠㋿"),
        "（１）（２）（３）　（Ａ）（Ｂ）（Ｃ）　株式会社リットルサンチーム令和"
    );
}

#[test]
fn old_kanji_to_new() {
    let recipe = Recipe {
        kanji_old_new: true,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "舊字體"), "旧字体");
    assert_eq!(run(&recipe, "新字体"), "新字体");
}

#[test]
fn old_kanji_with_variation_selector() {
    let recipe = Recipe {
        kanji_old_new: true,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "舊\u{E0100}"), "旧");
    assert_eq!(run(&recipe, "舊\u{E0100}字體\u{E0100}"), "旧字体");
    // Only the sequence is keyed; the selector is attached before lookup.
    assert_eq!(run(&recipe, "檜"), "桧");
    assert_eq!(run(&recipe, "檜\u{E0100}の木"), "桧の木");

    let stage = Chain::from_configs(&[StageConfig::KanjiOldNew]).unwrap();
    assert_eq!(stage.transliterate_str("檜"), "檜");
    assert_eq!(stage.transliterate_str("檜\u{E0100}"), "桧\u{E0100}");
}

#[test]
fn halfwidth_katakana_to_fullwidth() {
    let recipe = Recipe {
        to_fullwidth: ToFullwidth::Yes,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "ﾃｽﾄﾓｼﾞﾚﾂ"), "テストモジレツ");
    assert_eq!(run(&recipe, "ABC123"), "ＡＢＣ１２３");
}

#[test]
fn fullwidth_yen_sign_variant() {
    let plain = Recipe {
        to_fullwidth: ToFullwidth::Yes,
        ..Default::default()
    };
    assert_eq!(run(&plain, "\\100"), "\\１００");
    let yen = Recipe {
        to_fullwidth: ToFullwidth::U005cAsYenSign,
        ..Default::default()
    };
    assert_eq!(run(&yen, "\\100"), "￥１００");
}

#[test]
fn fullwidth_to_halfwidth() {
    let gl_only = Recipe {
        to_halfwidth: ToHalfwidth::Yes,
        ..Default::default()
    };
    assert_eq!(run(&gl_only, "ＡＢＣ　カナ"), "ABC カナ");
    let hankaku = Recipe {
        to_halfwidth: ToHalfwidth::HankakuKana,
        ..Default::default()
    };
    assert_eq!(run(&hankaku, "テストモジレツ"), "ﾃｽﾄﾓｼﾞﾚﾂ");
}

#[test]
fn iteration_marks() {
    let recipe = Recipe {
        replace_japanese_iteration_marks: true,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "佐々木"), "佐佐木");
    assert_eq!(run(&recipe, "すゝき"), "すすき");
    assert_eq!(run(&recipe, "いすゞ"), "いすず");
    // The voiced mark is composed first, then resolved.
    assert_eq!(run(&recipe, "かゝ\u{3099}"), "かが");
}

#[test]
fn hiragana_katakana_conversion() {
    let to_kata = Recipe {
        hira_kata: HiraKataRecipe::HiraToKata,
        ..Default::default()
    };
    assert_eq!(run(&to_kata, "ひらがな"), "ヒラガナ");
    let to_hira = Recipe {
        hira_kata: HiraKataRecipe::KataToHira,
        ..Default::default()
    };
    assert_eq!(run(&to_hira, "カタカナ"), "かたかな");
}

#[test]
fn consecutive_roman_numerals() {
    let recipe = Recipe {
        replace_roman_numerals: true,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "ⅠⅡⅢ"), "IIIIII");
    assert_eq!(run(&recipe, "Chapter Ⅻ"), "Chapter XII");
    assert_eq!(run(&recipe, "Section ⅲ.A"), "Section iii.A");
}

#[test]
fn circled_excluding_emojis() {
    let recipe = Recipe {
        replace_circled_or_squared_characters: CircledRecipe::ExcludeEmojis,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "①"), "（1）");
    assert_eq!(run(&recipe, "🅰"), "［A］");
    assert_eq!(run(&recipe, "🆘"), "🆘");
}

#[test]
fn suspicious_hyphens() {
    let recipe = Recipe {
        replace_suspicious_hyphens_to_prolonged_sound_marks: true,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "スーパ-"), "スーパー");
    assert_eq!(run(&recipe, "1ー2"), "1-2");
}

#[test]
fn hyphens_follow_precedence() {
    let default = Recipe {
        replace_hyphens: ReplaceHyphens {
            enabled: true,
            precedence: Vec::new(),
        },
        ..Default::default()
    };
    assert_eq!(run(&default, "2019—2020"), "2019―2020");
    let ascii = Recipe {
        replace_hyphens: ReplaceHyphens {
            enabled: true,
            precedence: vec![HyphensCharset::Ascii],
        },
        ..Default::default()
    };
    assert_eq!(run(&ascii, "2019—2020"), "2019-2020");
}

#[test]
fn combine_decomposed_kana() {
    let recipe = Recipe {
        combine_decomposed_hiraganas_and_katakanas: true,
        ..Default::default()
    };
    assert_eq!(run(&recipe, "か\u{3099}"), "が");
    assert_eq!(run(&recipe, "ヘ゜"), "ペ");
}

#[test]
fn remove_variation_selectors() {
    let yes = Recipe {
        remove_ivs_svs: RemoveIvsSvs::Yes,
        ..Default::default()
    };
    assert_eq!(run(&yes, "葛\u{E0101}飾"), "葛飾");
    assert_eq!(run(&yes, "漢\u{E0105}"), "漢\u{E0105}");

    let drop_all = Recipe {
        remove_ivs_svs: RemoveIvsSvs::DropAllSelectors,
        ..Default::default()
    };
    assert_eq!(run(&drop_all, "漢\u{E0105}"), "漢");

    let unijis_90 = Recipe {
        remove_ivs_svs: RemoveIvsSvs::Yes,
        charset: Charset::Unijis90,
        ..Default::default()
    };
    assert_eq!(run(&unijis_90, "葛\u{E0100}飾"), "葛飾");
}

#[test]
fn mutually_exclusive_widths_fail_before_building() {
    let recipe = Recipe {
        to_fullwidth: ToFullwidth::Yes,
        to_halfwidth: ToHalfwidth::Yes,
        ..Default::default()
    };
    let err = transliterate(&recipe, "x").unwrap_err();
    assert!(matches!(err, BuildError::Recipe(RecipeError::Invalid(_))));
    assert!(err.to_string().contains("mutually exclusive"));
}

#[test]
fn empty_recipe_is_rejected() {
    let err = transliterate(&Recipe::default(), "x").unwrap_err();
    assert!(matches!(err, BuildError::Empty));
    assert_eq!(
        err.to_string(),
        "at least one transliterator must be specified"
    );
}

#[test]
fn compiled_lists_survive_json() {
    let recipe = Recipe::standard().unwrap();
    let configs = recipe.build_configs().unwrap();
    let json = serde_json::to_string(&configs).unwrap();
    let back: Vec<StageConfig> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, configs);

    let text = "ﾃｽﾄ①佐々木";
    assert_eq!(
        Chain::from_configs(&back).unwrap().transliterate_str(text),
        run(&recipe, text)
    );
}

#[test]
fn chain_is_shared_across_threads() {
    let chain = Chain::from_recipe(&Recipe::standard().unwrap()).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| chain.transliterate_str("ﾃｽﾄﾓｼﾞﾚﾂ㍿")))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), "テストモジレツ株式会社");
        }
    });
}
