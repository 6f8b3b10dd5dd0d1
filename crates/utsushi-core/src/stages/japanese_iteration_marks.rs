use std::collections::HashMap;
use std::sync::OnceLock;

use crate::chain::Transliterator;
use crate::char::{CharArena, CharId, CharPair};
use crate::stream::{BoxStream, CharStream, OffsetCursor};
use crate::tables::kana::KANA_TABLE;
use crate::unicode::{is_halfwidth_katakana, is_hiragana, is_kanji, is_katakana};

const HIRAGANA_MARK: char = 'ゝ';
const HIRAGANA_VOICED_MARK: char = 'ゞ';
const VERTICAL_HIRAGANA_MARK: char = '〱';
const VERTICAL_HIRAGANA_VOICED_MARK: char = '〲';
const KATAKANA_MARK: char = 'ヽ';
const KATAKANA_VOICED_MARK: char = 'ヾ';
const VERTICAL_KATAKANA_MARK: char = '〳';
const VERTICAL_KATAKANA_VOICED_MARK: char = '〴';
const KANJI_MARK: char = '々';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharType {
    Other,
    Hiragana,
    Katakana,
    Kanji,
    Voiced,
    SemiVoiced,
    Hatsuon,
    Sokuon,
}

struct VoicingMaps {
    hiragana: HashMap<char, char>,
    katakana: HashMap<char, char>,
    hiragana_unvoiced: HashMap<char, char>,
    katakana_unvoiced: HashMap<char, char>,
}

impl VoicingMaps {
    fn is_voiced(&self, c: char) -> bool {
        self.hiragana_unvoiced.contains_key(&c) || self.katakana_unvoiced.contains_key(&c)
    }
}

/// Voicing limited to the ka, sa, ta and ha rows, plus ウ/ヴ on the
/// katakana side.
fn voicing_maps() -> &'static VoicingMaps {
    static INSTANCE: OnceLock<VoicingMaps> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let mut hiragana = HashMap::new();
        let mut katakana = HashMap::new();
        for entry in KANA_TABLE {
            if let Some(v) = entry.hiragana.voiced.filter(|_| entry.hiragana.base != 'う') {
                hiragana.insert(entry.hiragana.base, v);
            }
            if let Some(v) = entry.katakana.voiced.filter(|_| entry.hiragana.voiced.is_some()) {
                katakana.insert(entry.katakana.base, v);
            }
        }
        let invert = |m: &HashMap<char, char>| m.iter().map(|(&k, &v)| (v, k)).collect();
        VoicingMaps {
            hiragana_unvoiced: invert(&hiragana),
            katakana_unvoiced: invert(&katakana),
            hiragana,
            katakana,
        }
    })
}

fn is_semivoiced(c: char) -> bool {
    matches!(
        c,
        'ぱ' | 'ぴ' | 'ぷ' | 'ぺ' | 'ぽ' | 'パ' | 'ピ' | 'プ' | 'ペ' | 'ポ'
    )
}

fn classify(pair: CharPair) -> CharType {
    if let Some(c) = pair.plain() {
        let maps = voicing_maps();
        match c {
            'ん' | 'ン' => return CharType::Hatsuon,
            'っ' | 'ッ' => return CharType::Sokuon,
            c if maps.is_voiced(c) => return CharType::Voiced,
            c if is_semivoiced(c) => return CharType::SemiVoiced,
            c if is_hiragana(c) => return CharType::Hiragana,
            c if is_katakana(c) || is_halfwidth_katakana(c) => return CharType::Katakana,
            _ => {}
        }
    }
    // A kanji keeps its type with a selector attached; the repeat copies
    // the selector too.
    if is_kanji(pair.base) {
        CharType::Kanji
    } else {
        CharType::Other
    }
}

fn is_iteration_mark(pair: CharPair) -> bool {
    matches!(
        pair.plain(),
        Some(
            HIRAGANA_MARK
                | HIRAGANA_VOICED_MARK
                | VERTICAL_HIRAGANA_MARK
                | VERTICAL_HIRAGANA_VOICED_MARK
                | KATAKANA_MARK
                | KATAKANA_VOICED_MARK
                | VERTICAL_KATAKANA_MARK
                | VERTICAL_KATAKANA_VOICED_MARK
                | KANJI_MARK
        )
    )
}

/// Character an iteration mark stands for, given what precedes it.
fn resolve(mark: char, prev: CharPair, prev_type: CharType) -> Option<CharPair> {
    let maps = voicing_maps();
    let lookup = |m: &HashMap<char, char>| m.get(&prev.base).map(|&c| CharPair::new(c));
    match (mark, prev_type) {
        (HIRAGANA_MARK | VERTICAL_HIRAGANA_MARK, CharType::Hiragana) => Some(prev),
        (HIRAGANA_MARK | VERTICAL_HIRAGANA_MARK, CharType::Voiced) => {
            lookup(&maps.hiragana_unvoiced)
        }
        (HIRAGANA_VOICED_MARK | VERTICAL_HIRAGANA_VOICED_MARK, CharType::Hiragana) => {
            lookup(&maps.hiragana)
        }
        (HIRAGANA_VOICED_MARK | VERTICAL_HIRAGANA_VOICED_MARK, CharType::Voiced) => Some(prev),
        (KATAKANA_MARK | VERTICAL_KATAKANA_MARK, CharType::Katakana) => Some(prev),
        (KATAKANA_MARK | VERTICAL_KATAKANA_MARK, CharType::Voiced) => {
            lookup(&maps.katakana_unvoiced)
        }
        (KATAKANA_VOICED_MARK | VERTICAL_KATAKANA_VOICED_MARK, CharType::Katakana) => {
            lookup(&maps.katakana)
        }
        (KATAKANA_VOICED_MARK | VERTICAL_KATAKANA_VOICED_MARK, CharType::Voiced) => Some(prev),
        (KANJI_MARK, CharType::Kanji) => Some(prev),
        _ => None,
    }
}

/// Replaces kana and kanji iteration marks with the character they repeat.
#[derive(Debug, Default)]
pub struct JapaneseIterationMarks;

impl Transliterator for JapaneseIterationMarks {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(IterationMarksStream {
            input,
            cursor: OffsetCursor::default(),
            prev: None,
        })
    }

    fn name(&self) -> &'static str {
        "japanese-iteration-marks"
    }
}

struct IterationMarksStream<'a> {
    input: BoxStream<'a>,
    cursor: OffsetCursor,
    prev: Option<(CharPair, CharType)>,
}

impl CharStream for IterationMarksStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        let id = self.input.next(arena)?;
        let Some(pair) = arena[id].pair else {
            self.prev = None;
            return Some(self.cursor.pass(arena, id));
        };

        if is_iteration_mark(pair) {
            let replacement = self
                .prev
                .and_then(|(prev, prev_type)| resolve(pair.base, prev, prev_type));
            if let Some(replacement) = replacement {
                // A replaced mark cannot itself be repeated: "さゝゝ" keeps
                // its second mark.
                self.prev = None;
                return Some(self.cursor.emit(arena, replacement, id));
            }
            self.prev = Some((pair, CharType::Other));
        } else {
            self.prev = Some((pair, classify(pair)));
        }
        Some(self.cursor.pass(arena, id))
    }

    fn size_hint(&self) -> Option<usize> {
        self.input.size_hint()
    }
}
