use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::chain::Transliterator;
use crate::char::{CharArena, CharId, CharPair};
use crate::stream::{BoxStream, CharStream, OffsetCursor};
use crate::unicode::{is_fullwidth_digit, is_fullwidth_latin};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProlongedSoundMarksOptions {
    /// Leave characters some earlier stage already rewrote untouched.
    pub skip_already_transliterated_chars: bool,
    pub allow_prolonged_hatsuon: bool,
    pub allow_prolonged_sokuon: bool,
    /// Turn hyphen-like runs after a letter or digit into hyphens instead.
    pub replace_prolonged_marks_following_alnums: bool,
}

/// Character class bits. The upper three bits hold the script, the lower
/// bits hold flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CharClass(u8);

impl CharClass {
    const OTHER: Self = Self(0x00);
    const HIRAGANA: Self = Self(0x20);
    const KATAKANA: Self = Self(0x40);
    const ALPHABET: Self = Self(0x60);
    const DIGIT: Self = Self(0x80);
    const EITHER: Self = Self(0xA0);

    const HALFWIDTH: u8 = 1 << 0;
    const VOWEL_ENDED: u8 = 1 << 1;
    const HATSUON: u8 = 1 << 2;
    const SOKUON: u8 = 1 << 3;
    const PROLONGED_SOUND_MARK: u8 = 1 << 4;

    const SCRIPT_MASK: u8 = 0xE0;

    const fn with(self, flags: u8) -> Self {
        Self(self.0 | flags)
    }

    fn has_any(self, flags: u8) -> bool {
        self.0 & flags != 0
    }

    fn is_halfwidth(self) -> bool {
        self.has_any(Self::HALFWIDTH)
    }

    fn is_alnum(self) -> bool {
        let script = self.0 & Self::SCRIPT_MASK;
        script == Self::ALPHABET.0 || script == Self::DIGIT.0
    }

    fn of(c: &Option<CharPair>) -> Self {
        let Some(pair) = c else {
            return Self::OTHER.with(Self::HALFWIDTH);
        };
        // A selector does not change how the base sounds.
        match pair.base {
            '0'..='9' => Self::DIGIT.with(Self::HALFWIDTH),
            c if is_fullwidth_digit(c) => Self::DIGIT,
            'A'..='Z' | 'a'..='z' => Self::ALPHABET.with(Self::HALFWIDTH),
            c if is_fullwidth_latin(c) => Self::ALPHABET,
            '\u{FF70}' => Self::KATAKANA.with(Self::PROLONGED_SOUND_MARK | Self::HALFWIDTH),
            '\u{30FC}' => Self::EITHER.with(Self::PROLONGED_SOUND_MARK),
            'っ' => Self::HIRAGANA.with(Self::SOKUON),
            'ん' => Self::HIRAGANA.with(Self::HATSUON),
            'ッ' => Self::KATAKANA.with(Self::SOKUON),
            'ン' => Self::KATAKANA.with(Self::HATSUON),
            '\u{FF6F}' => Self::KATAKANA.with(Self::SOKUON | Self::HALFWIDTH),
            '\u{FF9D}' => Self::KATAKANA.with(Self::HATSUON | Self::HALFWIDTH),
            '\u{3041}'..='\u{309C}' | '\u{309F}' => Self::HIRAGANA.with(Self::VOWEL_ENDED),
            '\u{30A1}'..='\u{30FA}' | '\u{30FD}'..='\u{30FF}' => {
                Self::KATAKANA.with(Self::VOWEL_ENDED)
            }
            '\u{FF66}'..='\u{FF9F}' => {
                Self::KATAKANA.with(Self::VOWEL_ENDED | Self::HALFWIDTH)
            }
            _ => Self::OTHER,
        }
    }
}

fn is_hyphen_like(pair: &Option<CharPair>) -> bool {
    matches!(
        pair.and_then(|p| p.plain()),
        Some(
            '\u{002D}'
                | '\u{2010}'
                | '\u{2014}'
                | '\u{2015}'
                | '\u{2212}'
                | '\u{FF0D}'
                | '\u{FF70}'
                | '\u{30FC}'
        )
    )
}

/// Normalizes hyphen-like characters that follow kana into prolonged
/// sound marks, and optionally those that follow letters or digits into
/// hyphens.
pub struct ProlongedSoundMarks {
    options: ProlongedSoundMarksOptions,
    prolongables: u8,
}

impl ProlongedSoundMarks {
    pub fn new(options: &ProlongedSoundMarksOptions) -> Self {
        let mut prolongables = CharClass::VOWEL_ENDED | CharClass::PROLONGED_SOUND_MARK;
        if options.allow_prolonged_hatsuon {
            prolongables |= CharClass::HATSUON;
        }
        if options.allow_prolonged_sokuon {
            prolongables |= CharClass::SOKUON;
        }
        Self {
            options: *options,
            prolongables,
        }
    }
}

impl Transliterator for ProlongedSoundMarks {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(ProlongedSoundMarksStream {
            input,
            stage: self,
            cursor: OffsetCursor::default(),
            last: None,
            queue: VecDeque::new(),
        })
    }

    fn name(&self) -> &'static str {
        "prolonged-sound-marks"
    }
}

struct ProlongedSoundMarksStream<'a> {
    input: BoxStream<'a>,
    stage: &'a ProlongedSoundMarks,
    cursor: OffsetCursor,
    /// Class of the last character that was not hyphen-like.
    last: Option<CharClass>,
    queue: VecDeque<CharId>,
}

impl ProlongedSoundMarksStream<'_> {
    /// Rewrite a run of hyphen-likes that follows a letter or digit.
    ///
    /// The run extends up to the next non-hyphen character (or the end of
    /// input), which becomes the new anchor. Every hyphen in the run takes
    /// the width of the character before the run.
    fn rewrite_alnum_run(&mut self, arena: &mut CharArena, first: CharId, prev: CharClass) -> CharId {
        let mut rest = Vec::new();
        let anchor = loop {
            match self.input.next(arena) {
                Some(id) if is_hyphen_like(&arena[id].pair) => rest.push(id),
                other => break other,
            }
        };

        // A run touched by an earlier stage is left as it is.
        let keep = self.stage.options.skip_already_transliterated_chars
            && rest.iter().any(|&id| arena.is_transliterated(id));
        let hyphen = CharPair::new(if prev.is_halfwidth() {
            '\u{002D}'
        } else {
            '\u{FF0D}'
        });
        let rewrite = |cursor: &mut OffsetCursor, arena: &mut CharArena, id: CharId| {
            if keep {
                cursor.pass(arena, id)
            } else {
                cursor.emit(arena, hyphen, id)
            }
        };
        let out = rewrite(&mut self.cursor, arena, first);
        for id in rest {
            let nid = rewrite(&mut self.cursor, arena, id);
            self.queue.push_back(nid);
        }
        if let Some(anchor) = anchor {
            self.last = Some(CharClass::of(&arena[anchor].pair));
            let nid = self.cursor.pass(arena, anchor);
            self.queue.push_back(nid);
        }
        out
    }
}

impl CharStream for ProlongedSoundMarksStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        if let Some(id) = self.queue.pop_front() {
            return Some(id);
        }
        let id = self.input.next(arena)?;
        let pair = arena[id].pair;

        if !is_hyphen_like(&pair) {
            self.last = Some(CharClass::of(&pair));
            return Some(self.cursor.pass(arena, id));
        }

        let stage = self.stage;
        let skip = stage.options.skip_already_transliterated_chars && arena.is_transliterated(id);
        if let Some(last) = self.last.filter(|_| !skip) {
            if last.has_any(stage.prolongables) {
                let mark = if last.is_halfwidth() { '\u{FF70}' } else { '\u{30FC}' };
                return Some(self.cursor.emit(arena, CharPair::new(mark), id));
            }
            if stage.options.replace_prolonged_marks_following_alnums && last.is_alnum() {
                return Some(self.rewrite_alnum_run(arena, id, last));
            }
        }
        Some(self.cursor.pass(arena, id))
    }

    fn size_hint(&self) -> Option<usize> {
        self.input.size_hint().map(|n| n + self.queue.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing::{assert_offsets, run};

    fn stage(options: ProlongedSoundMarksOptions) -> ProlongedSoundMarks {
        ProlongedSoundMarks::new(&options)
    }

    fn alnum() -> ProlongedSoundMarks {
        stage(ProlongedSoundMarksOptions {
            replace_prolonged_marks_following_alnums: true,
            ..Default::default()
        })
    }

    #[test]
    fn hyphen_after_kana_becomes_prolonged_mark() {
        let s = stage(Default::default());
        assert_eq!(run(&s, "ラ-メン"), "ラーメン");
        assert_eq!(run(&s, "ゴ—ル"), "ゴール");
        assert_eq!(run(&s, "ｽ-ﾌﾟ"), "ｽｰﾌﾟ");
        assert_eq!(run(&s, "ア－－"), "アーー");
        assert_offsets(&s, "ラ-メン");
    }

    #[test]
    fn hatsuon_and_sokuon_need_options() {
        assert_eq!(run(&stage(Default::default()), "ン-"), "ン-");
        assert_eq!(run(&stage(Default::default()), "ッ-"), "ッ-");
        let s = stage(ProlongedSoundMarksOptions {
            allow_prolonged_hatsuon: true,
            allow_prolonged_sokuon: true,
            ..Default::default()
        });
        assert_eq!(run(&s, "ン-"), "ンー");
        assert_eq!(run(&s, "ｯ-"), "ｯｰ");
    }

    #[test]
    fn hyphen_without_predecessor_untouched() {
        let s = stage(Default::default());
        assert_eq!(run(&s, "-ア"), "-ア");
        assert_eq!(run(&s, "漢-字"), "漢-字");
    }

    #[test]
    fn alnum_runs_need_option() {
        assert_eq!(run(&stage(Default::default()), "1ー－2ー3"), "1ー－2ー3");
        assert_eq!(run(&alnum(), "1ー－2ー3"), "1--2-3");
    }

    #[test]
    fn alnum_run_takes_width_of_predecessor() {
        assert_eq!(run(&alnum(), "Ａーー"), "－－");
        assert_eq!(run(&alnum(), "Ａーーb"), "－－b");
        assert_eq!(run(&alnum(), "aー—b"), "a--b");
    }

    #[test]
    fn alnum_run_rewritten_at_end_of_input() {
        assert_eq!(run(&alnum(), "xー"), "x-");
        assert_eq!(run(&alnum(), "xーー"), "x--");
        assert_offsets(&alnum(), "xーー");
    }

    #[test]
    fn alnum_anchor_updates_last_class() {
        // The anchor "カ" makes the following hyphen a prolonged mark.
        assert_eq!(run(&alnum(), "1ーカー"), "1-カー");
        assert_offsets(&alnum(), "1ーカー");
    }

    #[test]
    fn selector_keeps_base_class() {
        let s = stage(Default::default());
        assert_eq!(run(&s, "ア\u{FE00}-"), "ア\u{FE00}ー");
        assert_eq!(run(&alnum(), "a\u{FE0F}ー"), "a\u{FE0F}-");
        assert_offsets(&s, "ア\u{FE00}-");
    }

    #[test]
    fn skip_applies_to_whole_alnum_run() {
        use crate::chain::Chain;
        use crate::stages::{Jisx0201AndAlikeOptions, StageConfig};

        // Widening turns the trailing "-" into an already rewritten "－".
        let widen = StageConfig::Jisx0201AndAlike(Jisx0201AndAlikeOptions {
            fullwidth_to_halfwidth: false,
            ..Default::default()
        });
        let options = ProlongedSoundMarksOptions {
            replace_prolonged_marks_following_alnums: true,
            ..Default::default()
        };
        let rewrite =
            Chain::from_configs(&[widen.clone(), StageConfig::ProlongedSoundMarks(options)])
                .unwrap();
        assert_eq!(rewrite.transliterate_str("Ａーー-"), "Ａ－－－");

        let skip = Chain::from_configs(&[
            widen,
            StageConfig::ProlongedSoundMarks(ProlongedSoundMarksOptions {
                skip_already_transliterated_chars: true,
                ..options
            }),
        ])
        .unwrap();
        assert_eq!(skip.transliterate_str("Ａーー-"), "Ａーー－");
        assert_eq!(skip.transliterate_str("Ａーー"), "Ａ－－");
        assert_offsets(&skip, "Ａーー-b");
    }

    #[test]
    fn class_bits() {
        assert!(CharClass::of(&Some(CharPair::new('5'))).is_alnum());
        assert!(CharClass::of(&Some(CharPair::new('５'))).is_alnum());
        assert!(!CharClass::of(&Some(CharPair::new('ア'))).is_alnum());
        assert!(CharClass::of(&None).is_halfwidth());
        assert_eq!(
            CharClass::of(&Some(CharPair::with_selector('ア', '\u{FE00}'))),
            CharClass::of(&Some(CharPair::new('ア')))
        );
    }
}
