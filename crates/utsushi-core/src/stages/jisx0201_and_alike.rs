//! Conversion between fullwidth characters and their JIS X 0201 halfwidth
//! counterparts.
//!
//! The GL half covers ASCII-range symbols, digits and letters; the GR half
//! covers halfwidth katakana and CJK punctuation. Voiced katakana have no
//! single halfwidth form, so the forward direction splits them into a base
//! letter and a sound mark and the reverse direction fuses them back.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::Transliterator;
use crate::char::{CharArena, CharId, CharPair};
use crate::stream::{BoxStream, CharStream, OffsetCursor};
use crate::tables::kana::{KANA_TABLE, SMALL_KANA_TABLE};

const HALFWIDTH_VOICED_MARK: char = '\u{FF9E}';
const HALFWIDTH_SEMIVOICED_MARK: char = '\u{FF9F}';

/// An option that may be left unset so that its value derives from other
/// options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Tristate {
    #[default]
    Unset,
    False,
    True,
}

impl Tristate {
    pub fn is_set(self) -> bool {
        self != Tristate::Unset
    }

    pub fn resolve_with_default(self, default: bool) -> bool {
        self.resolve_with_fallback_to(|| default)
    }

    pub fn resolve_with_fallback_to(self, fallback: impl FnOnce() -> bool) -> bool {
        match self {
            Tristate::Unset => fallback(),
            Tristate::False => false,
            Tristate::True => true,
        }
    }
}

impl From<bool> for Tristate {
    fn from(v: bool) -> Self {
        if v {
            Tristate::True
        } else {
            Tristate::False
        }
    }
}

impl From<Option<bool>> for Tristate {
    fn from(v: Option<bool>) -> Self {
        v.map_or(Tristate::Unset, Tristate::from)
    }
}

impl From<Tristate> for Option<bool> {
    fn from(t: Tristate) -> Self {
        match t {
            Tristate::Unset => None,
            Tristate::False => Some(false),
            Tristate::True => Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jisx0201AndAlikeOptions {
    /// Direction: fullwidth to halfwidth when set, the reverse otherwise.
    pub fullwidth_to_halfwidth: bool,
    pub convert_gl: bool,
    pub convert_gr: bool,
    /// Map U+30A0 (゠) to and from `=`.
    pub convert_unsafe_specials: Tristate,
    /// Forward only: also narrow hiragana to halfwidth katakana.
    pub convert_hiraganas: bool,
    /// Reverse only: fuse a halfwidth letter and the sound mark after it.
    pub combine_voiced_sound_marks: bool,
    pub u005c_as_yen_sign: Tristate,
    pub u005c_as_backslash: Tristate,
    pub u007e_as_fullwidth_tilde: Tristate,
    pub u007e_as_wave_dash: Tristate,
    pub u007e_as_overline: Tristate,
    pub u007e_as_fullwidth_macron: Tristate,
    pub u00a5_as_yen_sign: Tristate,
}

impl Default for Jisx0201AndAlikeOptions {
    fn default() -> Self {
        Self {
            fullwidth_to_halfwidth: true,
            convert_gl: true,
            convert_gr: true,
            convert_unsafe_specials: Tristate::Unset,
            convert_hiraganas: false,
            combine_voiced_sound_marks: true,
            u005c_as_yen_sign: Tristate::Unset,
            u005c_as_backslash: Tristate::Unset,
            u007e_as_fullwidth_tilde: Tristate::Unset,
            u007e_as_wave_dash: Tristate::Unset,
            u007e_as_overline: Tristate::Unset,
            u007e_as_fullwidth_macron: Tristate::Unset,
            u00a5_as_yen_sign: Tristate::Unset,
        }
    }
}

/// Special-character switches with every unset option resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Overrides {
    unsafe_specials: bool,
    u005c_as_yen_sign: bool,
    u005c_as_backslash: bool,
    u007e_as_fullwidth_tilde: bool,
    u007e_as_wave_dash: bool,
    u007e_as_overline: bool,
    u007e_as_fullwidth_macron: bool,
    u00a5_as_yen_sign: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ForwardKey {
    convert_gl: bool,
    convert_gr: bool,
    convert_hiraganas: bool,
    overrides: Overrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ReverseKey {
    convert_gl: bool,
    convert_gr: bool,
    combine_voiced_sound_marks: bool,
    overrides: Overrides,
}

impl Jisx0201AndAlikeOptions {
    fn forward_key(&self) -> ForwardKey {
        ForwardKey {
            convert_gl: self.convert_gl,
            convert_gr: self.convert_gr,
            convert_hiraganas: self.convert_hiraganas,
            overrides: Overrides {
                unsafe_specials: self.convert_unsafe_specials.resolve_with_default(true),
                u005c_as_yen_sign: self
                    .u005c_as_yen_sign
                    .resolve_with_fallback_to(|| !self.u00a5_as_yen_sign.is_set()),
                u005c_as_backslash: self.u005c_as_backslash.resolve_with_default(false),
                u007e_as_fullwidth_tilde: self.u007e_as_fullwidth_tilde.resolve_with_default(true),
                u007e_as_wave_dash: self.u007e_as_wave_dash.resolve_with_default(true),
                u007e_as_overline: self.u007e_as_overline.resolve_with_default(false),
                u007e_as_fullwidth_macron: self
                    .u007e_as_fullwidth_macron
                    .resolve_with_default(false),
                u00a5_as_yen_sign: self.u00a5_as_yen_sign.resolve_with_default(false),
            },
        }
    }

    fn reverse_key(&self) -> ReverseKey {
        ReverseKey {
            convert_gl: self.convert_gl,
            convert_gr: self.convert_gr,
            combine_voiced_sound_marks: self.combine_voiced_sound_marks,
            overrides: Overrides {
                unsafe_specials: self.convert_unsafe_specials.resolve_with_default(false),
                u005c_as_yen_sign: self
                    .u005c_as_yen_sign
                    .resolve_with_fallback_to(|| !self.u005c_as_backslash.is_set()),
                u005c_as_backslash: self.u005c_as_backslash.resolve_with_default(false),
                u007e_as_fullwidth_tilde: self.u007e_as_fullwidth_tilde.resolve_with_fallback_to(
                    || {
                        !self.u007e_as_wave_dash.is_set()
                            && !self.u007e_as_overline.is_set()
                            && !self.u007e_as_fullwidth_macron.is_set()
                    },
                ),
                u007e_as_wave_dash: self.u007e_as_wave_dash.resolve_with_default(false),
                u007e_as_overline: self.u007e_as_overline.resolve_with_default(false),
                u007e_as_fullwidth_macron: self
                    .u007e_as_fullwidth_macron
                    .resolve_with_default(false),
                u00a5_as_yen_sign: self.u00a5_as_yen_sign.resolve_with_default(true),
            },
        }
    }
}

/// Fullwidth GL characters and their halfwidth forms. U+FF3C and U+FF5E are
/// left to the U+005C and U+007E overrides.
fn gl_pairs() -> impl Iterator<Item = (char, char)> {
    let ascii = ('\u{FF01}'..='\u{FF5D}')
        .filter(|&c| c != '\u{FF3C}')
        .filter_map(|c| Some((c, char::from_u32(c as u32 - 0xFEE0)?)));
    std::iter::once(('\u{3000}', ' ')).chain(ascii)
}

/// Fullwidth GR characters and their single halfwidth forms.
fn gr_pairs() -> impl Iterator<Item = (char, char)> {
    const PUNCTUATION: [(char, char); 8] = [
        ('\u{3002}', '\u{FF61}'),
        ('\u{300C}', '\u{FF62}'),
        ('\u{300D}', '\u{FF63}'),
        ('\u{3001}', '\u{FF64}'),
        ('\u{30FB}', '\u{FF65}'),
        ('\u{30FC}', '\u{FF70}'),
        ('\u{309B}', HALFWIDTH_VOICED_MARK),
        ('\u{309C}', HALFWIDTH_SEMIVOICED_MARK),
    ];
    let letters = KANA_TABLE
        .iter()
        .filter_map(|e| Some((e.katakana.base, e.halfwidth?)));
    let small = SMALL_KANA_TABLE
        .iter()
        .filter_map(|e| Some((e.katakana, e.halfwidth?)));
    PUNCTUATION.into_iter().chain(letters).chain(small)
}

/// Voiced and semi-voiced katakana with their halfwidth letter and mark.
fn voiced_letter_pairs() -> impl Iterator<Item = (char, (char, char))> {
    KANA_TABLE.iter().flat_map(|e| {
        let voiced = e
            .katakana
            .voiced
            .zip(e.halfwidth)
            .map(|(v, hw)| (v, (hw, HALFWIDTH_VOICED_MARK)));
        let semivoiced = e
            .katakana
            .semivoiced
            .zip(e.halfwidth)
            .map(|(s, hw)| (s, (hw, HALFWIDTH_SEMIVOICED_MARK)));
        voiced.into_iter().chain(semivoiced)
    })
}

/// Hiragana with their halfwidth katakana rendering.
fn hiragana_pairs() -> impl Iterator<Item = (char, (char, Option<char>))> {
    let letters = KANA_TABLE.iter().flat_map(|e| {
        let hw = e.halfwidth;
        let h = e.hiragana;
        [
            hw.map(|hw| (h.base, (hw, None))),
            h.voiced.zip(hw).map(|(v, hw)| (v, (hw, Some(HALFWIDTH_VOICED_MARK)))),
            h.semivoiced
                .zip(hw)
                .map(|(s, hw)| (s, (hw, Some(HALFWIDTH_SEMIVOICED_MARK)))),
        ]
        .into_iter()
        .flatten()
    });
    let small = SMALL_KANA_TABLE
        .iter()
        .filter_map(|e| Some((e.hiragana, (e.halfwidth?, None))));
    letters.chain(small)
}

const UNSAFE_SPECIALS: [(char, char); 1] = [('\u{30A0}', '=')];

/// Fullwidth to halfwidth; some characters narrow to a letter plus a mark.
type ForwardTable = HashMap<char, (char, Option<char>)>;

#[derive(Debug, Default)]
struct ReverseTable {
    plain: HashMap<char, char>,
    /// Halfwidth letter to its fused forms, by following mark.
    voiced: HashMap<char, HashMap<char, char>>,
}

fn build_forward(key: &ForwardKey) -> ForwardTable {
    let mut table = HashMap::new();
    let o = &key.overrides;
    if key.convert_gl {
        table.extend(gl_pairs().map(|(fw, hw)| (fw, (hw, None))));
        if o.u005c_as_yen_sign {
            table.insert('\u{FFE5}', ('\u{005C}', None));
        }
        if o.u005c_as_backslash {
            table.insert('\u{FF3C}', ('\u{005C}', None));
        }
        if o.u007e_as_fullwidth_tilde {
            table.insert('\u{FF5E}', ('\u{007E}', None));
        }
        if o.u007e_as_wave_dash {
            table.insert('\u{301C}', ('\u{007E}', None));
        }
        if o.u007e_as_overline {
            table.insert('\u{203E}', ('\u{007E}', None));
        }
        if o.u007e_as_fullwidth_macron {
            table.insert('\u{FFE3}', ('\u{007E}', None));
        }
        if o.u00a5_as_yen_sign {
            table.insert('\u{FFE5}', ('\u{00A5}', None));
        }
        if o.unsafe_specials {
            table.extend(UNSAFE_SPECIALS.map(|(fw, hw)| (fw, (hw, None))));
        }
    }
    if key.convert_gr {
        table.extend(gr_pairs().map(|(fw, hw)| (fw, (hw, None))));
        table.extend(voiced_letter_pairs().map(|(fw, (hw, mark))| (fw, (hw, Some(mark)))));
        table.insert('\u{3099}', (HALFWIDTH_VOICED_MARK, None));
        table.insert('\u{309A}', (HALFWIDTH_SEMIVOICED_MARK, None));
        if key.convert_hiraganas {
            table.extend(hiragana_pairs());
        }
    }
    table
}

fn build_reverse(key: &ReverseKey) -> ReverseTable {
    let mut table = ReverseTable::default();
    let o = &key.overrides;
    if key.convert_gl {
        table.plain.extend(gl_pairs().map(|(fw, hw)| (hw, fw)));
        if o.u005c_as_yen_sign {
            table.plain.insert('\u{005C}', '\u{FFE5}');
        }
        if o.u005c_as_backslash {
            table.plain.insert('\u{005C}', '\u{FF3C}');
        }
        if o.u007e_as_fullwidth_tilde {
            table.plain.insert('\u{007E}', '\u{FF5E}');
        }
        if o.u007e_as_wave_dash {
            table.plain.insert('\u{007E}', '\u{301C}');
        }
        if o.u007e_as_overline {
            table.plain.insert('\u{007E}', '\u{203E}');
        }
        if o.u007e_as_fullwidth_macron {
            table.plain.insert('\u{007E}', '\u{FFE3}');
        }
        if o.u00a5_as_yen_sign {
            table.plain.insert('\u{00A5}', '\u{FFE5}');
        }
        if o.unsafe_specials {
            table.plain.extend(UNSAFE_SPECIALS.map(|(fw, hw)| (hw, fw)));
        }
    }
    if key.convert_gr {
        table.plain.extend(gr_pairs().map(|(fw, hw)| (hw, fw)));
        if key.combine_voiced_sound_marks {
            for (fw, (hw, mark)) in voiced_letter_pairs() {
                table.voiced.entry(hw).or_default().insert(mark, fw);
            }
        }
    }
    table
}

/// Look `key` up in `cache`, building and publishing the table on a miss.
fn cached<K, T>(
    cache: &'static OnceLock<RwLock<HashMap<K, Arc<T>>>>,
    key: K,
    build: impl FnOnce(&K) -> T,
) -> Arc<T>
where
    K: std::hash::Hash + Eq + std::fmt::Debug,
{
    let lock = cache.get_or_init(Default::default);
    if let Some(table) = lock
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Arc::clone(table);
    }
    let table = Arc::new(build(&key));
    debug!(?key, "jisx0201 table built");
    let mut map = lock.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(map.entry(key).or_insert(table))
}

fn forward_table(key: ForwardKey) -> Arc<ForwardTable> {
    static CACHE: OnceLock<RwLock<HashMap<ForwardKey, Arc<ForwardTable>>>> = OnceLock::new();
    cached(&CACHE, key, build_forward)
}

fn reverse_table(key: ReverseKey) -> Arc<ReverseTable> {
    static CACHE: OnceLock<RwLock<HashMap<ReverseKey, Arc<ReverseTable>>>> = OnceLock::new();
    cached(&CACHE, key, build_reverse)
}

enum Direction {
    Forward(Arc<ForwardTable>),
    Reverse(Arc<ReverseTable>),
}

/// Converts between fullwidth and halfwidth forms.
pub struct Jisx0201AndAlike {
    direction: Direction,
}

impl Jisx0201AndAlike {
    pub fn new(options: &Jisx0201AndAlikeOptions) -> Self {
        let direction = if options.fullwidth_to_halfwidth {
            Direction::Forward(forward_table(options.forward_key()))
        } else {
            Direction::Reverse(reverse_table(options.reverse_key()))
        };
        Self { direction }
    }
}

impl Transliterator for Jisx0201AndAlike {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        match &self.direction {
            Direction::Forward(table) => Box::new(ForwardStream {
                input,
                table,
                cursor: OffsetCursor::default(),
                pending: None,
            }),
            Direction::Reverse(table) => Box::new(ReverseStream {
                input,
                table,
                cursor: OffsetCursor::default(),
                lookahead: None,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "jisx0201-and-alike"
    }
}

struct ForwardStream<'a> {
    input: BoxStream<'a>,
    table: &'a ForwardTable,
    cursor: OffsetCursor,
    /// Sound mark still owed for the last letter, with that letter's source.
    pending: Option<(char, CharId)>,
}

impl CharStream for ForwardStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        if let Some((mark, source)) = self.pending.take() {
            return Some(self.cursor.emit(arena, CharPair::new(mark), source));
        }
        let id = self.input.next(arena)?;
        match arena[id].plain().and_then(|c| self.table.get(&c)) {
            Some(&(letter, mark)) => {
                self.pending = mark.map(|m| (m, id));
                Some(self.cursor.emit(arena, CharPair::new(letter), id))
            }
            None => Some(self.cursor.pass(arena, id)),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.input
            .size_hint()
            .map(|n| n + usize::from(self.pending.is_some()))
    }
}

struct ReverseStream<'a> {
    input: BoxStream<'a>,
    table: &'a ReverseTable,
    cursor: OffsetCursor,
    /// Character read past a letter that did not fuse with it.
    lookahead: Option<CharId>,
}

impl CharStream for ReverseStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        let id = match self.lookahead.take() {
            Some(id) => id,
            None => self.input.next(arena)?,
        };
        let Some(c) = arena[id].plain() else {
            return Some(self.cursor.pass(arena, id));
        };

        if let Some(forms) = self.table.voiced.get(&c) {
            if let Some(next) = self.input.next(arena) {
                let fused = arena[next].plain().and_then(|mark| forms.get(&mark));
                if let Some(&fused) = fused {
                    return Some(self.cursor.emit(arena, CharPair::new(fused), id));
                }
                self.lookahead = Some(next);
            }
        }

        match self.table.plain.get(&c) {
            Some(&fw) => Some(self.cursor.emit(arena, CharPair::new(fw), id)),
            None => Some(self.cursor.pass(arena, id)),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.input
            .size_hint()
            .map(|n| n + usize::from(self.lookahead.is_some()))
    }
}
