use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::chain::Transliterator;
use crate::char::{CharArena, CharId, CharPair};
use crate::stream::{BoxStream, CharStream, OffsetCursor};
use crate::tables::kana::{semivoiced_pairs, voiced_pairs};

const COMBINING_VOICED: char = '\u{3099}';
const COMBINING_SEMIVOICED: char = '\u{309A}';
const VOICED: char = '\u{309B}';
const SEMIVOICED: char = '\u{309C}';

/// Iteration marks that take a voiced sound mark like a kana letter.
const ITERATION_MARK_PAIRS: [(char, char); 4] = [
    ('\u{309D}', '\u{309E}'),
    ('\u{30FD}', '\u{30FE}'),
    ('\u{3031}', '\u{3032}'),
    ('\u{3033}', '\u{3034}'),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiraKataCompositionOptions {
    /// Also compose with the spacing marks U+309B and U+309C.
    pub compose_non_combining_marks: bool,
}

type CompositionTable = HashMap<(char, char), char>;

/// Folds a kana letter followed by a sound mark into the precomposed letter.
pub struct HiraKataComposition {
    table: &'static CompositionTable,
}

impl HiraKataComposition {
    pub fn new(options: &HiraKataCompositionOptions) -> Self {
        Self {
            table: composition_table(options.compose_non_combining_marks),
        }
    }
}

impl Transliterator for HiraKataComposition {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(CompositionStream {
            input,
            table: self.table,
            cursor: OffsetCursor::default(),
            pending: None,
            queue: VecDeque::new(),
        })
    }

    fn name(&self) -> &'static str {
        "hira-kata-composition"
    }
}

fn composition_table(non_combining: bool) -> &'static CompositionTable {
    static COMBINING_ONLY: OnceLock<CompositionTable> = OnceLock::new();
    static WITH_NON_COMBINING: OnceLock<CompositionTable> = OnceLock::new();
    let cell = if non_combining {
        &WITH_NON_COMBINING
    } else {
        &COMBINING_ONLY
    };
    cell.get_or_init(|| {
        let mut voiced_marks = vec![COMBINING_VOICED];
        let mut semivoiced_marks = vec![COMBINING_SEMIVOICED];
        if non_combining {
            voiced_marks.push(VOICED);
            semivoiced_marks.push(SEMIVOICED);
        }

        let mut table = HashMap::new();
        for (base, voiced) in voiced_pairs().chain(ITERATION_MARK_PAIRS) {
            for &mark in &voiced_marks {
                table.insert((base, mark), voiced);
            }
        }
        for (base, semivoiced) in semivoiced_pairs() {
            for &mark in &semivoiced_marks {
                table.insert((base, mark), semivoiced);
            }
        }
        table
    })
}

struct CompositionStream<'a> {
    input: BoxStream<'a>,
    table: &'a CompositionTable,
    cursor: OffsetCursor,
    /// Last letter read but not yet emitted.
    pending: Option<CharId>,
    queue: VecDeque<CharId>,
}

impl CompositionStream<'_> {
    fn compose(&self, arena: &CharArena, prev: CharId, current: CharId) -> Option<char> {
        let base = arena[prev].plain()?;
        let mark = arena[current].plain()?;
        self.table.get(&(base, mark)).copied()
    }
}

impl CharStream for CompositionStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        if let Some(id) = self.queue.pop_front() {
            return Some(id);
        }
        loop {
            let Some(id) = self.input.next(arena) else {
                return self.pending.take().map(|p| self.cursor.pass(arena, p));
            };
            let Some(prev) = self.pending.take() else {
                if arena[id].is_sentinel() {
                    return Some(self.cursor.pass(arena, id));
                }
                self.pending = Some(id);
                continue;
            };

            if let Some(composed) = self.compose(arena, prev, id) {
                return Some(self.cursor.emit(arena, CharPair::new(composed), prev));
            }

            let out = self.cursor.pass(arena, prev);
            if arena[id].is_sentinel() {
                let sentinel = self.cursor.pass(arena, id);
                self.queue.push_back(sentinel);
            } else {
                self.pending = Some(id);
            }
            return Some(out);
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.input
            .size_hint()
            .map(|n| n + self.queue.len() + usize::from(self.pending.is_some()))
    }
}
