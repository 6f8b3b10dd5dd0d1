//! Context-free lookup stages: one input character maps to zero or more
//! output characters, with no lookahead.

use std::borrow::Cow;
use std::collections::VecDeque;

use crate::chain::Transliterator;
use crate::char::{CharArena, CharId};
use crate::stream::{BoxStream, CharStream, OffsetCursor};
use crate::tables::CharTable;

/// Stage backed by a single [`CharTable`].
pub struct TableStage {
    name: &'static str,
    table: Cow<'static, CharTable>,
}

impl TableStage {
    pub fn new(name: &'static str, table: &'static CharTable) -> Self {
        Self {
            name,
            table: Cow::Borrowed(table),
        }
    }

    /// Stage over a table computed from options at build time.
    pub fn owned(name: &'static str, table: CharTable) -> Self {
        Self {
            name,
            table: Cow::Owned(table),
        }
    }

    pub fn table(&self) -> &CharTable {
        &self.table
    }
}

impl Transliterator for TableStage {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(TableStream::new(input, &self.table))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

pub(crate) struct TableStream<'a> {
    input: BoxStream<'a>,
    table: &'a CharTable,
    cursor: OffsetCursor,
    queue: VecDeque<CharId>,
}

impl<'a> TableStream<'a> {
    pub(crate) fn new(input: BoxStream<'a>, table: &'a CharTable) -> Self {
        Self {
            input,
            table,
            cursor: OffsetCursor::default(),
            queue: VecDeque::new(),
        }
    }
}

impl CharStream for TableStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        if let Some(id) = self.queue.pop_front() {
            return Some(id);
        }
        let table = self.table;
        loop {
            let id = self.input.next(arena)?;
            let replacement = arena[id].pair.and_then(|pair| table.get(&pair));
            match replacement {
                Some(pairs) => {
                    // An empty expansion drops the character.
                    if let Some(first) = self.cursor.expand(arena, pairs, id, &mut self.queue) {
                        return Some(first);
                    }
                }
                None => return Some(self.cursor.pass(arena, id)),
            }
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.input.size_hint().map(|n| n + self.queue.len())
    }
}
