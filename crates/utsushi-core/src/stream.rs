//! Pull-based streams of logical characters.
//!
//! A stream yields [`CharId`]s into a shared [`CharArena`]. The last item of
//! a well-formed stream is a sentinel; stages also treat `None` as the end so
//! that both protocols render the same text.

use std::collections::VecDeque;

use crate::char::{CharArena, CharId, CharPair};

pub trait CharStream {
    /// Pull the next character, allocating into `arena` as needed.
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId>;

    /// Estimated number of characters still to come. Only used to size
    /// output buffers.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

pub type BoxStream<'a> = Box<dyn CharStream + 'a>;

/// Stream over a pre-built array of characters.
pub struct ArrayStream {
    ids: std::vec::IntoIter<CharId>,
}

impl ArrayStream {
    pub fn new(ids: Vec<CharId>) -> Self {
        Self {
            ids: ids.into_iter(),
        }
    }
}

impl CharStream for ArrayStream {
    fn next(&mut self, _arena: &mut CharArena) -> Option<CharId> {
        self.ids.next()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.ids.len())
    }
}

/// Drain `stream` into a string, skipping sentinels.
pub fn render<S: CharStream + ?Sized>(arena: &mut CharArena, stream: &mut S) -> String {
    let mut out = String::with_capacity(stream.size_hint().map_or(0, |n| n * 3));
    while let Some(id) = stream.next(arena) {
        if let Some(pair) = arena[id].pair {
            pair.push_to(&mut out);
        }
    }
    out
}

/// Drain `stream` into a vector of handles, sentinels included.
pub fn collect<S: CharStream + ?Sized>(arena: &mut CharArena, stream: &mut S) -> Vec<CharId> {
    let mut ids = Vec::with_capacity(stream.size_hint().unwrap_or(0));
    while let Some(id) = stream.next(arena) {
        ids.push(id);
    }
    ids
}

/// Running output offset of a stage.
///
/// Every character a stage emits goes through one of these methods so the
/// offset always advances by the rendered length of what was emitted.
#[derive(Debug, Default)]
pub(crate) struct OffsetCursor(usize);

impl OffsetCursor {
    /// Re-emit `id` unchanged at the current offset.
    pub(crate) fn pass(&mut self, arena: &mut CharArena, id: CharId) -> CharId {
        let nid = arena.with_offset(id, self.0);
        self.0 += arena[nid].len_utf8();
        nid
    }

    /// Emit `pair` as a replacement for `source`.
    pub(crate) fn emit(&mut self, arena: &mut CharArena, pair: CharPair, source: CharId) -> CharId {
        let nid = arena.derive(pair, self.0, source);
        self.0 += pair.len_utf8();
        nid
    }

    /// Emit every pair of an expansion. The first is returned, the rest are
    /// queued with their offsets already assigned. Returns `None` for an
    /// empty expansion.
    pub(crate) fn expand(
        &mut self,
        arena: &mut CharArena,
        pairs: &[CharPair],
        source: CharId,
        queue: &mut VecDeque<CharId>,
    ) -> Option<CharId> {
        let (first, rest) = pairs.split_first()?;
        let first = self.emit(arena, *first, source);
        for &pair in rest {
            let id = self.emit(arena, pair, source);
            queue.push_back(id);
        }
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_skips_sentinel() {
        let mut arena = CharArena::new();
        let ids = arena.build_char_array("かな");
        let mut stream = ArrayStream::new(ids);
        assert_eq!(render(&mut arena, &mut stream), "かな");
    }

    #[test]
    fn render_keeps_selectors() {
        let mut arena = CharArena::new();
        let ids = arena.build_char_array("葛\u{E0100}");
        let mut stream = ArrayStream::new(ids);
        assert_eq!(render(&mut arena, &mut stream), "葛\u{E0100}");
    }

    #[test]
    fn render_stops_at_none_without_sentinel() {
        let mut arena = CharArena::new();
        let mut ids = arena.build_char_array("abc");
        ids.pop();
        let mut stream = ArrayStream::new(ids);
        assert_eq!(render(&mut arena, &mut stream), "abc");
    }

    #[test]
    fn array_stream_reports_remaining() {
        let mut arena = CharArena::new();
        let ids = arena.build_char_array("ab");
        let mut stream = ArrayStream::new(ids);
        assert_eq!(stream.size_hint(), Some(3));
        stream.next(&mut arena);
        assert_eq!(stream.size_hint(), Some(2));
    }

    #[test]
    fn cursor_expand_assigns_consecutive_offsets() {
        let mut arena = CharArena::new();
        let ids = arena.build_char_array("㍿");
        let mut cursor = OffsetCursor::default();
        let mut queue = VecDeque::new();
        let pairs = CharPair::split("株式");
        let first = cursor.expand(&mut arena, &pairs, ids[0], &mut queue);
        let first = first.unwrap();
        assert_eq!(arena[first].offset, 0);
        assert_eq!(queue.len(), 1);
        assert_eq!(arena[queue[0]].offset, 3);
        let sentinel = cursor.pass(&mut arena, ids[1]);
        assert_eq!(arena[sentinel].offset, 6);
    }

    #[test]
    fn cursor_expand_empty_emits_nothing() {
        let mut arena = CharArena::new();
        let ids = arena.build_char_array("\u{FEFF}");
        let mut cursor = OffsetCursor::default();
        let mut queue = VecDeque::new();
        assert!(cursor.expand(&mut arena, &[], ids[0], &mut queue).is_none());
        let sentinel = cursor.pass(&mut arena, ids[1]);
        assert_eq!(arena[sentinel].offset, 0);
    }
}
