//! Logical characters and the arena they live in.
//!
//! A logical character is one Unicode scalar, optionally paired with the
//! variation selector that immediately followed it in the input text.
//! Stages never mutate an entry: they allocate a fresh one in the
//! [`CharArena`] that points back at the entry it was derived from.

use std::fmt;
use std::ops::Index;

use crate::unicode::is_variation_selector;

/// A base scalar and its optional variation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharPair {
    pub base: char,
    pub selector: Option<char>,
}

impl CharPair {
    pub const fn new(base: char) -> Self {
        Self {
            base,
            selector: None,
        }
    }

    pub const fn with_selector(base: char, selector: char) -> Self {
        Self {
            base,
            selector: Some(selector),
        }
    }

    /// Returns the base scalar if no selector is attached.
    pub fn plain(&self) -> Option<char> {
        match self.selector {
            None => Some(self.base),
            Some(_) => None,
        }
    }

    /// Rendered length in UTF-8 bytes.
    pub fn len_utf8(&self) -> usize {
        self.base.len_utf8() + self.selector.map_or(0, char::len_utf8)
    }

    pub fn push_to(&self, buf: &mut String) {
        buf.push(self.base);
        if let Some(s) = self.selector {
            buf.push(s);
        }
    }

    /// Split `s` into logical characters, attaching each variation selector
    /// to the scalar right before it.
    pub fn split(s: &str) -> Vec<CharPair> {
        let mut result = Vec::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(base) = chars.next() {
            let selector = chars.next_if(|&c| is_variation_selector(c));
            result.push(CharPair { base, selector });
        }
        result
    }

    /// Parse `s` as exactly one logical character.
    pub fn parse_one(s: &str) -> Option<CharPair> {
        match CharPair::split(s).as_slice() {
            [pair] => Some(*pair),
            _ => None,
        }
    }
}

impl From<char> for CharPair {
    fn from(base: char) -> Self {
        Self::new(base)
    }
}

impl fmt::Display for CharPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if let Some(s) = self.selector {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Handle to an entry in a [`CharArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharId(u32);

impl CharId {
    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("a char arena holds at most u32::MAX chars"))
    }
}

/// One node of the stream.
///
/// `pair` is `None` only for the sentinel that terminates a stream.
/// `offset` is the byte position at which this character is rendered in the
/// output of the stage that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalChar {
    pub pair: Option<CharPair>,
    pub offset: usize,
    pub source: Option<CharId>,
}

impl LogicalChar {
    pub fn is_sentinel(&self) -> bool {
        self.pair.is_none()
    }

    /// Base scalar when the character carries no selector.
    pub fn plain(&self) -> Option<char> {
        self.pair.and_then(|p| p.plain())
    }

    /// Rendered length in UTF-8 bytes. Zero for the sentinel.
    pub fn len_utf8(&self) -> usize {
        self.pair.map_or(0, |p| p.len_utf8())
    }
}

/// Append-only storage for every logical character of one transliteration.
#[derive(Debug, Default)]
pub struct CharArena {
    chars: Vec<LogicalChar>,
}

impl CharArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, id: CharId) -> Option<&LogicalChar> {
        self.chars.get(id.0 as usize)
    }

    pub fn alloc(&mut self, c: LogicalChar) -> CharId {
        let id = CharId::from_index(self.chars.len());
        self.chars.push(c);
        id
    }

    /// Allocate a new character derived from `source`.
    pub fn derive(&mut self, pair: CharPair, offset: usize, source: CharId) -> CharId {
        self.alloc(LogicalChar {
            pair: Some(pair),
            offset,
            source: Some(source),
        })
    }

    /// Allocate a copy of `id` at a new offset. Used for pass-through; the
    /// copy points back at the original, sentinels included.
    pub fn with_offset(&mut self, id: CharId, offset: usize) -> CharId {
        let pair = self[id].pair;
        self.alloc(LogicalChar {
            pair,
            offset,
            source: Some(id),
        })
    }

    /// Split `text` into logical characters followed by a sentinel.
    ///
    /// A scalar immediately followed by a variation selector becomes one
    /// character at the offset of the base scalar. The sentinel's offset is
    /// the byte length of `text`.
    pub fn build_char_array(&mut self, text: &str) -> Vec<CharId> {
        let mut ids = Vec::with_capacity(text.len() + 1);
        let mut chars = text.char_indices().peekable();
        while let Some((offset, base)) = chars.next() {
            let selector = chars
                .next_if(|&(_, c)| is_variation_selector(c))
                .map(|(_, c)| c);
            ids.push(self.alloc(LogicalChar {
                pair: Some(CharPair { base, selector }),
                offset,
                source: None,
            }));
        }
        ids.push(self.alloc(LogicalChar {
            pair: None,
            offset: text.len(),
            source: None,
        }));
        ids
    }

    /// True if any link in the provenance chain of `id` changed the value.
    pub fn is_transliterated(&self, id: CharId) -> bool {
        let mut current = &self[id];
        while let Some(parent_id) = current.source {
            let parent = &self[parent_id];
            if parent.pair != current.pair {
                return true;
            }
            current = parent;
        }
        false
    }
}

impl Index<CharId> for CharArena {
    type Output = LogicalChar;

    fn index(&self, id: CharId) -> &LogicalChar {
        &self.chars[id.0 as usize]
    }
}
