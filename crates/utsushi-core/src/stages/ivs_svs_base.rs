use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::Transliterator;
use crate::char::{CharArena, CharId, CharPair};
use crate::stream::{BoxStream, CharStream, OffsetCursor};
use crate::tables::{ivs_svs_records, Charset};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IvsSvsMode {
    /// Attach the registered selector to a bare base character.
    IvsOrSvs,
    /// Reduce a variation sequence to its base character.
    #[default]
    Base,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvsSvsBaseOptions {
    pub mode: IvsSvsMode,
    /// In base mode, strip selectors that have no registered mapping too.
    pub drop_selectors_altogether: bool,
    pub charset: Charset,
    /// In ivs-or-svs mode, use the standardized sequence when one exists.
    pub prefer_svs: bool,
}

type BaseMap = HashMap<CharPair, char>;
type VariantMap = HashMap<char, CharPair>;

fn charset_index(charset: Charset) -> usize {
    match charset {
        Charset::Unijis90 => 0,
        Charset::Unijis2004 => 1,
    }
}

fn base_map(charset: Charset) -> &'static BaseMap {
    static MAPS: [OnceLock<BaseMap>; 2] = [OnceLock::new(), OnceLock::new()];
    MAPS[charset_index(charset)].get_or_init(|| {
        let mut map = HashMap::new();
        for record in ivs_svs_records() {
            let Some(base) = record.base(charset) else {
                continue;
            };
            map.insert(record.ivs, base);
            if let Some(svs) = record.svs {
                map.insert(svs, base);
            }
        }
        debug!(?charset, entries = map.len(), "ivs/svs base map built");
        map
    })
}

fn variant_map(charset: Charset, prefer_svs: bool) -> &'static VariantMap {
    static MAPS: [OnceLock<VariantMap>; 4] = [
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
    ];
    let index = charset_index(charset) * 2 + usize::from(prefer_svs);
    MAPS[index].get_or_init(|| {
        let mut map = HashMap::new();
        for record in ivs_svs_records() {
            let Some(base) = record.base(charset) else {
                continue;
            };
            let sequence = match record.svs {
                Some(svs) if prefer_svs => svs,
                _ => record.ivs,
            };
            // The first record registered for a base wins.
            map.entry(base).or_insert(sequence);
        }
        debug!(?charset, prefer_svs, entries = map.len(), "ivs/svs variant map built");
        map
    })
}

enum Lookup {
    Base {
        map: &'static BaseMap,
        drop_all: bool,
    },
    Variant(&'static VariantMap),
}

impl Lookup {
    fn replace(&self, pair: CharPair) -> Option<CharPair> {
        match self {
            Lookup::Base { map, drop_all } => {
                pair.selector?;
                match map.get(&pair) {
                    Some(&base) => Some(CharPair::new(base)),
                    None if *drop_all => Some(CharPair::new(pair.base)),
                    None => None,
                }
            }
            Lookup::Variant(map) => map.get(&pair.plain()?).copied(),
        }
    }
}

/// Converts between variation sequences and their base characters.
pub struct IvsSvsBase {
    lookup: Lookup,
}

impl IvsSvsBase {
    pub fn new(options: &IvsSvsBaseOptions) -> Self {
        let lookup = match options.mode {
            IvsSvsMode::Base => Lookup::Base {
                map: base_map(options.charset),
                drop_all: options.drop_selectors_altogether,
            },
            IvsSvsMode::IvsOrSvs => {
                Lookup::Variant(variant_map(options.charset, options.prefer_svs))
            }
        };
        Self { lookup }
    }
}

impl Transliterator for IvsSvsBase {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        Box::new(IvsSvsStream {
            input,
            lookup: &self.lookup,
            cursor: OffsetCursor::default(),
        })
    }

    fn name(&self) -> &'static str {
        "ivs-svs-base"
    }
}

struct IvsSvsStream<'a> {
    input: BoxStream<'a>,
    lookup: &'a Lookup,
    cursor: OffsetCursor,
}

impl CharStream for IvsSvsStream<'_> {
    fn next(&mut self, arena: &mut CharArena) -> Option<CharId> {
        let id = self.input.next(arena)?;
        match arena[id].pair.and_then(|pair| self.lookup.replace(pair)) {
            Some(replacement) => Some(self.cursor.emit(arena, replacement, id)),
            None => Some(self.cursor.pass(arena, id)),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.input.size_hint()
    }
}
