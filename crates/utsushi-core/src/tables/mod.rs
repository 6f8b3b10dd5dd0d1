//! Static lookup tables, embedded as TOML and parsed on first use.
//!
//! Each accessor returns a `&'static` table built once behind a `OnceLock`.
//! The embedded files are checked by `build.rs`, so a parse failure here
//! means the data itself is malformed.

mod char_table;
mod circled;
mod hyphens;
mod ivs_svs;
pub mod kana;

use std::sync::OnceLock;

use tracing::debug;

pub use char_table::{parse_char_table, CharTable};
pub use circled::{parse_circled_toml, CircledEntry, CircledKind, CircledTable};
pub use hyphens::{parse_hyphens_toml, HyphensCharset, HyphensRecord, HyphensTable};
pub use ivs_svs::{parse_ivs_svs_toml, Charset, IvsSvsRecord};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("{0}: table is empty")]
    Empty(&'static str),
    #[error("{table}: invalid key {key:?}: {reason}")]
    InvalidKey {
        table: &'static str,
        key: String,
        reason: String,
    },
    #[error("{table}: invalid value for {key:?}: {reason}")]
    InvalidValue {
        table: &'static str,
        key: String,
        reason: String,
    },
}

macro_rules! embedded_char_table {
    ($(#[$doc:meta])* $fn_name:ident, $file:literal) => {
        $(#[$doc])*
        pub fn $fn_name() -> &'static CharTable {
            static INSTANCE: OnceLock<CharTable> = OnceLock::new();
            INSTANCE.get_or_init(|| {
                let table = parse_char_table(
                    stringify!($fn_name),
                    include_str!(concat!("data/", $file)),
                )
                .expect(concat!($file, " must be valid"));
                debug!(table = stringify!($fn_name), entries = table.len(), "loaded");
                table
            })
        }
    };
}

embedded_char_table!(
    /// Unicode spaces to U+0020, plus zero-width characters that are dropped.
    spaces,
    "spaces.toml"
);
embedded_char_table!(
    /// Kangxi and CJK supplement radicals to their unified ideographs.
    radicals,
    "radicals.toml"
);
embedded_char_table!(mathematical_alphanumerics, "mathematical_alphanumerics.toml");
embedded_char_table!(
    /// Kanbun annotation marks (U+3192..U+319F) to plain characters.
    ideographic_annotations,
    "ideographic_annotations.toml"
);
embedded_char_table!(roman_numerals, "roman_numerals.toml");
embedded_char_table!(
    /// Ligatures and squared words to their spelled-out form.
    combined,
    "combined.toml"
);
embedded_char_table!(kanji_old_new, "kanji_old_new.toml");

pub fn circled_or_squared() -> &'static CircledTable {
    static INSTANCE: OnceLock<CircledTable> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let table = parse_circled_toml(include_str!("data/circled_or_squared.toml"))
            .expect("circled_or_squared.toml must be valid");
        debug!(table = "circled_or_squared", entries = table.len(), "loaded");
        table
    })
}

pub fn hyphens() -> &'static HyphensTable {
    static INSTANCE: OnceLock<HyphensTable> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let table = parse_hyphens_toml(include_str!("data/hyphens.toml"))
            .expect("hyphens.toml must be valid");
        debug!(table = "hyphens", entries = table.len(), "loaded");
        table
    })
}

pub fn ivs_svs_records() -> &'static [IvsSvsRecord] {
    static INSTANCE: OnceLock<Vec<IvsSvsRecord>> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let records = parse_ivs_svs_toml(include_str!("data/ivs_svs_base.toml"))
            .expect("ivs_svs_base.toml must be valid");
        debug!(table = "ivs_svs_base", entries = records.len(), "loaded");
        records
    })
}
