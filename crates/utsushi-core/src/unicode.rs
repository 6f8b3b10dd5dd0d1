//! Character-level Unicode classification for Japanese text.

/// Check for a variation selector: the SVS block (U+FE00..U+FE0F) or the
/// ideographic supplement (U+E0100..U+E01EF).
pub fn is_variation_selector(c: char) -> bool {
    ('\u{FE00}'..='\u{FE0F}').contains(&c) || ('\u{E0100}'..='\u{E01EF}').contains(&c)
}

/// Assigned hiragana letters (U+3041..U+3096). Marks and iteration marks in
/// the rest of the block are excluded.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

/// Katakana letters (U+30A1..U+30FA), without the middle dot, the prolonged
/// sound mark and the iteration marks.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30FA}').contains(&c)
}

/// Halfwidth katakana letters and sound marks (U+FF66..U+FF9F).
pub fn is_halfwidth_katakana(c: char) -> bool {
    ('\u{FF66}'..='\u{FF9F}').contains(&c)
}

/// CJK unified ideographs, including extensions A through G.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || ('\u{2A700}'..='\u{2B73F}').contains(&c)
        || ('\u{2B740}'..='\u{2B81F}').contains(&c)
        || ('\u{2B820}'..='\u{2CEAF}').contains(&c)
        || ('\u{2CEB0}'..='\u{2EBEF}').contains(&c)
        || ('\u{30000}'..='\u{3134F}').contains(&c)
}

pub fn is_fullwidth_digit(c: char) -> bool {
    ('\u{FF10}'..='\u{FF19}').contains(&c)
}

pub fn is_fullwidth_latin(c: char) -> bool {
    ('\u{FF21}'..='\u{FF3A}').contains(&c) || ('\u{FF41}'..='\u{FF5A}').contains(&c)
}
