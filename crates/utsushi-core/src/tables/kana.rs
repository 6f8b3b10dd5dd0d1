//! Hiragana/katakana correspondence shared by the kana stages.

/// One kana letter in its plain, voiced and semi-voiced forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KanaForms {
    pub base: char,
    pub voiced: Option<char>,
    pub semivoiced: Option<char>,
}

/// A row of the correspondence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KanaEntry {
    pub hiragana: KanaForms,
    pub katakana: KanaForms,
    pub halfwidth: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallKanaEntry {
    pub hiragana: char,
    pub katakana: char,
    pub halfwidth: Option<char>,
}

const fn forms(base: char, voiced: Option<char>, semivoiced: Option<char>) -> KanaForms {
    KanaForms {
        base,
        voiced,
        semivoiced,
    }
}

macro_rules! kana {
    ($h:literal, $k:literal, $hw:literal) => {
        KanaEntry {
            hiragana: forms($h, None, None),
            katakana: forms($k, None, None),
            halfwidth: Some($hw),
        }
    };
    ($h:literal / $hv:literal, $k:literal / $kv:literal, $hw:literal) => {
        KanaEntry {
            hiragana: forms($h, Some($hv), None),
            katakana: forms($k, Some($kv), None),
            halfwidth: Some($hw),
        }
    };
    ($h:literal / $hv:literal / $hs:literal, $k:literal / $kv:literal / $ks:literal, $hw:literal) => {
        KanaEntry {
            hiragana: forms($h, Some($hv), Some($hs)),
            katakana: forms($k, Some($kv), Some($ks)),
            halfwidth: Some($hw),
        }
    };
}

pub const KANA_TABLE: &[KanaEntry] = &[
    kana!('あ', 'ア', 'ｱ'),
    kana!('い', 'イ', 'ｲ'),
    kana!('う' / 'ゔ', 'ウ' / 'ヴ', 'ｳ'),
    kana!('え', 'エ', 'ｴ'),
    kana!('お', 'オ', 'ｵ'),
    kana!('か' / 'が', 'カ' / 'ガ', 'ｶ'),
    kana!('き' / 'ぎ', 'キ' / 'ギ', 'ｷ'),
    kana!('く' / 'ぐ', 'ク' / 'グ', 'ｸ'),
    kana!('け' / 'げ', 'ケ' / 'ゲ', 'ｹ'),
    kana!('こ' / 'ご', 'コ' / 'ゴ', 'ｺ'),
    kana!('さ' / 'ざ', 'サ' / 'ザ', 'ｻ'),
    kana!('し' / 'じ', 'シ' / 'ジ', 'ｼ'),
    kana!('す' / 'ず', 'ス' / 'ズ', 'ｽ'),
    kana!('せ' / 'ぜ', 'セ' / 'ゼ', 'ｾ'),
    kana!('そ' / 'ぞ', 'ソ' / 'ゾ', 'ｿ'),
    kana!('た' / 'だ', 'タ' / 'ダ', 'ﾀ'),
    kana!('ち' / 'ぢ', 'チ' / 'ヂ', 'ﾁ'),
    kana!('つ' / 'づ', 'ツ' / 'ヅ', 'ﾂ'),
    kana!('て' / 'で', 'テ' / 'デ', 'ﾃ'),
    kana!('と' / 'ど', 'ト' / 'ド', 'ﾄ'),
    kana!('な', 'ナ', 'ﾅ'),
    kana!('に', 'ニ', 'ﾆ'),
    kana!('ぬ', 'ヌ', 'ﾇ'),
    kana!('ね', 'ネ', 'ﾈ'),
    kana!('の', 'ノ', 'ﾉ'),
    kana!('は' / 'ば' / 'ぱ', 'ハ' / 'バ' / 'パ', 'ﾊ'),
    kana!('ひ' / 'び' / 'ぴ', 'ヒ' / 'ビ' / 'ピ', 'ﾋ'),
    kana!('ふ' / 'ぶ' / 'ぷ', 'フ' / 'ブ' / 'プ', 'ﾌ'),
    kana!('へ' / 'べ' / 'ぺ', 'ヘ' / 'ベ' / 'ペ', 'ﾍ'),
    kana!('ほ' / 'ぼ' / 'ぽ', 'ホ' / 'ボ' / 'ポ', 'ﾎ'),
    kana!('ま', 'マ', 'ﾏ'),
    kana!('み', 'ミ', 'ﾐ'),
    kana!('む', 'ム', 'ﾑ'),
    kana!('め', 'メ', 'ﾒ'),
    kana!('も', 'モ', 'ﾓ'),
    kana!('や', 'ヤ', 'ﾔ'),
    kana!('ゆ', 'ユ', 'ﾕ'),
    kana!('よ', 'ヨ', 'ﾖ'),
    kana!('ら', 'ラ', 'ﾗ'),
    kana!('り', 'リ', 'ﾘ'),
    kana!('る', 'ル', 'ﾙ'),
    kana!('れ', 'レ', 'ﾚ'),
    kana!('ろ', 'ロ', 'ﾛ'),
    // The wa row voices only on the katakana side.
    KanaEntry {
        hiragana: forms('わ', None, None),
        katakana: forms('ワ', Some('ヷ'), None),
        halfwidth: Some('ﾜ'),
    },
    KanaEntry {
        hiragana: forms('ゐ', None, None),
        katakana: forms('ヰ', Some('ヸ'), None),
        halfwidth: None,
    },
    KanaEntry {
        hiragana: forms('ゑ', None, None),
        katakana: forms('ヱ', Some('ヹ'), None),
        halfwidth: None,
    },
    KanaEntry {
        hiragana: forms('を', None, None),
        katakana: forms('ヲ', Some('ヺ'), None),
        halfwidth: Some('ｦ'),
    },
    kana!('ん', 'ン', 'ﾝ'),
];

pub const SMALL_KANA_TABLE: &[SmallKanaEntry] = &[
    small('ぁ', 'ァ', Some('ｧ')),
    small('ぃ', 'ィ', Some('ｨ')),
    small('ぅ', 'ゥ', Some('ｩ')),
    small('ぇ', 'ェ', Some('ｪ')),
    small('ぉ', 'ォ', Some('ｫ')),
    small('っ', 'ッ', Some('ｯ')),
    small('ゃ', 'ャ', Some('ｬ')),
    small('ゅ', 'ュ', Some('ｭ')),
    small('ょ', 'ョ', Some('ｮ')),
    small('ゎ', 'ヮ', None),
    small('ゕ', 'ヵ', None),
    small('ゖ', 'ヶ', None),
];

const fn small(hiragana: char, katakana: char, halfwidth: Option<char>) -> SmallKanaEntry {
    SmallKanaEntry {
        hiragana,
        katakana,
        halfwidth,
    }
}

/// Every (unvoiced, voiced) pair of both scripts.
pub fn voiced_pairs() -> impl Iterator<Item = (char, char)> {
    KANA_TABLE.iter().flat_map(|e| {
        [e.hiragana, e.katakana]
            .into_iter()
            .filter_map(|f| f.voiced.map(|v| (f.base, v)))
    })
}

/// Every (unvoiced, semi-voiced) pair of both scripts.
pub fn semivoiced_pairs() -> impl Iterator<Item = (char, char)> {
    KANA_TABLE.iter().flat_map(|e| {
        [e.hiragana, e.katakana]
            .into_iter()
            .filter_map(|f| f.semivoiced.map(|s| (f.base, s)))
    })
}
