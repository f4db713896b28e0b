//! 孟加拉文 → IPA 转写
//!
//! 去标点、折叠空白后做最长匹配替换：合体字表优先于单字表，表外字符原样保留。
//! 不推断固有元音。

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;

use crate::nsw::{canonical, collapse_whitespace};

/// 孟加拉语标点（ASCII 标点另行处理）
const BENGALI_PUNCTUATION: [char; 5] = ['।', '‘', '’', '“', '”'];

/// 合体字
const CONJUNCTS: [(&str, &str); 36] = [
    ("ক্ষ", "kʰ"),
    ("জ্ঞ", "ɡɡ"),
    ("ঙ্ক", "ŋk"),
    ("ঙ্গ", "ŋɡ"),
    ("ঞ্চ", "ntʃ"),
    ("ঞ্ছ", "ntʃʰ"),
    ("ঞ্জ", "ndʒ"),
    ("ন্ত", "nt̪"),
    ("ন্দ", "nd̪"),
    ("ন্ধ", "nd̪ʱ"),
    ("ন্ন", "nn"),
    ("ন্ম", "nm"),
    ("ম্ব", "mb"),
    ("ম্প", "mp"),
    ("ম্ভ", "mbʱ"),
    ("স্ত", "st̪"),
    ("স্থ", "st̪ʰ"),
    ("স্ক", "sk"),
    ("স্প", "sp"),
    ("ষ্ট", "ʃʈ"),
    ("ষ্ঠ", "ʃʈʰ"),
    ("ষ্ণ", "ʃn"),
    ("ত্ত", "t̪t̪"),
    ("ক্ত", "kt̪"),
    ("প্ত", "pt̪"),
    ("দ্ধ", "dd̪ʱ"),
    ("দ্দ", "d̪d̪"),
    ("ল্প", "lp"),
    ("ল্ল", "ll"),
    ("গ্ন", "ɡn"),
    ("হ্ম", "mʱ"),
    ("ট্ট", "ʈʈ"),
    ("চ্চ", "tʃtʃ"),
    ("জ্জ", "dʒdʒ"),
    ("্র", "r"),
    ("্য", ""),
];

/// 单个字符（元音、元音符号、辅音、附加符号）
const GRAPHEMES: [(&str, &str); 66] = [
    ("অ", "ɔ"),
    ("আ", "a"),
    ("ই", "i"),
    ("ঈ", "i"),
    ("উ", "u"),
    ("ঊ", "u"),
    ("ঋ", "ri"),
    ("এ", "e"),
    ("ঐ", "oi"),
    ("ও", "o"),
    ("ঔ", "ou"),
    ("া", "a"),
    ("ি", "i"),
    ("ী", "i"),
    ("ু", "u"),
    ("ূ", "u"),
    ("ৃ", "ri"),
    ("ে", "e"),
    ("ৈ", "oi"),
    ("ো", "o"),
    ("ৌ", "ou"),
    ("ক", "k"),
    ("খ", "kʰ"),
    ("গ", "ɡ"),
    ("ঘ", "ɡʱ"),
    ("ঙ", "ŋ"),
    ("চ", "tʃ"),
    ("ছ", "tʃʰ"),
    ("জ", "dʒ"),
    ("ঝ", "dʒʱ"),
    ("ঞ", "n"),
    ("ট", "ʈ"),
    ("ঠ", "ʈʰ"),
    ("ড", "ɖ"),
    ("ঢ", "ɖʱ"),
    ("ণ", "n"),
    ("ত", "t̪"),
    ("থ", "t̪ʰ"),
    ("দ", "d̪"),
    ("ধ", "d̪ʱ"),
    ("ন", "n"),
    ("প", "p"),
    ("ফ", "pʰ"),
    ("ব", "b"),
    ("ভ", "bʱ"),
    ("ম", "m"),
    ("য", "dʒ"),
    ("র", "r"),
    ("ল", "l"),
    ("শ", "ʃ"),
    ("ষ", "ʃ"),
    ("স", "s"),
    ("হ", "h"),
    ("ড়", "ɽ"),
    ("ঢ়", "ɽʱ"),
    ("য়", "j"),
    ("ৎ", "t̪"),
    ("ং", "ŋ"),
    ("ঃ", "h"),
    ("ঁ", "\u{303}"),
    ("্", ""),
    ("়", ""),
    ("ৗ", "ou"),
    ("ৠ", "ri"),
    ("ঌ", "li"),
    ("ৡ", "li"),
];

/// 转写表
struct IpaTable {
    matcher: AhoCorasick,
    replacements: Vec<String>,
}

impl IpaTable {
    fn new() -> Self {
        // 合体字后插入，同键时覆盖单字
        let mut map: HashMap<String, &str> = HashMap::new();
        for (bangla, ipa) in GRAPHEMES.iter().chain(CONJUNCTS.iter()) {
            map.insert(canonical(bangla), *ipa);
        }

        let (patterns, replacements): (Vec<String>, Vec<String>) = map
            .into_iter()
            .map(|(bangla, ipa)| (bangla, ipa.to_string()))
            .unzip();

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .expect("ipa patterns are valid literals");

        Self {
            matcher,
            replacements,
        }
    }
}

lazy_static! {
    static ref IPA_TABLE: IpaTable = IpaTable::new();
}

/// 去掉 ASCII 标点与孟加拉语标点，折叠空白
pub fn remove_punctuation(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !BENGALI_PUNCTUATION.contains(c))
        .collect();
    collapse_whitespace(&stripped)
}

/// 孟加拉文 → IPA
pub fn to_ipa(text: &str) -> String {
    let cleaned = remove_punctuation(&canonical(text));
    IPA_TABLE.matcher.replace_all(&cleaned, &IPA_TABLE.replacements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("“আমি”, তুমি - সে।"), "আমি তুমি সে");
        assert_eq!(remove_punctuation("a.b!c?"), "abc");
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(to_ipa("আমি"), "ami");
        assert_eq!(to_ipa("মা"), "ma");
    }

    #[test]
    fn test_conjunct_wins_over_graphemes() {
        assert_eq!(to_ipa("ক্ষমা"), "kʰma");
        assert_eq!(to_ipa("প্রাণ"), "pran");
    }

    #[test]
    fn test_nukta_letters() {
        // NFC 下 ড় 为 ড + ়，仍按整体转写
        assert_eq!(to_ipa("বাড়ি"), "baɽi");
        assert_eq!(to_ipa("নয়"), "nj");
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        assert_eq!(to_ipa("abc ১২"), "abc ১২");
    }

    #[test]
    fn test_punctuation_removed_before_transliteration() {
        assert_eq!(to_ipa("আমি, মা।"), "ami ma");
    }
}
