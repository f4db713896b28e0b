//! NSW 规则定义
//!
//! 数字读法、月份、日期读法、长度单位、不规则序数、英文音译词表。
//! 全部在首次使用时构建一次，之后只读。

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::nsw::canonical;

/// 0–99 的孟加拉语读法（下标即数值）
const NUMBER_WORDS: [&str; 100] = [
    "শূন্য", "এক", "দুই", "তিন", "চার", "পাঁচ", "ছয়", "সাত", "আট", "নয়",
    "দশ", "এগারো", "বারো", "তেরো", "চৌদ্দ", "পনেরো", "ষোলো", "সতেরো", "আঠারো", "উনিশ",
    "বিশ", "একুশ", "বাইশ", "তেইশ", "চব্বিশ", "পঁচিশ", "ছাব্বিশ", "সাতাশ", "আটাশ", "ঊনত্রিশ",
    "ত্রিশ", "একত্রিশ", "বত্রিশ", "তেত্রিশ", "চৌত্রিশ", "পঁয়ত্রিশ", "ছত্রিশ", "সাঁইত্রিশ", "আটত্রিশ", "ঊনচল্লিশ",
    "চল্লিশ", "একচল্লিশ", "বিয়াল্লিশ", "তেতাল্লিশ", "চুয়াল্লিশ", "পঁয়তাল্লিশ", "ছেচল্লিশ", "সাতচল্লিশ", "আটচল্লিশ", "ঊনপঞ্চাশ",
    "পঞ্চাশ", "একান্ন", "বাহান্ন", "তিপ্পান্ন", "চুয়ান্ন", "পঞ্চান্ন", "ছাপ্পান্ন", "সাতান্ন", "আটান্ন", "ঊনষাট",
    "ষাট", "একষট্টি", "বাষট্টি", "তেষট্টি", "চৌষট্টি", "পঁয়ষট্টি", "ছেষট্টি", "সাতষট্টি", "আটষট্টি", "ঊনসত্তর",
    "সত্তর", "একাত্তর", "বাহাত্তর", "তিয়াত্তর", "চুয়াত্তর", "পঁচাত্তর", "ছিয়াত্তর", "সাতাত্তর", "আটাত্তর", "ঊনআশি",
    "আশি", "একাশি", "বিরাশি", "তিরাশি", "চুরাশি", "পঁচাশি", "ছিয়াশি", "সাতাশি", "অষ্টাশি", "ঊননব্বই",
    "নব্বই", "একানব্বই", "বিরানব্বই", "তিরানব্বই", "চুরানব্বই", "পঁচানব্বই", "ছিয়ানব্বই", "সাতানব্বই", "আটানব্বই", "নিরানব্বই",
];

/// 日期中的日读法 1–31（পহেলা, দোসরা ...）
const DAY_NAMES: [&str; 31] = [
    "পহেলা", "দোসরা", "তেসরা", "চৌঠা", "পাঁচই", "ছয়ই", "সাতই", "আটই", "নয়ই", "দশই",
    "এগারোই", "বারোই", "তেরোই", "চৌদ্দই", "পনেরোই", "ষোলোই", "সতেরোই", "আঠারোই", "উনিশে", "বিশে",
    "একুশে", "বাইশে", "তেইশে", "চব্বিশে", "পঁচিশে", "ছাব্বিশে", "সাতাশে", "আটাশে", "ঊনত্রিশে", "ত্রিশে",
    "একত্রিশে",
];

pub const BENGALI_MONTHS: [&str; 12] = [
    "জানুয়ারি", "ফেব্রুয়ারি", "মার্চ", "এপ্রিল", "মে", "জুন",
    "জুলাই", "আগস্ট", "সেপ্টেম্বর", "অক্টোবর", "নভেম্বর", "ডিসেম্বর",
];

pub const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const ENGLISH_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 长度单位缩写 → 孟加拉语单位词
///
/// 识别器的单位候选也取自这里，顺序即正则分支顺序（长的在前）
pub const UNITS: [(&str, &str); 20] = [
    ("km", "কিলোমিটার"),
    ("hm", "হেক্টোমিটার"),
    ("dam", "ডেকামিটার"),
    ("cm", "সেন্টিমিটার"),
    ("mm", "মিলিমিটার"),
    ("µm", "মাইক্রোমিটার"),
    ("μm", "মাইক্রোমিটার"),
    ("um", "মাইক্রোমিটার"),
    ("nm", "ন্যানোমিটার"),
    ("pm", "পিকোমিটার"),
    ("dm", "ডেসিমিটার"),
    ("mi", "মাইল"),
    ("fur", "ফার্লং"),
    ("ch", "চেইন"),
    ("yd", "গজ"),
    ("ft", "ফুট"),
    ("in", "ইঞ্চি"),
    ("m", "মিটার"),
    ("\"", "ইঞ্চি"),
    ("'", "ফুট"),
];

/// 尺寸分隔符
pub const DIMENSION_SEPARATORS: [&str; 3] = ["x", "X", "×"];

/// 不规则序数：(数值, 孟加拉后缀, 英文后缀, 读法)
const IRREGULAR_ORDINALS: [(u32, &str, &str, &str); 10] = [
    (1, "ম", "st", "প্রথম"),
    (2, "য়", "nd", "দ্বিতীয়"),
    (3, "য়", "rd", "তৃতীয়"),
    (4, "র্থ", "th", "চতুর্থ"),
    (5, "ম", "th", "পঞ্চম"),
    (6, "ষ্ঠ", "th", "ষষ্ঠ"),
    (7, "ম", "th", "সপ্তম"),
    (8, "ম", "th", "অষ্টম"),
    (9, "ম", "th", "নবম"),
    (10, "ম", "th", "দশম"),
];

/// 日期式序数（১লা, ২রা ...）
const DATE_STYLE_ORDINALS: [(u32, &str); 4] = [(1, "লা"), (2, "রা"), (3, "রা"), (4, "ঠা")];

/// 常见英文词 → 孟加拉语音译
const ENGLISH_PHONETIC: [(&str, &str); 48] = [
    ("ok", "ওকে"),
    ("okay", "ওকে"),
    ("hello", "হ্যালো"),
    ("hi", "হাই"),
    ("bye", "বাই"),
    ("thanks", "থ্যাংকস"),
    ("thank", "থ্যাংক"),
    ("you", "ইউ"),
    ("please", "প্লিজ"),
    ("sorry", "সরি"),
    ("yes", "ইয়েস"),
    ("no", "নো"),
    ("computer", "কম্পিউটার"),
    ("laptop", "ল্যাপটপ"),
    ("mobile", "মোবাইল"),
    ("phone", "ফোন"),
    ("internet", "ইন্টারনেট"),
    ("email", "ইমেইল"),
    ("online", "অনলাইন"),
    ("offline", "অফলাইন"),
    ("software", "সফটওয়্যার"),
    ("app", "অ্যাপ"),
    ("website", "ওয়েবসাইট"),
    ("password", "পাসওয়ার্ড"),
    ("facebook", "ফেসবুক"),
    ("google", "গুগল"),
    ("youtube", "ইউটিউব"),
    ("video", "ভিডিও"),
    ("tv", "টিভি"),
    ("radio", "রেডিও"),
    ("news", "নিউজ"),
    ("bank", "ব্যাংক"),
    ("bus", "বাস"),
    ("train", "ট্রেন"),
    ("office", "অফিস"),
    ("school", "স্কুল"),
    ("college", "কলেজ"),
    ("university", "ইউনিভার্সিটি"),
    ("doctor", "ডাক্তার"),
    ("hospital", "হাসপাতাল"),
    ("police", "পুলিশ"),
    ("cricket", "ক্রিকেট"),
    ("football", "ফুটবল"),
    ("match", "ম্যাচ"),
    ("team", "টিম"),
    ("covid", "কোভিড"),
    ("gps", "জিপিএস"),
    ("sms", "এসএমএস"),
];

/// 固定词汇
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub zero: String,
    pub hundred_suffix: String,
    pub thousand: String,
    pub lakh: String,
    pub crore: String,
    pub minus: String,
    pub plus: String,
    pub point: String,
    pub percent: String,
    pub taka: String,
    pub taka_of: String,
    pub degree: String,
    pub celsius: String,
    pub fahrenheit: String,
    pub kelvin: String,
    pub hour: String,
    pub minute: String,
    pub minute_at: String,
    pub second: String,
    pub at_suffix: String,
    pub ordinal_suffix: String,
    pub dimension_by: String,
    pub ratio_to: String,
    pub invalid_time: String,
    /// 时段词：ভোর, সকাল, দুপুর, বিকেল, সন্ধ্যা, রাত
    pub periods: [String; 6],
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            zero: canonical("শূন্য"),
            hundred_suffix: canonical("শো"),
            thousand: canonical("হাজার"),
            lakh: canonical("লক্ষ"),
            crore: canonical("কোটি"),
            minus: canonical("মাইনাস"),
            plus: canonical("প্লাস"),
            point: canonical("দশমিক"),
            percent: canonical("শতাংশ"),
            taka: canonical("টাকা"),
            taka_of: canonical("টাকার"),
            degree: canonical("ডিগ্রি"),
            celsius: canonical("সেলসিয়াস"),
            fahrenheit: canonical("ফারেনহাইট"),
            kelvin: canonical("কেলভিন"),
            hour: canonical("টা"),
            minute: canonical("মিনিট"),
            minute_at: canonical("মিনিটে"),
            second: canonical("সেকেন্ড"),
            at_suffix: canonical("টায়"),
            ordinal_suffix: canonical("তম"),
            dimension_by: canonical("বাই"),
            ratio_to: canonical("এ"),
            invalid_time: canonical("ভুল সময় বিন্যাস"),
            periods: [
                canonical("ভোর"),
                canonical("সকাল"),
                canonical("দুপুর"),
                canonical("বিকেল"),
                canonical("সন্ধ্যা"),
                canonical("রাত"),
            ],
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// 数字读法表
pub struct NumeralTable {
    words: Vec<String>,
}

impl NumeralTable {
    pub fn new() -> Self {
        Self {
            words: NUMBER_WORDS.iter().map(|w| canonical(w)).collect(),
        }
    }

    /// 0–99 的读法
    pub fn word(&self, n: u64) -> Option<&str> {
        self.words.get(n as usize).map(String::as_str)
    }

    /// 单个数字 0–9 的读法
    pub fn digit(&self, d: u8) -> &str {
        &self.words[(d % 10) as usize]
    }
}

impl Default for NumeralTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 月份表（孟加拉语 ↔ 英语）
pub struct MonthTable {
    bengali: Vec<String>,
}

impl MonthTable {
    pub fn new() -> Self {
        Self {
            bengali: BENGALI_MONTHS.iter().map(|m| canonical(m)).collect(),
        }
    }

    /// 孟加拉语月份名（1–12）
    pub fn bengali_name(&self, month: u32) -> Option<&str> {
        let idx = month.checked_sub(1)? as usize;
        self.bengali.get(idx).map(String::as_str)
    }

    /// 月份名 → 月份序号（1–12）
    ///
    /// 接受孟加拉语全称、英语全称与缩写（大小写不敏感）
    pub fn month_number(&self, name: &str) -> Option<u32> {
        if let Some(pos) = self.bengali.iter().position(|m| m == name) {
            return Some(pos as u32 + 1);
        }
        ENGLISH_MONTHS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .or_else(|| {
                ENGLISH_MONTHS_SHORT
                    .iter()
                    .position(|m| m.eq_ignore_ascii_case(name))
            })
            .map(|pos| pos as u32 + 1)
    }

    /// 正则用的孟加拉语月份分支
    pub fn bengali_alternation(&self) -> String {
        self.bengali.join("|")
    }

    /// 正则用的英语月份分支（全称在前，缩写在后）
    pub fn english_alternation() -> String {
        format!("{}|{}", ENGLISH_MONTHS.join("|"), ENGLISH_MONTHS_SHORT.join("|"))
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 长度单位表
///
/// 最长匹配替换：`mm` 不会被 `m` 截断
pub struct UnitTable {
    matcher: AhoCorasick,
    replacements: Vec<String>,
}

impl UnitTable {
    pub fn new() -> Self {
        let mut patterns: Vec<String> = Vec::new();
        let mut replacements: Vec<String> = Vec::new();

        for (abbr, word) in UNITS {
            patterns.push(abbr.to_string());
            replacements.push(format!(" {} ", canonical(word)));
        }
        for sep in DIMENSION_SEPARATORS {
            patterns.push(sep.to_string());
            replacements.push(format!(" {} ", canonical("বাই")));
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .expect("unit patterns are valid literals");

        Self {
            matcher,
            replacements,
        }
    }

    /// 把所有单位缩写与尺寸分隔符替换为孟加拉语词
    pub fn expand(&self, text: &str) -> String {
        self.matcher.replace_all(text, &self.replacements)
    }

    /// 正则用的单位分支（保持 [`UNITS`] 的顺序）
    pub fn alternation() -> String {
        UNITS
            .iter()
            .map(|(abbr, _)| fancy_regex::escape(abbr).into_owned())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 序数表
pub struct OrdinalTable {
    irregular: HashMap<String, String>,
    day_names: Vec<String>,
}

impl OrdinalTable {
    pub fn new() -> Self {
        let mut irregular = HashMap::new();

        for (n, bn_suffix, en_suffix, word) in IRREGULAR_ORDINALS {
            let word = canonical(word);
            let western = n.to_string();
            let bengali = to_bengali_number(n);
            irregular.insert(canonical(&format!("{}{}", bengali, bn_suffix)), word.clone());
            irregular.insert(canonical(&format!("{}{}", western, bn_suffix)), word.clone());
            irregular.insert(format!("{}{}", western, en_suffix), word);
        }

        let day_names: Vec<String> = DAY_NAMES.iter().map(|d| canonical(d)).collect();
        for (n, suffix) in DATE_STYLE_ORDINALS {
            let word = day_names[(n - 1) as usize].clone();
            irregular.insert(canonical(&format!("{}{}", to_bengali_number(n), suffix)), word.clone());
            irregular.insert(canonical(&format!("{}{}", n, suffix)), word);
        }

        Self {
            irregular,
            day_names,
        }
    }

    /// 直接查表（英文后缀大小写不敏感）
    pub fn lookup(&self, ordinal: &str) -> Option<&str> {
        self.irregular
            .get(ordinal)
            .or_else(|| self.irregular.get(&ordinal.to_lowercase()))
            .map(String::as_str)
    }

    /// 日期中的日读法（1–31）
    pub fn day_name(&self, day: u32) -> Option<&str> {
        let idx = day.checked_sub(1)? as usize;
        self.day_names.get(idx).map(String::as_str)
    }
}

impl Default for OrdinalTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 英文词音译表（整词匹配，大小写不敏感）
#[derive(Debug, Clone)]
pub struct PhoneticTable {
    map: HashMap<String, String>,
}

impl PhoneticTable {
    pub fn new() -> Self {
        let map = ENGLISH_PHONETIC
            .iter()
            .map(|(en, bn)| (en.to_string(), canonical(bn)))
            .collect();
        Self { map }
    }

    /// 追加或覆盖词条
    pub fn with_overrides<'a>(mut self, entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (en, bn) in entries {
            let key = en.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            self.map.insert(key, canonical(bn.trim()));
        }
        self
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.map.get(&word.to_lowercase()).map(String::as_str)
    }

    /// 按空白切词，逐词替换后以单个空格拼接
    pub fn translate(&self, sentence: &str) -> String {
        sentence
            .split_whitespace()
            .map(|word| self.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for PhoneticTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 全部转换表
pub struct ConversionTables {
    pub words: Lexicon,
    pub numerals: NumeralTable,
    pub months: MonthTable,
    pub units: UnitTable,
    pub ordinals: OrdinalTable,
}

impl ConversionTables {
    pub fn new() -> Self {
        Self {
            words: Lexicon::new(),
            numerals: NumeralTable::new(),
            months: MonthTable::new(),
            units: UnitTable::new(),
            ordinals: OrdinalTable::new(),
        }
    }
}

impl Default for ConversionTables {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// 进程级只读转换表
    pub static ref TABLES: ConversionTables = ConversionTables::new();
}

fn to_bengali_number(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) => crate::nsw::BENGALI_DIGITS[d as usize],
            None => ch,
        })
        .collect()
}
