//! NSW (Non-Standard Word) 规范化层
//!
//! 把孟加拉语文本中的数字、日期、时间、电话、货币等非标准词展开为完整的孟加拉语读法，
//! 供 TTS 前端或后续语言处理使用。
//!
//! ## 处理流程
//! 1. 长文本按句切块（`।` `?` `!`），每块独立处理、独立失败，失败块保留原文
//! 2. Unicode 归一化 (NFC)
//! 3. 按固定优先级依次执行各类别识别器 + 读法生成器（见 [`engine::STAGE_ORDER`]）
//! 4. 英文词音译
//! 5. 空白折叠

mod engine;
mod error;
mod extract;
mod number;
mod rules;
mod sentence;
mod types;
mod words;

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;

pub use engine::{Normalizer, Stage, STAGE_ORDER};
pub use error::{ConversionError, NormalizeError, NormalizeResult};
pub use extract::{
    extract_bengali_dates, extract_distances, extract_mobile_numbers, extract_numbers,
    extract_ordinals, extract_percentages, extract_ratios, extract_taka_amounts,
    extract_temperatures, extract_time, extract_years_with_context, find_matches,
};
pub use number::{digits_to_words, integer_to_words, parse_numeral, script_normalize, to_words, ParsedNumeral};
pub use rules::{ConversionTables, PhoneticTable, TABLES};
pub use sentence::split_sentences;
pub use types::{Category, CategoryMatch, NormalizationResult, Replacement};
pub use words::{
    date_to_word, distance_to_word, ordinal_to_word, parse_date, percentage_to_word,
    phone_number_to_word, taka_to_word, temperature_to_word, time_to_word, year_to_word,
    DateParts,
};

/// 孟加拉数字 `০`..`৯`
const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

/// Unicode 规范形式 (NFC)
///
/// 输入、词表、正则模式统一经过这里，保证 `য়` `ড়` `ঢ়` 等字符的编码一致
pub fn canonical(text: &str) -> String {
    text.nfc().collect()
}

/// 孟加拉数字 → 数值
pub(crate) fn bengali_digit_value(ch: char) -> Option<u8> {
    BENGALI_DIGITS.iter().position(|&d| d == ch).map(|i| i as u8)
}

/// 任意脚本的十进制数字 → 数值（仅西式与孟加拉数字）
pub(crate) fn digit_value(ch: char) -> Option<u8> {
    if ch.is_ascii_digit() {
        Some(ch as u8 - b'0')
    } else {
        bengali_digit_value(ch)
    }
}

/// 孟加拉数字替换为西式数字，其他字符保持不变
pub(crate) fn to_western_digits(text: &str) -> String {
    text.chars()
        .map(|ch| match bengali_digit_value(ch) {
            Some(d) => char::from(b'0' + d),
            None => ch,
        })
        .collect()
}

/// 空白折叠：连续空白 → 单个空格，去掉首尾空白
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 按长度降序挑选互不重叠的区间（长匹配优先），结果按起始位置升序
pub(crate) fn select_non_overlapping(
    mut edits: Vec<(Range<usize>, String)>,
) -> Vec<(Range<usize>, String)> {
    edits.sort_by(|a, b| {
        let (la, lb) = (a.0.len(), b.0.len());
        lb.cmp(&la).then(a.0.start.cmp(&b.0.start))
    });

    let mut accepted: Vec<(Range<usize>, String)> = Vec::with_capacity(edits.len());
    for (span, word) in edits {
        let overlaps = accepted
            .iter()
            .any(|(taken, _)| span.start < taken.end && taken.start < span.end);
        if !overlaps {
            accepted.push((span, word));
        }
    }

    accepted.sort_by_key(|(span, _)| span.start);
    accepted
}

/// 按字节范围替换文本
///
/// 从右往左替换，避免偏移量失效
pub(crate) fn splice(text: &str, edits: Vec<(Range<usize>, String)>) -> String {
    let mut result = text.to_string();
    for (span, word) in select_non_overlapping(edits).into_iter().rev() {
        result.replace_range(span, &word);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_western_digits() {
        assert_eq!(to_western_digits("১২৩abc৪"), "123abc4");
        assert_eq!(to_western_digits("2024"), "2024");
    }

    #[test]
    fn test_digit_value() {
        assert_eq!(digit_value('৭'), Some(7));
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('a'), None);
    }

    #[test]
    fn test_splice_prefers_longest_and_keeps_offsets() {
        let text = "ab 12345 cd 45";
        let edits = vec![
            (3..8, "LONG".to_string()),
            (6..8, "SHORT".to_string()),
            (12..14, "X".to_string()),
        ];
        assert_eq!(splice(text, edits), "ab LONG cd X");
    }

    #[test]
    fn test_select_non_overlapping_orders_by_start() {
        let edits = vec![
            (10..12, "b".to_string()),
            (0..4, "a".to_string()),
            (2..6, "x".to_string()),
        ];
        let spans: Vec<_> = select_non_overlapping(edits).into_iter().map(|(s, _)| s).collect();
        assert_eq!(spans, vec![0..4, 10..12]);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  এক   দুই\tতিন \n"), "এক দুই তিন");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_canonical_is_stable() {
        let once = canonical("নয় ড়");
        assert_eq!(canonical(&once), once);
    }
}
