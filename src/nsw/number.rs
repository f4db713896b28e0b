//! 数字转换
//!
//! 孟加拉/西式数字串 → 数值 → 孟加拉语读法（百 / 千 / 拉克 / 克若尔 进位）

use crate::nsw::digit_value;
use crate::nsw::error::ConversionError;
use crate::nsw::rules::TABLES;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;
const HUNDRED: u64 = 100;

/// 解析后的数字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumeral {
    pub negative: bool,
    pub integer: u64,
    /// 小数部分（西式数字，保留前导零）
    pub fraction: Option<String>,
}

/// 数字串规范化
///
/// 去掉千分位逗号，统一负号（`-` 与 `−`），孟加拉数字映射为西式数字。
/// 残留其他字符时返回错误。
pub fn script_normalize(numeral: &str) -> Result<String, ConversionError> {
    let trimmed = numeral.trim();
    let mut canonical = String::with_capacity(trimmed.len());

    for ch in trimmed.chars() {
        match ch {
            ',' => {}
            '-' | '−' => canonical.push('-'),
            '.' => canonical.push('.'),
            _ => match digit_value(ch) {
                Some(d) => canonical.push(char::from(b'0' + d)),
                None => {
                    tracing::warn!("无法解析数字 '{}'：包含非数字字符 {:?}", numeral, ch);
                    return Err(ConversionError::InvalidNumeral(numeral.to_string()));
                }
            },
        }
    }

    if !canonical.chars().any(|c| c.is_ascii_digit()) {
        tracing::warn!("无法解析数字 '{}'：没有数字", numeral);
        return Err(ConversionError::InvalidNumeral(numeral.to_string()));
    }

    Ok(canonical)
}

/// 解析数字串：可选负号 + 整数部分 + 可选小数部分
pub fn parse_numeral(numeral: &str) -> Result<ParsedNumeral, ConversionError> {
    let canonical = script_normalize(numeral)?;
    let invalid = || ConversionError::InvalidNumeral(numeral.to_string());

    let (negative, body) = match canonical.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, canonical.as_str()),
    };
    if body.contains('-') {
        return Err(invalid());
    }

    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, frac)) => {
            if frac.is_empty() || frac.contains('.') {
                return Err(invalid());
            }
            (int_part, Some(frac.to_string()))
        }
        None => (body, None),
    };
    if int_part.is_empty() {
        return Err(invalid());
    }

    let integer = int_part
        .parse::<u64>()
        .map_err(|_| ConversionError::NumeralOverflow(numeral.to_string()))?;

    Ok(ParsedNumeral {
        negative,
        integer,
        fraction,
    })
}

/// 整数 → 孟加拉语读法
///
/// 从最高进位开始：克若尔 (10^7)、拉克 (10^5)、千、百，对商递归，余数 < 100 直接查表
pub fn integer_to_words(n: u64) -> String {
    let words = &TABLES.words;
    if n == 0 {
        return words.zero.clone();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;

    if rest >= CRORE {
        parts.push(integer_to_words(rest / CRORE));
        parts.push(words.crore.clone());
        rest %= CRORE;
    }
    if rest >= LAKH {
        parts.push(integer_to_words(rest / LAKH));
        parts.push(words.lakh.clone());
        rest %= LAKH;
    }
    if rest >= THOUSAND {
        parts.push(integer_to_words(rest / THOUSAND));
        parts.push(words.thousand.clone());
        rest %= THOUSAND;
    }
    if rest >= HUNDRED {
        parts.push(format!("{}{}", small_number(rest / HUNDRED), words.hundred_suffix));
        rest %= HUNDRED;
    }
    if rest > 0 {
        parts.push(small_number(rest).to_string());
    }

    parts.join(" ")
}

/// 逐位读数（电话号码、小数部分）
pub fn digits_to_words(digits: &str) -> Result<String, ConversionError> {
    let mut words = Vec::with_capacity(digits.len());
    for ch in digits.chars() {
        let d = digit_value(ch).ok_or_else(|| ConversionError::InvalidNumeral(digits.to_string()))?;
        words.push(TABLES.numerals.digit(d));
    }
    if words.is_empty() {
        return Err(ConversionError::InvalidNumeral(digits.to_string()));
    }
    Ok(words.join(" "))
}

/// 数字串 → 孟加拉语读法
///
/// `"-12.05"` → `মাইনাস বারো দশমিক শূন্য পাঁচ`
pub fn to_words(numeral: &str) -> Result<String, ConversionError> {
    let parsed = parse_numeral(numeral)?;
    let words = &TABLES.words;

    let mut phrase = integer_to_words(parsed.integer);
    if let Some(fraction) = &parsed.fraction {
        phrase = format!("{} {} {}", phrase, words.point, digits_to_words(fraction)?);
    }
    if parsed.negative {
        phrase = format!("{} {}", words.minus, phrase);
    }

    Ok(phrase)
}

/// 0–99 查表
pub(crate) fn small_number(n: u64) -> &'static str {
    TABLES.numerals.word(n).unwrap_or_default()
}
