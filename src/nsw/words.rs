//! 读法生成器
//!
//! 每个类别一个：识别器给出的片段 → 孟加拉语读法。
//! 成功返回读法，失败返回 [`ConversionError`]，由编排器决定跳过还是中止。

use lazy_static::lazy_static;
use regex::Regex;

use crate::nsw::error::ConversionError;
use crate::nsw::number::{digits_to_words, integer_to_words, parse_numeral, to_words};
use crate::nsw::rules::TABLES;
use crate::nsw::{canonical, collapse_whitespace, digit_value, splice, to_western_digits};

/// 日期式序数后缀（১লা, ২১শে, ৫ই ...）
const DATE_STYLE_SUFFIXES: [&str; 5] = ["লা", "রা", "শে", "ই", "ঠা"];

/// 其余序数后缀
const ORDINAL_SUFFIXES: [&str; 9] = ["ম", "য়", "র্থ", "ষ্ঠ", "তম", "st", "nd", "rd", "th"];

/// 上下午标记：(写法, 是否下午)，长的在前
const MERIDIEMS: [(&str, bool); 8] = [
    ("a.m.", false),
    ("p.m.", true),
    ("এ.এম.", false),
    ("পি.এম.", true),
    ("am", false),
    ("pm", true),
    ("এএম", false),
    ("পিএম", true),
];

lazy_static! {
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[-−]?\s*[০-৯0-9,]+(?:\.[০-৯0-9]+)?").expect("leading number pattern");
    static ref MEASURE_NUMBER: Regex =
        Regex::new(r"[0-9০-৯]+(?:\.[0-9০-৯]+)?").expect("measure number pattern");
}

/// 解析后的日历日期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// 日期解析
///
/// 支持：
/// - `২৫ ডিসেম্বর, ২০২৩` / `25th Dec 2023`（日 + 月份名 + 年）
/// - `25/12/2023`（日/月/年；中间一段 > 12 时按 月/日/年）
/// - `2023-12-25`（首段四位时按 年/月/日）
pub fn parse_date(text: &str) -> Result<DateParts, ConversionError> {
    let invalid = |reason: &str| ConversionError::InvalidDate {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let western = canonical(&to_western_digits(text.trim()));
    let tokens: Vec<&str> = western
        .split(|c: char| c == '/' || c == '-' || c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let [first, middle, last] = tokens.as_slice() else {
        return Err(invalid("expected day, month and year"));
    };

    let (day_token, month_token, year_token) =
        if first.len() == 4 && first.chars().all(|c| c.is_ascii_digit()) {
            (*last, *middle, *first)
        } else {
            (*first, *middle, *last)
        };

    // 日后面可能带序数后缀（২৫শে, 1st）
    let day_digits: String = day_token.chars().take_while(|c| c.is_ascii_digit()).collect();
    let mut day: u32 = day_digits.parse().map_err(|_| invalid("missing day"))?;

    let mut month = if month_token.chars().all(|c| c.is_ascii_digit()) {
        month_token.parse().map_err(|_| invalid("bad month"))?
    } else {
        TABLES
            .months
            .month_number(month_token)
            .ok_or_else(|| invalid("unknown month name"))?
    };

    if !year_token.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("bad year"));
    }
    let year: u32 = year_token.parse().map_err(|_| invalid("bad year"))?;

    if month > 12 && day <= 12 && month_token.chars().all(|c| c.is_ascii_digit()) {
        std::mem::swap(&mut day, &mut month);
    }

    if !(1..=12).contains(&month) {
        return Err(invalid("month out of range"));
    }
    if year == 0 {
        return Err(invalid("year out of range"));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(invalid("day out of range"));
    }

    Ok(DateParts { day, month, year })
}

/// 日期 → `<日读法> <月份> <年读法>`
///
/// `২৫ ডিসেম্বর, ২০২৩` → `পঁচিশে ডিসেম্বর দুই হাজার তেইশ`
pub fn date_to_word(date: &str) -> Result<String, ConversionError> {
    let parts = parse_date(date)?;
    let invalid = || ConversionError::InvalidDate {
        text: date.to_string(),
        reason: "no spoken form".to_string(),
    };

    let day = TABLES.ordinals.day_name(parts.day).ok_or_else(invalid)?;
    let month = TABLES.months.bengali_name(parts.month).ok_or_else(invalid)?;
    Ok(format!("{} {} {}", day, month, year_words(parts.year as u64)))
}

/// 年份 → 读法：前两位按「百」读（উনিশশো），整千按「千」读（দুই হাজার）
pub fn year_to_word(year: &str) -> Result<String, ConversionError> {
    let western = to_western_digits(year.trim());
    if western.is_empty() || !western.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConversionError::InvalidNumeral(year.to_string()));
    }
    let value: u64 = western
        .parse()
        .map_err(|_| ConversionError::NumeralOverflow(year.to_string()))?;
    Ok(year_words(value))
}

fn year_words(year: u64) -> String {
    let words = &TABLES.words;
    let century = (year / 100) * 100;
    let remainder = year % 100;

    if century == 0 {
        return integer_to_words(year);
    }

    let mut phrase = if century % 1000 == 0 {
        format!("{} {}", integer_to_words(century / 1000), words.thousand)
    } else {
        format!("{}{}", integer_to_words(century / 100), words.hundred_suffix)
    };
    if remainder != 0 {
        phrase.push(' ');
        phrase.push_str(&integer_to_words(remainder));
    }
    phrase
}

/// 电话号码 → 逐位读数，`+` 读作 প্লাস
pub fn phone_number_to_word(number: &str) -> Result<String, ConversionError> {
    let trimmed = number.trim();
    let (has_plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | '_') && !c.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| digit_value(c).is_some()) {
        tracing::warn!("电话号码 '{}' 清理后仍含非数字字符", number);
        return Err(ConversionError::InvalidPhoneNumber(number.to_string()));
    }

    let spoken = digits_to_words(&digits)?;
    Ok(if has_plus {
        format!("{} {}", TABLES.words.plus, spoken)
    } else {
        spoken
    })
}

/// 解析后的钟点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockTime {
    /// 24 小时制
    hour24: u32,
    /// 朗读用的小时（有 AM/PM 时为 12 小时制）
    display_hour: u32,
    minute: u32,
    second: u32,
}

fn parse_clock(time: &str) -> Result<(ClockTime, bool), ConversionError> {
    let invalid = || ConversionError::InvalidTime(time.to_string());
    let words = &TABLES.words;

    let mut cleaned = to_western_digits(time.trim());
    let minute_at = cleaned.contains(words.minute_at.as_str());
    for suffix in [&words.at_suffix, &words.minute_at] {
        cleaned = cleaned.replace(suffix.as_str(), "");
    }
    let mut cleaned = cleaned.trim().to_lowercase();

    let mut meridiem: Option<bool> = None;
    for (marker, is_pm) in MERIDIEMS {
        let marker = canonical(marker);
        if let Some(rest) = cleaned.strip_suffix(marker.as_str()) {
            meridiem = Some(is_pm);
            cleaned = rest.trim_end().to_string();
            break;
        }
    }

    let fields: Vec<&str> = cleaned.split(':').collect();
    if !(2..=3).contains(&fields.len())
        || fields
            .iter()
            .any(|f| f.is_empty() || f.len() > 2 || !f.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let hour: u32 = fields[0].parse().map_err(|_| invalid())?;
    let minute: u32 = fields[1].parse().map_err(|_| invalid())?;
    let second: u32 = match fields.get(2) {
        Some(s) => s.parse().map_err(|_| invalid())?,
        None => 0,
    };
    if minute > 59 || second > 59 {
        return Err(invalid());
    }

    let clock = match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return Err(invalid());
            }
            ClockTime {
                hour24: hour % 12 + if is_pm { 12 } else { 0 },
                display_hour: hour,
                minute,
                second,
            }
        }
        None => {
            if hour > 23 {
                return Err(invalid());
            }
            ClockTime {
                hour24: hour,
                display_hour: hour,
                minute,
                second,
            }
        }
    };

    Ok((clock, minute_at))
}

/// 时段词：ভোর 3–6，সকাল 6–12，দুপুর 12–15，বিকেল 15–18，সন্ধ্যা 18–20，其余 রাত
fn period_word(hour24: u32) -> &'static str {
    let periods = &TABLES.words.periods;
    let idx = match hour24 {
        3..=5 => 0,
        6..=11 => 1,
        12..=14 => 2,
        15..=17 => 3,
        18..=19 => 4,
        _ => 5,
    };
    periods[idx].as_str()
}

/// 时间 → 读法
///
/// `context` 是时间所在的文本；其中已有时段词时不再补时段词。
/// 无法解析时返回固定短语 `ভুল সময় বিন্যাস`。
pub fn time_to_word(time: &str, context: &str) -> String {
    let words = &TABLES.words;
    let (clock, minute_at) = match parse_clock(time) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("{}", e);
            return words.invalid_time.clone();
        }
    };

    let has_period = words.periods.iter().any(|p| context.contains(p.as_str()));

    let mut parts: Vec<String> = Vec::new();
    if !has_period {
        parts.push(period_word(clock.hour24).to_string());
    }
    parts.push(integer_to_words(clock.display_hour as u64));
    parts.push(words.hour.clone());

    if clock.minute > 0 {
        parts.push(integer_to_words(clock.minute as u64));
        let unit = if minute_at || clock.second == 0 {
            &words.minute_at
        } else {
            &words.minute
        };
        parts.push(unit.clone());
    }
    if clock.second > 0 {
        parts.push(integer_to_words(clock.second as u64));
        parts.push(words.second.clone());
    }

    parts.join(" ")
}

/// 塔卡金额 → `<数字> [লক্ষ|কোটি] টাকা|টাকার`
pub fn taka_to_word(amount: &str) -> Result<String, ConversionError> {
    let words = &TABLES.words;
    let mut rest = amount.trim();

    let mut suffix = words.taka.as_str();
    if let Some(stripped) = rest.strip_suffix(words.taka_of.as_str()) {
        suffix = words.taka_of.as_str();
        rest = stripped.trim_end();
    } else if let Some(stripped) = rest.strip_suffix(words.taka.as_str()) {
        rest = stripped.trim_end();
    }

    let mut unit = None;
    for scale in [&words.lakh, &words.crore] {
        if let Some(stripped) = rest.strip_suffix(scale.as_str()) {
            unit = Some(scale.as_str());
            rest = stripped.trim_end();
            break;
        }
    }

    let numeral: String = rest.chars().filter(|&c| c != '৳' && c != ',').collect();
    let spoken = to_words(numeral.trim())?;

    Ok(match unit {
        Some(unit) => format!("{} {} {}", spoken, unit, suffix),
        None => format!("{} {}", spoken, suffix),
    })
}

/// 百分比 → `<数字> শতাংশ`
pub fn percentage_to_word(percentage: &str) -> Result<String, ConversionError> {
    let percent = &TABLES.words.percent;
    let numeral = percentage.replace('%', "").replace(percent.as_str(), "");
    let spoken = to_words(numeral.trim())?;
    Ok(format!("{} {}", spoken, percent))
}

/// 温度 → `<数字> ডিগ্রি [সেলসিয়াস|ফারেনহাইট|কেলভিন]`
pub fn temperature_to_word(temperature: &str) -> Result<String, ConversionError> {
    let words = &TABLES.words;
    let trimmed = temperature.trim();

    let found = LEADING_NUMBER
        .find(trimmed)
        .ok_or_else(|| ConversionError::InvalidNumeral(temperature.to_string()))?;
    let numeral: String = found.as_str().chars().filter(|c| !c.is_whitespace()).collect();
    let spoken = to_words(&numeral)?;

    let compact: String = trimmed[found.end()..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let unit = if compact.contains(words.celsius.as_str())
        || compact.contains("°c")
        || compact.starts_with(&canonical("°সে"))
    {
        Some(&words.celsius)
    } else if compact.contains(words.fahrenheit.as_str()) || compact.contains("°f") {
        Some(&words.fahrenheit)
    } else if compact.contains(words.kelvin.as_str()) || compact.contains("°k") {
        Some(&words.kelvin)
    } else {
        None
    };

    Ok(match unit {
        Some(unit) => format!("{} {} {}", spoken, words.degree, unit),
        None => format!("{} {}", spoken, words.degree),
    })
}

/// 序数 → 读法
///
/// 1. 不规则序数直接查表（১ম → প্রথম，2nd → দ্বিতীয়，১লা → পহেলা）
/// 2. 日期式后缀且 1–31：用日读法（২১শে → একুশে）
/// 3. 其余：`<数字> তম`
pub fn ordinal_to_word(ordinal: &str) -> Result<String, ConversionError> {
    let ordinal = ordinal.trim();
    if let Some(word) = TABLES.ordinals.lookup(ordinal) {
        return Ok(word.to_string());
    }

    let unsupported = || ConversionError::UnsupportedOrdinal(ordinal.to_string());
    let split = ordinal
        .char_indices()
        .find(|(_, c)| digit_value(*c).is_none() && *c != ',')
        .map(|(i, _)| i)
        .ok_or_else(unsupported)?;
    let (numeral, suffix) = ordinal.split_at(split);
    if numeral.is_empty() {
        return Err(unsupported());
    }

    let suffix = canonical(&suffix.to_lowercase());
    let is_suffix = |candidates: &[&str]| candidates.iter().any(|s| canonical(s) == suffix);

    if is_suffix(&DATE_STYLE_SUFFIXES) {
        let value = parse_numeral(numeral)?.integer;
        if let Some(day) = u32::try_from(value).ok().and_then(|d| TABLES.ordinals.day_name(d)) {
            return Ok(day.to_string());
        }
    } else if !is_suffix(&ORDINAL_SUFFIXES) {
        return Err(unsupported());
    }

    Ok(format!("{} {}", to_words(numeral)?, TABLES.words.ordinal_suffix))
}

/// 距离/尺寸 → 读法
///
/// 先把单位缩写与尺寸分隔符换成孟加拉语词，再把剩下的数字换成读法
pub fn distance_to_word(distance: &str) -> Result<String, ConversionError> {
    let expanded = TABLES.units.expand(distance);

    let mut edits = Vec::new();
    for m in MEASURE_NUMBER.find_iter(&expanded) {
        edits.push((m.range(), to_words(m.as_str())?));
    }

    Ok(collapse_whitespace(&splice(&expanded, edits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> String {
        canonical(s)
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = DateParts { day: 25, month: 12, year: 2023 };
        assert_eq!(parse_date(&c("২৫ ডিসেম্বর, ২০২৩")).unwrap(), expected);
        assert_eq!(parse_date("25th Dec 2023").unwrap(), expected);
        assert_eq!(parse_date("25/12/2023").unwrap(), expected);
        assert_eq!(parse_date("12/25/2023").unwrap(), expected);
        assert_eq!(parse_date("2023-12-25").unwrap(), expected);
        assert_eq!(parse_date(&c("২৫শে ডিসেম্বর ২০২৩")).unwrap(), expected);
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        let err = parse_date("31/02/2023").unwrap_err();
        assert!(err.is_fatal());
        assert!(parse_date("29/02/2023").is_err());
        assert!(parse_date("29/02/2024").is_ok());
        assert!(parse_date("13/13/2023").is_err());
        assert!(parse_date("25 Foo 2023").is_err());
    }

    #[test]
    fn test_date_to_word() {
        assert_eq!(
            date_to_word(&c("২৫ ডিসেম্বর, ২০২৩")).unwrap(),
            c("পঁচিশে ডিসেম্বর দুই হাজার তেইশ")
        );
        assert_eq!(date_to_word("1/3/1971").unwrap(), c("পহেলা মার্চ উনিশশো একাত্তর"));
    }

    #[test]
    fn test_year_to_word() {
        assert_eq!(year_to_word("1971").unwrap(), c("উনিশশো একাত্তর"));
        assert_eq!(year_to_word("২০০০").unwrap(), c("দুই হাজার"));
        assert_eq!(year_to_word("2023").unwrap(), c("দুই হাজার তেইশ"));
        assert_eq!(year_to_word("1900").unwrap(), c("উনিশশো"));
        assert_eq!(year_to_word("0042").unwrap(), c("বিয়াল্লিশ"));
        assert!(year_to_word("19x1").is_err());
    }

    #[test]
    fn test_phone_number_to_word() {
        assert_eq!(
            phone_number_to_word("০১৭-১২").unwrap(),
            c("শূন্য এক সাত এক দুই")
        );
        assert_eq!(phone_number_to_word("+88").unwrap(), c("প্লাস আট আট"));
        assert!(phone_number_to_word("01a").is_err());
    }

    #[test]
    fn test_time_to_word_pm() {
        assert_eq!(time_to_word("০৫:৩০ PM", ""), c("বিকেল পাঁচ টা ত্রিশ মিনিটে"));
    }

    #[test]
    fn test_time_to_word_variants() {
        assert_eq!(time_to_word("10:00", ""), c("সকাল দশ টা"));
        assert_eq!(time_to_word("12:15 a.m.", ""), c("রাত বারো টা পনেরো মিনিটে"));
        assert_eq!(time_to_word("১৮:২০:০৫", ""), c("সন্ধ্যা আঠারো টা বিশ মিনিট পাঁচ সেকেন্ড"));
        assert_eq!(
            time_to_word(&c("৪:১০ মিনিটে"), ""),
            c("ভোর চার টা দশ মিনিটে")
        );
    }

    #[test]
    fn test_time_to_word_skips_period_from_context() {
        let context = c("সকাল ১০:৩০ টায় আসবে");
        assert_eq!(time_to_word(&c("১০:৩০ টায়"), &context), c("দশ টা ত্রিশ মিনিটে"));
    }

    #[test]
    fn test_time_to_word_invalid() {
        assert_eq!(time_to_word("25:00", ""), c("ভুল সময় বিন্যাস"));
        assert_eq!(time_to_word("13:00 PM", ""), c("ভুল সময় বিন্যাস"));
        assert_eq!(time_to_word("10:61", ""), c("ভুল সময় বিন্যাস"));
    }

    #[test]
    fn test_taka_to_word() {
        assert_eq!(taka_to_word(&c("৳১০ লক্ষ")).unwrap(), c("দশ লক্ষ টাকা"));
        assert_eq!(taka_to_word(&c("৳১,২০০")).unwrap(), c("এক হাজার দুইশো টাকা"));
        assert_eq!(taka_to_word(&c("৫০০ টাকার")).unwrap(), c("পাঁচশো টাকার"));
        assert_eq!(taka_to_word(&c("২ কোটি টাকা")).unwrap(), c("দুই কোটি টাকা"));
        assert!(taka_to_word("৳").is_err());
    }

    #[test]
    fn test_percentage_to_word() {
        assert_eq!(percentage_to_word("৫০%").unwrap(), c("পঞ্চাশ শতাংশ"));
        assert_eq!(percentage_to_word(&c("১৫.৫ শতাংশ")).unwrap(), c("পনেরো দশমিক পাঁচ শতাংশ"));
        assert_eq!(percentage_to_word("-3%").unwrap(), c("মাইনাস তিন শতাংশ"));
    }

    #[test]
    fn test_temperature_to_word() {
        assert_eq!(temperature_to_word("৩০°C").unwrap(), c("ত্রিশ ডিগ্রি সেলসিয়াস"));
        assert_eq!(temperature_to_word("98.6°F").unwrap(), c("আটানব্বই দশমিক ছয় ডিগ্রি ফারেনহাইট"));
        assert_eq!(
            temperature_to_word(&c("৩৫.৫ ডিগ্রি সেলসিয়াস")).unwrap(),
            c("পঁয়ত্রিশ দশমিক পাঁচ ডিগ্রি সেলসিয়াস")
        );
        assert_eq!(temperature_to_word("-5°").unwrap(), c("মাইনাস পাঁচ ডিগ্রি"));
        assert_eq!(temperature_to_word(&c("৩০° সে.")).unwrap(), c("ত্রিশ ডিগ্রি সেলসিয়াস"));
        assert!(temperature_to_word("°C").is_err());
    }

    #[test]
    fn test_ordinal_to_word() {
        assert_eq!(ordinal_to_word("১ম").unwrap(), c("প্রথম"));
        assert_eq!(ordinal_to_word("2nd").unwrap(), c("দ্বিতীয়"));
        assert_eq!(ordinal_to_word("১লা").unwrap(), c("পহেলা"));
        assert_eq!(ordinal_to_word("২১শে").unwrap(), c("একুশে"));
        assert_eq!(ordinal_to_word("৫ই").unwrap(), c("পাঁচই"));
        assert_eq!(ordinal_to_word("১১তম").unwrap(), c("এগারো তম"));
        assert_eq!(ordinal_to_word("21st").unwrap(), c("একুশ তম"));
        assert_eq!(ordinal_to_word("১০,০০০তম").unwrap(), c("দশ হাজার তম"));
        assert_eq!(ordinal_to_word("৪০শে").unwrap(), c("চল্লিশ তম"));
    }

    #[test]
    fn test_ordinal_to_word_unsupported() {
        assert!(matches!(ordinal_to_word("১২"), Err(ConversionError::UnsupportedOrdinal(_))));
        assert!(matches!(ordinal_to_word("১২কক"), Err(ConversionError::UnsupportedOrdinal(_))));
        assert!(matches!(ordinal_to_word("তম"), Err(ConversionError::UnsupportedOrdinal(_))));
    }

    #[test]
    fn test_distance_to_word() {
        assert_eq!(
            distance_to_word("১২ft x ১০ft").unwrap(),
            c("বারো ফুট বাই দশ ফুট")
        );
        assert_eq!(distance_to_word("2.5km").unwrap(), c("দুই দশমিক পাঁচ কিলোমিটার"));
        assert_eq!(distance_to_word("5mm").unwrap(), c("পাঁচ মিলিমিটার"));
        assert_eq!(distance_to_word("১২' × ১০\"").unwrap(), c("বারো ফুট বাই দশ ইঞ্চি"));
    }
}
