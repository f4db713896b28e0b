//! 类别识别器
//!
//! 每个类别一条（或几条）预编译模式，只负责在工作文本中定位候选片段，
//! 不做转换。边界断言保证不会从更长的数字中间切出一段。

use fancy_regex::Regex;
use lazy_static::lazy_static;

use crate::nsw::canonical;
use crate::nsw::error::NormalizeResult;
use crate::nsw::rules::{MonthTable, UnitTable, TABLES};
use crate::nsw::types::{Category, CategoryMatch};

/// 带千分位与小数的金额/数值（整体原子匹配，避免回溯截短）
const AMOUNT: &str = r"(?>[০-৯0-9]+(?:,[০-৯0-9]+)*(?:\.[০-৯0-9]+)?)";

/// 距离中的数值
const MEASURE: &str = r"[0-9০-৯]+(?:\.[0-9০-৯]+)?";

fn compile(pattern: &str) -> Regex {
    Regex::new(&canonical(pattern)).expect("built-in pattern must compile")
}

fn mobile_pattern() -> String {
    r"(?<![0-9০-৯.])((?:\+?[৮8][৮8])?[0০][1১][3-9৩-৯](?:[0-9০-৯]{2}-?[0-9০-৯]{6}|[0-9০-৯]{7,8})-?)(?![0-9০-৯_])"
        .to_string()
}

fn date_pattern() -> String {
    let bn_months = format!("(?:{})", TABLES.months.bengali_alternation());
    let en_months = format!("(?:{})", MonthTable::english_alternation());
    let bn = "[০-৯]";
    let en = "[0-9]";

    let alternatives = [
        format!(r"{bn}{{1,2}}(?:লা|ই|শে|ঠা|এ|রা)?\s+{bn_months}(?:\s*,)?\s*{bn}{{4}}"),
        format!(r"{bn}{{1,2}}([/-]){bn_months}\2{bn}{{4}}"),
        format!(r"{bn}{{1,2}}([/-]){bn}{{1,2}}\3{bn}{{4}}"),
        format!(r"{bn}{{4}}([/-]){bn}{{1,2}}\4{bn}{{1,2}}"),
        format!(r"{en}{{1,2}}(?:st|nd|rd|th)?\s+{en_months}(?:\s*,)?\s*{en}{{4}}"),
        format!(r"{en}{{1,2}}([/-]){en_months}\5{en}{{4}}"),
        format!(r"{en}{{1,2}}([/-]){en}{{1,2}}\6{en}{{4}}"),
        format!(r"{en}{{4}}([/-]){en}{{1,2}}\7{en}{{1,2}}"),
    ];

    format!(
        r"(?i)(?<![0-9০-৯])({})(?=\s|,|$|।|;|[?!]|\.(?![0-9০-৯]))",
        alternatives.join("|")
    )
}

fn distance_pattern() -> String {
    // 单位后可以紧跟尺寸分隔符（12"x10"、12ftx10ft），不能跟其他拉丁字母
    let unit = format!(
        r"(?:{})(?!(?![xX×]\s*[0-9০-৯])[A-Za-z])",
        UnitTable::alternation()
    );
    format!(
        r"(?<![0-9০-৯.:A-Za-z]){m}{u}\s*[xX×]\s*{m}{u}|(?<![0-9০-৯.:A-Za-z]){m}{u}",
        m = MEASURE,
        u = unit
    )
}

fn time_pattern() -> String {
    r"(?i)(?<![0-9০-৯])([0-9০-৯]{1,2}:[0-9০-৯]{2}(?::[0-9০-৯]{2})?(?:\s*(?:A\.M\.|P\.M\.|AM|PM|এ\.এম\.|পি\.এম\.|এএম|পিএম))?(?:\s*(?:টায়|মিনিটে))?)(?![0-9০-৯])"
        .to_string()
}

fn currency_pattern() -> String {
    format!(
        r"৳\s*{a}(?:\s*(?:লক্ষ|কোটি))?(?:\s*টাকার?)?|(?<![৳0-9০-৯.,]){a}\s*(?:(?:লক্ষ|কোটি)\s*)?টাকার?",
        a = AMOUNT
    )
}

fn percentage_pattern() -> String {
    format!(
        r"(?<![0-9০-৯.,])([-−]?{a})\s*(%|শতাংশ)(?![0-9০-৯]|\.[0-9০-৯])",
        a = AMOUNT
    )
}

fn temperature_pattern() -> String {
    format!(
        r"(?<![0-9০-৯.])[-−]?{m}(?:\s*°(?:\s*(?:সেলসিয়াসে?|সে\.?|[CcFfKk](?![A-Za-z])))?|\s*ডিগ্রি(?:\s*(?:সেলসিয়াসে?|ফারেনহাইটে?|কেলভিনে?))?)",
        m = MEASURE
    )
}

fn ratio_pattern() -> String {
    format!(
        r"(?<![0-9০-৯.,])({a}(?:\s*[:ঃ-]\s*{a})+|{a}\s*থেকে\s*{a}|{a}\s*অনুপাত\s*{a})(?:\s*(?:অনুপাতে|রেশিওতে))?(?!\s*[:ঃ-])",
        a = AMOUNT
    )
}

fn ordinal_pattern() -> String {
    r"(?<!\S)([০-৯0-9]+(?:,[০-৯0-9]+)*(?:র্থ|ষ্ঠ|তম|লা|রা|শে|ঠা|ম|য়|ই)|[0-9]+(?:,[0-9]+)*(?i:st|nd|rd|th))(?=\s|[।,;:.?!]|$)"
        .to_string()
}

/// 年份在前：1971 সালে / ১৯৭১ সালের / 1990 এর দশকে
///
/// `সন` 只作独立词（可带 ে/ের），`সন্ধ্যা` `সনদ` 不算
fn year_before_context_pattern() -> String {
    let bengali_letter = format!("[{}-{}]", '\u{0980}', '\u{09FF}');
    format!(
        r"(?<![0-9০-৯.,])([0-9০-৯]{{4}})(?=\s*(?:সাল|সন(?:ে|ের)?(?!{b})|-?এর\s*দশকে))",
        b = bengali_letter
    )
}

fn number_pattern() -> String {
    r"(?<![0-9০-৯৳])(?<![0-9০-৯][.,])((?:(?<!\w)[-−])?(?:[0-9০-৯]{1,3}(?:,[0-9০-৯]{2})*(?:,[0-9০-৯]{3})+|[0-9০-৯]+)(?:\.[0-9০-৯]+)?)(?![0-9০-৯%]|[.,][0-9০-৯])"
        .to_string()
}

lazy_static! {
    static ref MOBILE: Regex = compile(&mobile_pattern());
    static ref DATE: Regex = compile(&date_pattern());
    static ref DISTANCE: Regex = compile(&distance_pattern());
    static ref TIME: Regex = compile(&time_pattern());
    static ref CURRENCY: Regex = compile(&currency_pattern());
    static ref PERCENTAGE: Regex = compile(&percentage_pattern());
    static ref TEMPERATURE: Regex = compile(&temperature_pattern());
    static ref RATIO: Regex = compile(&ratio_pattern());
    static ref ORDINAL: Regex = compile(&ordinal_pattern());
    static ref NUMBER: Regex = compile(&number_pattern());
    static ref YEAR_BEFORE_CONTEXT: Regex = compile(&year_before_context_pattern());
    /// 年份在后：সাল 1971
    static ref YEAR_AFTER_CONTEXT: Regex = compile(r"(?:সাল|সন)\s*([0-9০-৯]{4})(?![0-9০-৯])");
}

/// 在文本中定位某一类别的全部候选片段（按出现顺序）
pub fn find_matches(category: Category, text: &str) -> NormalizeResult<Vec<CategoryMatch>> {
    match category {
        Category::Distance => whole_matches(category, &DISTANCE, text),
        Category::Temperature => whole_matches(category, &TEMPERATURE, text),
        Category::Time => group_matches(category, &TIME, text),
        Category::Date => group_matches(category, &DATE, text),
        Category::PhoneNumber => group_matches(category, &MOBILE, text),
        Category::Currency => whole_matches(category, &CURRENCY, text),
        Category::Percentage => percentage_matches(text),
        Category::Ratio => group_matches(category, &RATIO, text),
        Category::Ordinal => group_matches(category, &ORDINAL, text),
        Category::Year => year_matches(text),
        Category::Number => group_matches(category, &NUMBER, text),
    }
}

/// 整个匹配即候选片段
fn whole_matches(category: Category, re: &Regex, text: &str) -> NormalizeResult<Vec<CategoryMatch>> {
    let mut found = Vec::new();
    for m in re.find_iter(text) {
        let m = m?;
        found.push(CategoryMatch::new(category, m.range(), m.as_str()));
    }
    Ok(found)
}

/// 第 1 个捕获组为候选片段，其余部分只作上下文
fn group_matches(category: Category, re: &Regex, text: &str) -> NormalizeResult<Vec<CategoryMatch>> {
    let mut found = Vec::new();
    for caps in re.captures_iter(text) {
        let caps = caps?;
        if let Some(m) = caps.get(1) {
            found.push(CategoryMatch::new(category, m.range(), m.as_str()));
        }
    }
    Ok(found)
}

/// 百分比：替换整段，交给读法生成器的是 `<数字>%` 或 `<数字> শতাংশ`
fn percentage_matches(text: &str) -> NormalizeResult<Vec<CategoryMatch>> {
    let mut found = Vec::new();
    for caps in PERCENTAGE.captures_iter(text) {
        let caps = caps?;
        let (Some(whole), Some(amount), Some(sign)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let canonical_form = if sign.as_str() == "%" {
            format!("{}%", amount.as_str())
        } else {
            format!("{} {}", amount.as_str(), TABLES.words.percent)
        };
        found.push(CategoryMatch::new(Category::Percentage, whole.range(), canonical_form));
    }
    Ok(found)
}

/// 年份：只替换四位数字本身，上下文词保留
fn year_matches(text: &str) -> NormalizeResult<Vec<CategoryMatch>> {
    let mut found = group_matches(Category::Year, &YEAR_BEFORE_CONTEXT, text)?;
    found.extend(group_matches(Category::Year, &YEAR_AFTER_CONTEXT, text)?);
    found.sort_by_key(|m| m.span.start);
    found.dedup_by(|a, b| a.span == b.span);
    Ok(found)
}

fn texts(category: Category, text: &str) -> Vec<String> {
    match find_matches(category, text) {
        Ok(found) => found.into_iter().map(|m| m.text).collect(),
        Err(e) => {
            tracing::warn!("{} 识别失败: {}", category, e);
            Vec::new()
        }
    }
}

/// 孟加拉国手机号（可选 +88/৮৮，01x 开头）
pub fn extract_mobile_numbers(text: &str) -> Vec<String> {
    texts(Category::PhoneNumber, text)
}

/// 日期（月份名或数字形式，孟加拉/西式数字）
pub fn extract_bengali_dates(text: &str) -> Vec<String> {
    texts(Category::Date, text)
}

/// 距离与尺寸
pub fn extract_distances(text: &str) -> Vec<String> {
    texts(Category::Distance, text)
}

/// 时间（H:MM[:SS] [AM/PM] [টায়/মিনিটে]）
pub fn extract_time(text: &str) -> Vec<String> {
    texts(Category::Time, text)
}

/// 塔卡金额
pub fn extract_taka_amounts(text: &str) -> Vec<String> {
    texts(Category::Currency, text)
}

pub fn extract_percentages(text: &str) -> Vec<String> {
    texts(Category::Percentage, text)
}

pub fn extract_temperatures(text: &str) -> Vec<String> {
    texts(Category::Temperature, text)
}

pub fn extract_ratios(text: &str) -> Vec<String> {
    texts(Category::Ratio, text)
}

pub fn extract_ordinals(text: &str) -> Vec<String> {
    texts(Category::Ordinal, text)
}

/// 带 সাল/সন/দশকে 上下文的年份（只返回年份数字）
pub fn extract_years_with_context(text: &str) -> Vec<String> {
    texts(Category::Year, text)
}

/// 通用数字
pub fn extract_numbers(text: &str) -> Vec<String> {
    texts(Category::Number, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> String {
        canonical(s)
    }

    #[test]
    fn test_patterns_compile() {
        for category in [
            Category::Distance,
            Category::Temperature,
            Category::Time,
            Category::Date,
            Category::PhoneNumber,
            Category::Currency,
            Category::Percentage,
            Category::Ratio,
            Category::Ordinal,
            Category::Year,
            Category::Number,
        ] {
            assert!(find_matches(category, "").unwrap().is_empty(), "{}", category);
        }
    }

    #[test]
    fn test_extract_mobile_numbers() {
        assert_eq!(extract_mobile_numbers("কল করুন ০১৭১২৩৪৫৬৭৮ নম্বরে"), vec!["০১৭১২৩৪৫৬৭৮"]);
        assert_eq!(extract_mobile_numbers("call +8801712345678 now"), vec!["+8801712345678"]);
        assert_eq!(extract_mobile_numbers("০১৭১২-৩৪৫৬৭৮"), vec!["০১৭১২-৩৪৫৬৭৮"]);
        // 第二位必须是 3–9
        assert!(extract_mobile_numbers("01212345678").is_empty());
        // 不能紧贴其他数字或小数点
        assert!(extract_mobile_numbers("1.01712345678").is_empty());
        assert!(extract_mobile_numbers("01712345678_x").is_empty());
    }

    #[test]
    fn test_extract_dates() {
        assert_eq!(
            extract_bengali_dates(&c("আজ ২৫ ডিসেম্বর, ২০২৩ তারিখ")),
            vec![c("২৫ ডিসেম্বর, ২০২৩")]
        );
        assert_eq!(extract_bengali_dates("on 12/05/2023 at noon"), vec!["12/05/2023"]);
        assert_eq!(extract_bengali_dates("৫th"), Vec::<String>::new());
        assert_eq!(extract_bengali_dates("1st january 2024।"), vec!["1st january 2024"]);
        assert_eq!(extract_bengali_dates(&c("২০২৩-১২-২৫")), vec![c("২০২৩-১২-২৫")]);
        assert_eq!(extract_bengali_dates(&c("১লা মে ২০২৪")), vec![c("১লা মে ২০২৪")]);
    }

    #[test]
    fn test_date_separator_must_repeat() {
        assert!(extract_bengali_dates("12/05-2023").is_empty());
    }

    #[test]
    fn test_extract_distances() {
        assert_eq!(extract_distances("ঘরের মাপ ১২ft x ১০ft"), vec!["১২ft x ১০ft"]);
        assert_eq!(extract_distances("2.5km দূরে, 150cm লম্বা"), vec!["2.5km", "150cm"]);
        // 单位后不能继续跟拉丁字母
        assert!(extract_distances("5min").is_empty());
        // 时间里的 pm 不是皮米
        assert!(extract_distances("10:30pm").is_empty());
    }

    #[test]
    fn test_extract_distances_glued_dimension() {
        assert_eq!(extract_distances("মাপ 12\"x10\" ছিল"), vec!["12\"x10\""]);
        assert_eq!(extract_distances("মাপ 12ftx10ft ছিল"), vec!["12ftx10ft"]);
        assert_eq!(extract_distances("৩m×৪m"), vec!["৩m×৪m"]);
        // 分隔符后没有数字时仍按普通单词处理
        assert!(extract_distances("5mx").is_empty());
    }

    #[test]
    fn test_extract_time() {
        assert_eq!(extract_time(&c("সকাল ১০:৩০ টায়")), vec![c("১০:৩০ টায়")]);
        assert_eq!(extract_time("meet at 5:30 pm"), vec!["5:30 pm"]);
        assert_eq!(extract_time("12:45:10"), vec!["12:45:10"]);
        assert!(extract_time("123:45").is_empty());
    }

    #[test]
    fn test_extract_taka() {
        assert_eq!(extract_taka_amounts(&c("দাম ৳১০ লক্ষ")), vec![c("৳১০ লক্ষ")]);
        assert_eq!(extract_taka_amounts(&c("৫০০ টাকার বই")), vec![c("৫০০ টাকার")]);
        assert_eq!(extract_taka_amounts(&c("৳১,২০০")), vec![c("৳১,২০০")]);
        assert!(extract_taka_amounts(&c("টাকা নেই")).is_empty());
    }

    #[test]
    fn test_extract_percentages_returns_canonical_form() {
        assert_eq!(extract_percentages("৫০ %"), vec!["৫০%"]);
        assert_eq!(extract_percentages(&c("১৫.৫ শতাংশ")), vec![c("১৫.৫ শতাংশ")]);
        assert_eq!(extract_percentages("-3%"), vec!["-3%"]);
        // 句末英文句点不影响识别，小数点后跟数字则不是完整百分比
        assert_eq!(extract_percentages("বেড়েছে 50%. তারপর"), vec!["50%"]);
        assert!(extract_percentages("50%.5").is_empty());

        let found = find_matches(Category::Percentage, "৫০ %").unwrap();
        assert_eq!(found[0].span, 0.."৫০ %".len());
    }

    #[test]
    fn test_extract_temperatures() {
        assert_eq!(extract_temperatures("আজ ৩০°C"), vec!["৩০°C"]);
        assert_eq!(
            extract_temperatures(&c("৩৫.৫ ডিগ্রি সেলসিয়াস")),
            vec![c("৩৫.৫ ডিগ্রি সেলসিয়াস")]
        );
        assert_eq!(extract_temperatures("-5°"), vec!["-5°"]);
    }

    #[test]
    fn test_extract_ratios() {
        assert_eq!(extract_ratios(&c("অনুপাত ৩:২ ছিল")), vec![c("৩:২")]);
        assert_eq!(extract_ratios(&c("১০ থেকে ২০ জন")), vec![c("১০ থেকে ২০")]);
        assert_eq!(extract_ratios("1:2:3 অনুপাতে"), vec!["1:2:3"]);
        // 后面还跟分隔符的不是完整比例
        assert!(extract_ratios("1:2:").is_empty());
    }

    #[test]
    fn test_extract_ordinals() {
        assert_eq!(extract_ordinals(&c("সে ১ম হয়েছে")), vec![c("১ম")]);
        assert_eq!(extract_ordinals("the 2nd, then 3RD."), vec!["2nd", "3RD"]);
        assert_eq!(extract_ordinals(&c("২১শে ফেব্রুয়ারি")), vec![c("২১শে")]);
        assert_eq!(extract_ordinals(&c("১০,০০০তম দর্শক")), vec![c("১০,০০০তম")]);
        // 前面必须是空白或开头
        assert!(extract_ordinals("x1st").is_empty());
    }

    #[test]
    fn test_extract_years_with_context() {
        assert_eq!(extract_years_with_context(&c("1971 সালে স্বাধীন")), vec!["1971"]);
        assert_eq!(extract_years_with_context(&c("সাল 1952")), vec!["1952"]);
        assert_eq!(extract_years_with_context(&c("১৯৯০ এর দশকে")), vec![c("১৯৯০")]);
        assert!(extract_years_with_context("1971 ছিল").is_empty());
        assert_eq!(extract_years_with_context(&c("১৯৫২ সনে")), vec![c("১৯৫২")]);
        // সন্ধ্যা / সনদ 不是年份上下文
        assert!(extract_years_with_context(&c("2020 সন্ধ্যায়")).is_empty());
        assert!(extract_years_with_context(&c("2020 সনদ")).is_empty());

        let found = find_matches(Category::Year, &c("2000 সাল")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, 0..4);
    }

    #[test]
    fn test_extract_numbers() {
        assert_eq!(extract_numbers("১২৩ আর 4.5"), vec!["১২৩", "4.5"]);
        assert_eq!(extract_numbers("1,00,000 জন"), vec!["1,00,000"]);
        assert_eq!(extract_numbers("12,345"), vec!["12,345"]);
        assert_eq!(extract_numbers("-৫ ডিগ্রি"), vec!["-৫"]);
        assert_eq!(extract_numbers("এক, ২, তিন"), vec!["২"]);
        // 紧贴单词的连字符不是负号
        assert_eq!(extract_numbers("ক-৫"), vec!["৫"]);
        // ৳ 与 % 由前面的阶段处理
        assert!(extract_numbers("৳৫০").is_empty());
        assert!(extract_numbers("৫০%").is_empty());
    }
}
