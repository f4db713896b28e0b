//! NSW 类型定义

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// 非标准词类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// 距离/尺寸（如 ১২ft x ১০ft）
    Distance,
    /// 温度（如 ৩০°C）
    Temperature,
    /// 时间（如 ১০:৩০ AM）
    Time,
    /// 日期（如 ২৫ ডিসেম্বর, ২০২৩）
    Date,
    /// 孟加拉国手机号
    PhoneNumber,
    /// 塔卡金额（如 ৳৫০০）
    Currency,
    /// 百分比
    Percentage,
    /// 比例（如 ৩:২）
    Ratio,
    /// 序数（如 ১ম, 2nd）
    Ordinal,
    /// 带上下文的年份（如 1971 সালে）
    Year,
    /// 通用数字，最后执行
    Number,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Temperature => "temperature",
            Self::Time => "time",
            Self::Date => "date",
            Self::PhoneNumber => "phone_number",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Ratio => "ratio",
            Self::Ordinal => "ordinal",
            Self::Year => "year",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 识别器输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category: Category,
    /// 在当前工作文本中的字节范围
    pub span: Range<usize>,
    /// 交给读法生成器的文本
    pub text: String,
}

impl CategoryMatch {
    pub fn new(category: Category, span: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            category,
            span,
            text: text.into(),
        }
    }
}

/// 替换记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub category: Category,
    /// 原始文本
    pub original: String,
    /// 替换后文本
    pub replaced: String,
    /// 起始位置（所在阶段工作文本的字节索引）
    pub start: usize,
    /// 结束位置（不含）
    pub end: usize,
}

/// 规范化结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationResult {
    /// 规范化后的文本
    pub text: String,
    /// 是否有改动
    pub changed: bool,
    /// 已应用的替换
    pub applied: Vec<Replacement>,
    /// 处理失败、保留原文的文本块数
    pub failed_chunks: usize,
    /// 处理耗时（微秒）
    pub elapsed_us: u64,
}

impl NormalizationResult {
    /// 创建无修改的结果
    pub fn unchanged(text: String, elapsed_us: u64) -> Self {
        Self {
            text,
            changed: false,
            applied: Vec::new(),
            failed_chunks: 0,
            elapsed_us,
        }
    }
}
