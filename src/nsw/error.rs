use thiserror::Error;

use crate::nsw::types::Category;

/// 单个匹配的转换失败
///
/// 除 [`ConversionError::InvalidDate`] 外都只跳过当前匹配，原文保留
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unparseable numeral: {0}")]
    InvalidNumeral(String),

    #[error("Numeral out of range: {0}")]
    NumeralOverflow(String),

    #[error("Invalid date: {text} - {reason}")]
    InvalidDate { text: String, reason: String },

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Unsupported ordinal: {0}")]
    UnsupportedOrdinal(String),
}

impl ConversionError {
    /// 是否需要中止当前文本块
    ///
    /// 日期被识别器接受却无法构成合法日历日期时，整块保留原文
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidDate { .. })
    }
}

/// 文本块级错误，在编排器边界被捕获
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Pattern matching failed: {0}")]
    Pattern(#[from] fancy_regex::Error),

    #[error("{category} conversion failed: {source}")]
    Conversion {
        category: Category,
        #[source]
        source: ConversionError,
    },
}

pub type NormalizeResult<T> = Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_dates_are_fatal() {
        let date = ConversionError::InvalidDate {
            text: "31/02/2023".to_string(),
            reason: "day out of range".to_string(),
        };
        assert!(date.is_fatal());
        assert!(!ConversionError::InvalidNumeral("১২ক".to_string()).is_fatal());
        assert!(!ConversionError::InvalidTime("25:00".to_string()).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = NormalizeError::Conversion {
            category: Category::Date,
            source: ConversionError::InvalidDate {
                text: "31/02/2023".to_string(),
                reason: "day out of range".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "date conversion failed: Invalid date: 31/02/2023 - day out of range"
        );
    }
}
