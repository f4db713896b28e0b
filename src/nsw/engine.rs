//! NSW 主引擎
//!
//! 按固定优先级依次执行各类别的识别 + 转换，长文本按句切块、逐块隔离失败

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::config::NormalizerConfig;
use crate::nsw::error::{NormalizeError, NormalizeResult};
use crate::nsw::extract::find_matches;
use crate::nsw::number::to_words;
use crate::nsw::rules::{PhoneticTable, TABLES};
use crate::nsw::sentence::split_sentences;
use crate::nsw::types::{Category, NormalizationResult, Replacement};
use crate::nsw::words::{
    date_to_word, distance_to_word, ordinal_to_word, percentage_to_word, phone_number_to_word,
    taka_to_word, temperature_to_word, time_to_word, year_to_word,
};
use crate::nsw::{canonical, collapse_whitespace, select_non_overlapping, splice};

/// 处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 某一类别的识别 + 转换
    Nsw(Category),
    /// 常见英文词音译
    PhoneticWords,
    /// 空白折叠
    CollapseWhitespace,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nsw(category) => write!(f, "{}", category),
            Self::PhoneticWords => f.write_str("phonetic_words"),
            Self::CollapseWhitespace => f.write_str("collapse_whitespace"),
        }
    }
}

/// 阶段顺序
///
/// 前面阶段的输出只含孟加拉语词，不会被后面的识别器再次匹配；
/// 通用数字必须最后执行。
pub const STAGE_ORDER: [Stage; 13] = [
    Stage::Nsw(Category::Distance),
    Stage::Nsw(Category::Temperature),
    Stage::Nsw(Category::Time),
    Stage::Nsw(Category::Date),
    Stage::Nsw(Category::PhoneNumber),
    Stage::Nsw(Category::Currency),
    Stage::Nsw(Category::Percentage),
    Stage::Nsw(Category::Ratio),
    Stage::Nsw(Category::Ordinal),
    Stage::Nsw(Category::Year),
    Stage::Nsw(Category::Number),
    Stage::PhoneticWords,
    Stage::CollapseWhitespace,
];

/// NSW 引擎（可复用，规则与模式全局预编译）
pub struct Normalizer {
    config: NormalizerConfig,
    /// 英文音译表（内置词条 + 配置覆盖）
    phonetic: PhoneticTable,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        let phonetic = PhoneticTable::new().with_overrides(config.english_words.iter());
        Self { config, phonetic }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// 规范化文本
    ///
    /// 不可失败：短文本整体失败时返回原文，长文本失败的块保留原文
    pub fn normalize(&self, text: &str) -> NormalizationResult {
        let start = Instant::now();

        if text.trim().is_empty() {
            return NormalizationResult::unchanged(text.to_string(), 0);
        }

        let input = canonical(text);
        let mut applied = Vec::new();
        let mut failed_chunks = 0;

        // 失败时返回的是调用方给的原始字节，不是 NFC 之后的文本
        let output = if input.chars().count() <= self.config.chunk_threshold {
            match self.process_chunk(&input, &mut applied) {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!("文本规范化失败，返回原文: {}", e);
                    applied.clear();
                    failed_chunks = 1;
                    text.to_string()
                }
            }
        } else {
            // 句末标点不参与 NFC 组合，先切原文再逐块归一化
            let sentences = split_sentences(text);
            tracing::debug!("长文本切分为 {} 块", sentences.len());

            let mut pieces = Vec::with_capacity(sentences.len());
            for sentence in sentences {
                let mut chunk_applied = Vec::new();
                match self.process_chunk(&canonical(&sentence), &mut chunk_applied) {
                    Ok(output) => {
                        pieces.push(output);
                        applied.extend(chunk_applied);
                    }
                    Err(e) => {
                        tracing::warn!("文本块规范化失败，保留原文: '{}' ({})", sentence, e);
                        failed_chunks += 1;
                        pieces.push(sentence);
                    }
                }
            }
            pieces.join(" ")
        };

        let elapsed_us = start.elapsed().as_micros() as u64;
        let changed = output != text;

        NormalizationResult {
            text: output,
            changed,
            applied,
            failed_chunks,
            elapsed_us,
        }
    }

    /// 按给定顺序执行若干阶段（不切块）
    pub fn apply_stages(&self, text: &str, stages: &[Stage]) -> NormalizeResult<String> {
        let mut applied = Vec::new();
        let mut current = canonical(text);
        for &stage in stages {
            current = self.run_stage(stage, &current, &mut applied)?;
        }
        Ok(current)
    }

    /// 执行单个阶段
    pub fn apply_stage(&self, stage: Stage, text: &str) -> NormalizeResult<String> {
        self.apply_stages(text, &[stage])
    }

    fn process_chunk(&self, chunk: &str, applied: &mut Vec<Replacement>) -> NormalizeResult<String> {
        let mut current = chunk.to_string();
        for stage in STAGE_ORDER {
            current = self.run_stage(stage, &current, applied)?;
        }
        Ok(current)
    }

    fn run_stage(
        &self,
        stage: Stage,
        text: &str,
        applied: &mut Vec<Replacement>,
    ) -> NormalizeResult<String> {
        match stage {
            Stage::Nsw(category) => self.run_category(category, text, applied),
            Stage::PhoneticWords => {
                if self.config.phonetic_substitution {
                    Ok(self.phonetic.translate(text))
                } else {
                    Ok(text.to_string())
                }
            }
            Stage::CollapseWhitespace => Ok(collapse_whitespace(text)),
        }
    }

    /// 识别 → 去重转换 → 长匹配优先、不重叠地按位置替换
    fn run_category(
        &self,
        category: Category,
        text: &str,
        applied: &mut Vec<Replacement>,
    ) -> NormalizeResult<String> {
        let matches = find_matches(category, text)?;
        if matches.is_empty() {
            return Ok(text.to_string());
        }

        // 同一片段只转换一次
        let mut cache: HashMap<String, Option<String>> = HashMap::new();
        let mut edits = Vec::with_capacity(matches.len());

        for m in matches {
            let converted = match cache.get(&m.text) {
                Some(converted) => converted.clone(),
                None => {
                    let converted = match self.convert(category, &m.text, text) {
                        Ok(word) => Some(word),
                        Err(NormalizeError::Conversion { source, .. }) if !source.is_fatal() => {
                            tracing::debug!("跳过无法转换的 {} '{}': {}", category, m.text, source);
                            None
                        }
                        Err(e) => return Err(e),
                    };
                    cache.insert(m.text.clone(), converted.clone());
                    converted
                }
            };

            if let Some(word) = converted {
                edits.push((m.span, word));
            }
        }

        let accepted = select_non_overlapping(edits);
        tracing::debug!("{} 阶段: {} 处替换", category, accepted.len());

        applied.extend(accepted.iter().map(|(span, word)| Replacement {
            category,
            original: text[span.clone()].to_string(),
            replaced: word.clone(),
            start: span.start,
            end: span.end,
        }));

        Ok(splice(text, accepted))
    }

    /// 单个片段 → 读法；`context` 为所在阶段的工作文本
    fn convert(&self, category: Category, fragment: &str, context: &str) -> NormalizeResult<String> {
        let converted = match category {
            Category::Distance => distance_to_word(fragment),
            Category::Temperature => temperature_to_word(fragment),
            Category::Time => Ok(time_to_word(fragment, context)),
            Category::Date => date_to_word(fragment),
            // 号码后补一个空格，避免与后面的词粘连
            Category::PhoneNumber => phone_number_to_word(fragment).map(|w| format!("{} ", w)),
            Category::Currency => taka_to_word(fragment),
            Category::Percentage => percentage_to_word(fragment),
            Category::Ratio => return self.ratio_to_word(fragment),
            Category::Ordinal => ordinal_to_word(fragment),
            Category::Year => year_to_word(fragment),
            Category::Number => to_words(fragment),
        };
        converted.map_err(|source| NormalizeError::Conversion { category, source })
    }

    /// 比例：`ঃ` `:` → এ，`-` → 空格，再对片段执行通用数字阶段
    fn ratio_to_word(&self, ratio: &str) -> NormalizeResult<String> {
        let to = format!(" {} ", TABLES.words.ratio_to);
        let fragment = ratio.replace('ঃ', &to).replace(':', &to).replace('-', " ");
        let mut scratch = Vec::new();
        let spoken = self.run_category(Category::Number, &fragment, &mut scratch)?;
        Ok(collapse_whitespace(&spoken))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}
