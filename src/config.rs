// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 配置目录名
const APP_DIR_NAME: &str = "bangla-normalizer";

/// 超过此字符数的文本按句切块处理
pub const DEFAULT_CHUNK_THRESHOLD: usize = 150;

fn default_chunk_threshold() -> usize {
    DEFAULT_CHUNK_THRESHOLD
}

fn default_phonetic_substitution() -> bool {
    true
}

/// 规范化配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// 切块阈值（字符数）
    #[serde(default = "default_chunk_threshold")]
    pub chunk_threshold: usize,
    /// 是否把常见英文词替换为孟加拉语音译
    #[serde(default = "default_phonetic_substitution")]
    pub phonetic_substitution: bool,
    /// 追加/覆盖的英文音译词条（英文 → 孟加拉语）
    #[serde(default)]
    pub english_words: BTreeMap<String, String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self {
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            phonetic_substitution: true,
            english_words: BTreeMap::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_threshold == 0 {
            anyhow::bail!("chunk_threshold 必须大于 0");
        }
        if let Some((en, _)) = self
            .english_words
            .iter()
            .find(|(en, bn)| en.trim().is_empty() || bn.trim().is_empty())
        {
            anyhow::bail!("英文音译词条不能为空: {:?}", en);
        }
        if let Some(en) = self.english_words.keys().find(|en| en.split_whitespace().count() > 1) {
            anyhow::bail!("英文音译词条只能是单个词: {:?}", en);
        }
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        Ok(config_dir.join(APP_DIR_NAME).join("config.json"))
    }

    /// 从默认位置加载，文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
            Ok(Self::new())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let config: NormalizerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::info!("配置加载成功");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// 原子写入：先写临时文件，再替换
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        tracing::info!("保存配置到: {:?}", path);

        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败: {}", e);
            e
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            tracing::error!("重命名临时文件失败: {}", e);
            let _ = std::fs::remove_file(&temp_path);
            e
        })?;

        tracing::info!("配置保存成功");
        Ok(())
    }
}
