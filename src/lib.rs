//! 孟加拉语文本规范化
//!
//! 数字、日期、时间、电话、货币等非标准词 → 完整孟加拉语读法，附带 IPA 转写。

pub mod config;
pub mod ipa;
pub mod nsw;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lazy_static::lazy_static;

pub use config::NormalizerConfig;
pub use ipa::to_ipa;
pub use nsw::{NormalizationResult, Normalizer};

lazy_static! {
    /// 默认配置的共享引擎
    static ref DEFAULT_NORMALIZER: Normalizer = Normalizer::default();
}

/// 使用默认配置规范化文本
///
/// 不可失败：无法处理的部分原样返回
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text).text
}

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "bangla-normalizer")]
#[command(version)]
#[command(about = "孟加拉语文本规范化：非标准词 → 完整读法", long_about = None)]
struct Cli {
    /// 额外输出 IPA 行
    #[arg(long)]
    ipa: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 指定配置文件（默认读取用户配置目录）
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 待规范化文本；不带时逐行读取标准输入
    #[arg(value_name = "TEXT")]
    texts: Vec<String>,
}

/// 规范化一段文本并写出结果（以及可选的 IPA 行）
fn emit(normalizer: &Normalizer, text: &str, ipa: bool, out: &mut impl Write) -> Result<()> {
    let result = normalizer.normalize(text);
    tracing::debug!(
        "规范化完成: {} 处替换, {} 块失败, 耗时 {}us",
        result.applied.len(),
        result.failed_chunks,
        result.elapsed_us
    );

    writeln!(out, "{}", result.text)?;
    if ipa {
        writeln!(out, "{}", to_ipa(&result.text))?;
    }
    Ok(())
}

fn try_run(args: Cli) -> Result<()> {
    let config = match &args.config {
        Some(path) => NormalizerConfig::load_from(path)?,
        None => NormalizerConfig::load()?,
    };
    let normalizer = Normalizer::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.texts.is_empty() {
        for line in io::stdin().lock().lines() {
            emit(&normalizer, &line?, args.ipa, &mut out)?;
        }
    } else {
        emit(&normalizer, &args.texts.join(" "), args.ipa, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

pub fn run() {
    let args = Cli::parse();

    // 初始化日志（写到 stderr，stdout 只输出结果）
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = try_run(args) {
        tracing::error!("运行失败: {:#}", e);
        std::process::exit(1);
    }
}
