//! 配置管理模块
//!
//! 提供CLI参数解析和翻译选项管理功能

// 标准库导入
use std::path::PathBuf;

// 第三方crate导入
use clap::{Args, Parser, Subcommand};

// 本地模块导入
use crate::translator::Tranzlator;

/// 翻译选项结构体
///
/// 汇总命令行上与翻译行为相关的开关，支持Builder模式进行链式配置，
/// 最后通过 `apply` 作用到 `Tranzlator` 上。
///
/// # Examples
///
/// ```rust
/// use lolspeak::config::TranzlatorOptions;
///
/// let options = TranzlatorOptions::new()
///     .with_heuristics(true)
///     .exclude_words(vec!["invention".to_string()])
///     .with_trace(true);
/// assert!(options.is_heuristics_enabled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranzlatorOptions {
    /// 记录经词典翻译的单词
    trace: bool,
    /// 词典未命中时尝试启发式规则
    try_heuristics: bool,
    /// 不做启发式变形的单词
    heuristics_exclude: Vec<String>,
    /// 输出全部大写
    upcase: bool,
}

impl TranzlatorOptions {
    /// 创建默认选项：全部关闭
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.trace
    }

    pub fn is_heuristics_enabled(&self) -> bool {
        self.try_heuristics
    }

    pub fn heuristics_exclude(&self) -> &[String] {
        &self.heuristics_exclude
    }

    pub fn is_upcase(&self) -> bool {
        self.upcase
    }

    /// 设置是否记录翻译历史
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// 设置是否启用启发式规则
    pub fn with_heuristics(mut self, enable: bool) -> Self {
        self.try_heuristics = enable;
        self
    }

    /// 设置启发式排除单词
    pub fn exclude_words(mut self, words: Vec<String>) -> Self {
        self.heuristics_exclude = words;
        self
    }

    /// 设置是否输出大写
    pub fn upcase(mut self, upcase: bool) -> Self {
        self.upcase = upcase;
        self
    }

    /// 将选项应用到翻译器
    pub fn apply(&self, tranzlator: &mut Tranzlator) {
        tranzlator.set_trace(self.trace);
        tranzlator.set_try_heuristics(self.try_heuristics);
        tranzlator.set_heuristics_exclude(&self.heuristics_exclude);
    }
}

impl From<&TranslateArgs> for TranzlatorOptions {
    fn from(args: &TranslateArgs) -> Self {
        Self::new()
            .with_trace(args.trace || args.stats)
            .with_heuristics(args.heuristics)
            .exclude_words(args.exclude.clone())
            .upcase(args.upcase)
    }
}

/// CLI参数结构
#[derive(Parser)]
#[command(author, version, about = "英语到LOLspeak翻译工具 - 支持纯文本和XML文件", long_about = None)]
pub struct Cli {
    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// 子命令
#[derive(Subcommand)]
pub enum Command {
    /// 翻译文本或XML文件
    Translate(TranslateArgs),

    /// 按键排序输出词典（YAML）
    SortDict(DictArgs),

    /// 将词典导出为Apple Dictionary Services XML
    DictXml(DictArgs),
}

/// translate 子命令参数
#[derive(Args)]
pub struct TranslateArgs {
    /// 输入文件路径
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// 输出文件路径 (可选，默认为输入文件名+_lol，"-" 表示标准输出)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// 词典文件 (YAML或JSON，默认使用内置词典)
    #[arg(short, long, value_name = "DICT")]
    pub dictionary: Option<PathBuf>,

    /// 强制按XML处理输入
    #[arg(long)]
    pub xml: bool,

    /// 对词典中没有的单词尝试启发式规则
    #[arg(long)]
    pub heuristics: bool,

    /// 不做启发式变形的单词 (可重复)
    #[arg(long, value_name = "WORD")]
    pub exclude: Vec<String>,

    /// 记录经词典翻译的单词
    #[arg(long)]
    pub trace: bool,

    /// 输出全部大写
    #[arg(long)]
    pub upcase: bool,

    /// 显示统计信息
    #[arg(long)]
    pub stats: bool,
}

/// 词典导出子命令参数
#[derive(Args)]
pub struct DictArgs {
    /// 词典文件 (YAML或JSON，默认使用内置词典)
    #[arg(short, long, value_name = "DICT")]
    pub dictionary: Option<PathBuf>,

    /// 输出文件路径 (默认为标准输出)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
