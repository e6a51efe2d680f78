//! 词典模块
//!
//! 负责词典文件的加载（YAML/JSON）、内置默认词典，以及两种导出格式：
//! - 按键排序的YAML（需要时加引号）
//! - Apple Dictionary Services XML

// 标准库导入
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::Path;

// 第三方crate导入
use quick_xml::escape::escape;
use tracing::{debug, info};

// 本地模块导入
use crate::constants::{dictionary_config, is_json_extension};
use crate::error::Result;
use crate::lolspeak_error;

/// 小写源单词 -> LOLspeak译文
pub type Dictionary = HashMap<String, String>;

/// 随库发布的默认词典
pub const BUNDLED_DICTIONARY: &str = include_str!("../data/tranzlator.yml");

/// 会被YAML解析器当作布尔值的单词，导出时必须加引号
const YAML_BOOLEANS: &[&str] = &["yes", "true", "no", "false"];

/// 解析内置默认词典
pub fn bundled_dictionary() -> Result<Dictionary> {
    parse_yaml(BUNDLED_DICTIONARY, dictionary_config::BUNDLED_DICTIONARY_NAME)
}

/// 从文件加载词典
///
/// 扩展名为 `.json` 时按JSON解析，其余一律按YAML解析。
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    let content = std::fs::read_to_string(path)
        .map_err(|e| lolspeak_error!(load, origin, e))?;

    let is_json = path
        .extension()
        .map(|ext| is_json_extension(&ext.to_string_lossy()))
        .unwrap_or(false);

    let dictionary = if is_json {
        parse_json(&content, &origin)?
    } else {
        parse_yaml(&content, &origin)?
    };

    info!("📖 已加载词典 {}: {} 个词条", origin, dictionary.len());
    Ok(dictionary)
}

/// 解析YAML格式的扁平键值词典
pub fn parse_yaml(content: &str, origin: &str) -> Result<Dictionary> {
    // 空文件视为空词典
    if content.trim().is_empty() {
        debug!("词典 {} 为空", origin);
        return Ok(Dictionary::new());
    }
    serde_yaml::from_str(content).map_err(|e| lolspeak_error!(load, origin, e))
}

/// 解析JSON格式的扁平键值词典
pub fn parse_json(content: &str, origin: &str) -> Result<Dictionary> {
    serde_json::from_str(content).map_err(|e| lolspeak_error!(load, origin, e))
}

/// 词典导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 按键排序的YAML
    SortedYaml,
    /// Apple Dictionary Services XML
    AppleDictionary,
}

/// 按指定格式导出词典
pub fn export<W: Write>(
    dictionary: &Dictionary,
    format: ExportFormat,
    out: &mut W,
) -> std::io::Result<()> {
    match format {
        ExportFormat::SortedYaml => write_sorted_yaml(dictionary, out),
        ExportFormat::AppleDictionary => write_apple_dictionary(dictionary, out),
    }
}

/// 按指定格式导出词典到文件
pub fn export_to_file<P: AsRef<Path>>(
    dictionary: &Dictionary,
    format: ExportFormat,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .map_err(|e| lolspeak_error!(file_op, path.display(), "创建", e))?;

    let mut out = BufWriter::new(file);
    export(dictionary, format, &mut out)
        .and_then(|()| out.flush())
        .map_err(|e| lolspeak_error!(file_op, path.display(), "写入", e))?;

    info!("💾 已导出 {} 个词条到 {}", dictionary.len(), path.display());
    Ok(())
}

/// 按键排序的词条列表
pub fn sorted_entries(dictionary: &Dictionary) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = dictionary
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// 为YAML标量加引号（仅在需要时）
///
/// 纯ASCII字母且不是布尔字面量的字符串保持原样，其余加双引号。
pub fn yaml_quote(value: &str) -> Cow<'_, str> {
    let plain = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic());
    if plain && !YAML_BOOLEANS.contains(&value) {
        return Cow::Borrowed(value);
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    Cow::Owned(format!("\"{}\"", escaped))
}

/// 将词典按键排序后写出为YAML，每行一个 `key: value`
pub fn write_sorted_yaml<W: Write>(dictionary: &Dictionary, out: &mut W) -> std::io::Result<()> {
    for (key, value) in sorted_entries(dictionary) {
        writeln!(out, "{}: {}", yaml_quote(key), yaml_quote(value))?;
    }
    Ok(())
}

/// 将词典导出为Apple Dictionary Services使用的XML源文件
pub fn write_apple_dictionary<W: Write>(
    dictionary: &Dictionary,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<d:dictionary xmlns="http://www.w3.org/1999/xhtml" xmlns:d="http://www.apple.com/DTDs/DictionaryService-1.0.rng">"#
    )?;

    for (key, value) in sorted_entries(dictionary) {
        let key = escape(key);
        let value = escape(value);
        writeln!(out, r#"<d:entry id="{}">"#, key)?;
        writeln!(out, r#"    <d:index d:value="{}" d:title="{}"/>"#, key, key)?;
        writeln!(out, "    <h1>{}</h1>", key)?;
        writeln!(out, "    <p>{}</p>", value)?;
        writeln!(out, "</d:entry>")?;
    }

    writeln!(out, "</d:dictionary>")
}
