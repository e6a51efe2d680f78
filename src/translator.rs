//! LOLspeak翻译引擎
//!
//! `Tranzlator` 持有一份词典，提供单词级与字符串级的翻译操作，
//! 并可选地记录翻译历史（trace）与启发式规则命中情况。

// 标准库导入
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;

// 第三方crate导入
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// 本地模块导入
use crate::dictionary::{self, Dictionary};
use crate::error::Result;
use crate::heuristics::apply_heuristics;

/// 单词token：单词字符开头，后接单词字符或撇号（ASCII `'` 与排版用 `’`），再带上尾随空白
static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w[\w’']*\s*").expect("单词token正则无效"));

/// 前缀 + 撇号 + 后缀，前缀取到最后一个撇号之前
static APOSTROPHE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)(['’]\w+)$").expect("撇号后缀正则无效"));

/// 作用于最终译文的可选变换，例如大写化或转义
///
/// 过滤器返回的错误会原样传给调用方。
pub type WordFilter<'a> = &'a dyn Fn(&str) -> Result<String>;

/// 英语到LOLspeak的翻译器
///
/// 词典在构造后不可变。翻译方法需要 `&mut self`，因为开启 trace 或启发式时会写入日志；
/// 跨线程共享同一实例需要调用方自行加锁。
///
/// ```rust
/// use std::collections::HashMap;
/// use lolspeak::Tranzlator;
///
/// let mut dictionary = HashMap::new();
/// dictionary.insert("hi".to_string(), "oh hai".to_string());
/// dictionary.insert("cat".to_string(), "kitteh".to_string());
///
/// let mut t = Tranzlator::new(dictionary);
/// assert_eq!(t.translate_words("Hi cat!", None).unwrap(), "oh hai kitteh!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tranzlator {
    dictionary: Dictionary,
    /// 是否记录经词典翻译的单词
    trace: bool,
    traced_words: HashMap<String, String>,
    /// 词典未命中时是否尝试启发式规则
    try_heuristics: bool,
    translated_heuristics: HashMap<String, String>,
    /// 永不做启发式变形的单词
    heuristics_exclude: HashSet<String>,
}

impl Tranzlator {
    /// 由词典创建翻译器
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            ..Self::default()
        }
    }

    /// 由词典文件（YAML或JSON）创建翻译器
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(dictionary::load_dictionary(path)?))
    }

    /// 使用内置默认词典创建翻译器
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(dictionary::bundled_dictionary()?))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn trace(&self) -> bool {
        self.trace
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// 开启trace后经词典翻译的单词（小写原词 -> 译文）
    pub fn traced_words(&self) -> &HashMap<String, String> {
        &self.traced_words
    }

    pub fn clear_traced_words(&mut self) {
        self.traced_words.clear();
    }

    pub fn try_heuristics(&self) -> bool {
        self.try_heuristics
    }

    pub fn set_try_heuristics(&mut self, try_heuristics: bool) {
        self.try_heuristics = try_heuristics;
    }

    /// 经启发式规则翻译的单词（小写原词 -> 译文）
    pub fn translated_heuristics(&self) -> &HashMap<String, String> {
        &self.translated_heuristics
    }

    pub fn clear_translated_heuristics(&mut self) {
        self.translated_heuristics.clear();
    }

    pub fn heuristics_exclude(&self) -> &HashSet<String> {
        &self.heuristics_exclude
    }

    /// 设置启发式排除集合，单词统一转为小写
    pub fn set_heuristics_exclude<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.heuristics_exclude = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
    }

    /// 翻译单个单词
    ///
    /// 查找顺序：精确匹配 -> 将 `’` 规范化为 `'` 后匹配 -> 撇号前缀匹配并保留原后缀
    /// -> 启发式规则（若开启且不在排除集合中）-> 原样返回小写单词。
    /// 结果默认为小写；`filter` 在最后作用于结果。
    ///
    /// ```rust
    /// # use std::collections::HashMap;
    /// # use lolspeak::Tranzlator;
    /// # let mut dictionary = HashMap::new();
    /// # dictionary.insert("hi".to_string(), "oh hai".to_string());
    /// let mut t = Tranzlator::new(dictionary);
    /// let upcase = |w: &str| -> lolspeak::Result<String> { Ok(w.to_uppercase()) };
    /// assert_eq!(t.translate_word("Hi", None).unwrap(), "oh hai");
    /// assert_eq!(t.translate_word("hi", Some(&upcase)).unwrap(), "OH HAI");
    /// ```
    pub fn translate_word(&mut self, word: &str, filter: Option<WordFilter<'_>>) -> Result<String> {
        let word = word.to_lowercase();

        let lol_word = match self.lookup(&word) {
            Some(found) => {
                if self.trace {
                    self.traced_words.insert(word.clone(), found.clone());
                }
                Some(found)
            }
            None => self.heuristic(&word),
        };

        let lol_word = lol_word.unwrap_or(word);
        match filter {
            Some(filter) => filter(&lol_word),
            None => Ok(lol_word),
        }
    }

    /// 翻译字符串中的所有单词
    ///
    /// 标点、空白和其他非单词字符原样保留在原位置。
    pub fn translate_words(&mut self, text: &str, filter: Option<WordFilter<'_>>) -> Result<String> {
        self.translate_words_with(text, filter, keep_gap)
    }

    /// 与 `translate_words` 相同，但非单词片段先经过 `gap` 处理
    pub(crate) fn translate_words_with(
        &mut self,
        text: &str,
        filter: Option<WordFilter<'_>>,
        gap: fn(&str) -> Cow<'_, str>,
    ) -> Result<String> {
        let mut lol_text = String::with_capacity(text.len());
        let mut last = 0;

        for token in WORD_TOKEN.find_iter(text) {
            lol_text.push_str(&gap(&text[last..token.start()]));
            last = token.end();

            let raw = token.as_str();
            let word = raw.trim_end_matches(char::is_whitespace);
            let space = &raw[word.len()..];

            let lol_word = self.translate_word(word, filter)?;
            // 译文为空时丢弃尾随空白
            if !lol_word.is_empty() {
                lol_text.push_str(&lol_word);
                lol_text.push_str(space);
            }
        }

        lol_text.push_str(&gap(&text[last..]));
        Ok(lol_text)
    }

    /// 对词典未命中的单词尝试启发式规则，命中时记入日志
    fn heuristic(&mut self, word: &str) -> Option<String> {
        if !self.try_heuristics || self.heuristics_exclude.contains(word) {
            return None;
        }

        let (rule, result) = apply_heuristics(word)?;
        debug!("启发式规则 {} 命中: {} -> {}", rule.name, word, result);
        self.translated_heuristics
            .insert(word.to_string(), result.clone());
        Some(result)
    }

    /// 词典查找（不含启发式）
    fn lookup(&self, word: &str) -> Option<String> {
        if let Some(found) = self.dictionary.get(word) {
            return Some(found.clone());
        }

        if word.contains('’') {
            if let Some(found) = self.dictionary.get(&word.replace('’', "'")) {
                return Some(found.clone());
            }
        }

        let captures = APOSTROPHE_SUFFIX.captures(word)?;
        let prefix = captures.get(1)?.as_str();
        let suffix = captures.get(2)?.as_str();
        self.dictionary
            .get(prefix)
            .map(|found| format!("{}{}", found, suffix))
    }
}

fn keep_gap(gap: &str) -> Cow<'_, str> {
    Cow::Borrowed(gap)
}
