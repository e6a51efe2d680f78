//! XML处理模块
//!
//! 提供XML解析、文本节点翻译和序列化功能。
//!
//! 解析结果是一棵只区分元素、文本和其他标记（注释、声明、CDATA、处理指令）的通用树。
//! 标签与属性按源文本原样保存，序列化时逐字节还原，翻译只改写文本节点。

// 标准库导入
use std::borrow::Cow;
use std::fmt;

// 第三方crate导入
use once_cell::sync::Lazy;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::debug;

// 本地模块导入
use crate::error::Result;
use crate::lolspeak_error;
use crate::translator::{Tranzlator, WordFilter};

/// 预定义实体与数字字符引用
static CHAR_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#x([0-9a-fA-F]+)|(lt|gt|amp|quot|apos));").expect("字符引用正则无效")
});

/// 命名实体引用
static NAMED_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&([A-Za-z_][\w.-]*);").expect("实体引用正则无效"));

const PREDEFINED_ENTITIES: &[&str] = &["lt", "gt", "amp", "quot", "apos"];

/// 树节点
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    /// 注释、XML声明、CDATA、处理指令、DOCTYPE，原样保存
    Markup(String),
}

impl Node {
    fn write_xml(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_xml(out),
            Node::Text(text) => out.push_str(text.raw()),
            Node::Markup(raw) => out.push_str(raw),
        }
    }
}

/// 文本节点，保存转义后的原始文本
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    raw: String,
}

impl Text {
    /// 由已转义的XML文本创建
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// 由普通文本创建，特殊字符会被转义
    pub fn from_plain(value: &str) -> Self {
        Self::new(encode_text(value))
    }

    /// 转义形式
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 解码后的文本（未知实体引用保持原样）
    pub fn value(&self) -> String {
        decode_text(&self.raw).into_owned()
    }

    fn set_raw(&mut self, raw: String) {
        self.raw = raw;
    }
}

/// 元素节点
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    /// 源文本中的开始标签，含尖括号与全部属性
    start_tag: String,
    /// 自闭合元素为 `None`
    end_tag: Option<String>,
    children: Vec<Node>,
}

impl Element {
    fn open(name: String, start_tag: String) -> Self {
        Self {
            name,
            start_tag,
            end_tag: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_tag(&self) -> &str {
        &self.start_tag
    }

    pub fn is_empty_element(&self) -> bool {
        self.end_tag.is_none()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// 直接子文本节点
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(|node| match node {
            Node::Text(text) => Some(text),
            _ => None,
        })
    }

    /// 直接子元素
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// 所有后代文本解码后的拼接
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        for node in &self.children {
            match node {
                Node::Text(text) => content.push_str(&text.value()),
                Node::Element(element) => content.push_str(&element.text_content()),
                Node::Markup(_) => {}
            }
        }
        content
    }

    /// 读取属性值（已解码）
    pub fn attribute(&self, name: &str) -> Result<Option<String>> {
        let inner = self.start_tag.trim_start_matches('<');
        let inner = inner
            .strip_suffix("/>")
            .or_else(|| inner.strip_suffix('>'))
            .unwrap_or(inner);

        let start = BytesStart::from_content(inner, self.name.len());
        let attribute = start
            .try_get_attribute(name)
            .map_err(quick_xml::Error::from)?;

        match attribute {
            Some(attribute) => {
                let value = attribute
                    .unescape_value()
                    .map_err(quick_xml::Error::from)?;
                Ok(Some(value.into_owned()))
            }
            None => Ok(None),
        }
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str(&self.start_tag);
        for child in &self.children {
            child.write_xml(out);
        }
        if let Some(end_tag) = &self.end_tag {
            out.push_str(end_tag);
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_xml(&mut out);
        f.write_str(&out)
    }
}

/// 解析后的XML文档
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    children: Vec<Node>,
}

impl Document {
    /// 解析XML字符串
    ///
    /// 标签不匹配、元素未闭合或语法错误均返回 `LolspeakError::Parse`。
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut open: Vec<Element> = Vec::new();
        let mut top: Vec<Node> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                lolspeak_error!(parse, format!("位置 {}: {}", reader.buffer_position(), e))
            })?;

            let node = match event {
                Event::Start(start) => {
                    let name = utf8(start.name().as_ref());
                    let tag = format!("<{}>", utf8(&start));
                    open.push(Element::open(name, tag));
                    continue;
                }
                Event::End(end) => {
                    let name = utf8(end.name().as_ref());
                    let mut element = open.pop().ok_or_else(|| {
                        lolspeak_error!(parse, format!("多余的结束标签 </{}>", name))
                    })?;
                    if element.name != name {
                        return Err(lolspeak_error!(
                            parse,
                            format!("结束标签 </{}> 与 <{}> 不匹配", name, element.name)
                        ));
                    }
                    element.end_tag = Some(format!("</{}>", name));
                    Node::Element(element)
                }
                Event::Empty(start) => {
                    let name = utf8(start.name().as_ref());
                    Node::Element(Element::open(name, format!("<{}/>", utf8(&start))))
                }
                Event::Text(text) => Node::Text(Text::new(utf8(&text))),
                Event::CData(cdata) => Node::Markup(format!("<![CDATA[{}]]>", utf8(&cdata))),
                Event::Comment(comment) => Node::Markup(format!("<!--{}-->", utf8(&comment))),
                Event::Decl(decl) => Node::Markup(format!("<?{}?>", utf8(&decl))),
                Event::PI(pi) => Node::Markup(format!("<?{}?>", utf8(&pi))),
                Event::DocType(doctype) => {
                    let content = utf8(&doctype);
                    if content.starts_with(char::is_whitespace) {
                        Node::Markup(format!("<!DOCTYPE{}>", content))
                    } else {
                        Node::Markup(format!("<!DOCTYPE {}>", content))
                    }
                }
                Event::Eof => break,
            };

            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => top.push(node),
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(lolspeak_error!(
                parse,
                format!("元素 <{}> 未闭合", unclosed.name)
            ));
        }

        Ok(Self { children: top })
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// 根元素
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// 序列化为XML字符串
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            node.write_xml(&mut out);
        }
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

fn utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// 解码预定义实体与数字字符引用，未知实体引用保持原样
pub fn decode_text(raw: &str) -> Cow<'_, str> {
    CHAR_REFERENCE.replace_all(raw, |caps: &regex::Captures<'_>| {
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else {
            match caps.get(3).map(|m| m.as_str()) {
                Some("lt") => Some('<'),
                Some("gt") => Some('>'),
                Some("amp") => Some('&'),
                Some("quot") => Some('"'),
                Some("apos") => Some('\''),
                _ => None,
            }
        };

        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

/// 转义 `<`、`>`、`&`
pub fn encode_text(value: &str) -> Cow<'_, str> {
    partial_escape(value)
}

/// 将转义形式的原始文本切分为普通片段与未知实体引用（如 `&nbsp;`）
///
/// 预定义实体和字符引用留在普通片段中，由调用方解码。
fn split_unknown_entities(raw: &str) -> Vec<(&str, bool)> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in NAMED_ENTITY.captures_iter(raw) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if PREDEFINED_ENTITIES.contains(&name.as_str()) {
            continue;
        }
        segments.push((&raw[last..whole.start()], false));
        segments.push((whole.as_str(), true));
        last = whole.end();
    }

    segments.push((&raw[last..], false));
    segments
}

/// 树文本改写
impl Tranzlator {
    /// 翻译元素的直接子文本节点（不含子元素），原地修改
    ///
    /// 先在转义形式上切出未知实体引用并原样保留，其余片段解码后翻译；
    /// 每个译文先经过 `filter`，再转义为合法的XML文本。
    pub fn translate_element(
        &mut self,
        element: &mut Element,
        filter: Option<WordFilter<'_>>,
    ) -> Result<()> {
        let filter_then_encode = |word: &str| -> Result<String> {
            let word = match filter {
                Some(filter) => filter(word)?,
                None => word.to_string(),
            };
            Ok(encode_text(&word).into_owned())
        };

        for node in element.children.iter_mut() {
            if let Node::Text(text) = node {
                let mut translated = String::with_capacity(text.raw().len());
                for (segment, is_entity) in split_unknown_entities(text.raw()) {
                    if is_entity {
                        translated.push_str(segment);
                    } else {
                        translated.push_str(&self.translate_words_with(
                            &decode_text(segment),
                            Some(&filter_then_encode),
                            encode_text,
                        )?);
                    }
                }
                text.set_raw(translated);
            }
        }
        Ok(())
    }

    /// 翻译元素自身及所有后代元素的文本，深度优先
    pub fn translate_element_recursive(
        &mut self,
        element: &mut Element,
        filter: Option<WordFilter<'_>>,
    ) -> Result<()> {
        self.translate_element(element, filter)?;
        for child in element.elements_mut() {
            self.translate_element_recursive(child, filter)?;
        }
        Ok(())
    }

    /// 翻译文档中所有元素的文本；元素之外的顶层文本不做改动
    pub fn translate_document(
        &mut self,
        document: &mut Document,
        filter: Option<WordFilter<'_>>,
    ) -> Result<()> {
        for node in document.children.iter_mut() {
            if let Node::Element(element) = node {
                self.translate_element_recursive(element, filter)?;
            }
        }
        Ok(())
    }

    /// 翻译XML字符串中的文本，返回新的XML字符串
    pub fn translate_xml_string(
        &mut self,
        xml: &str,
        filter: Option<WordFilter<'_>>,
    ) -> Result<String> {
        let mut document = Document::parse(xml)?;
        self.translate_document(&mut document, filter)?;
        let translated = document.to_xml();
        debug!("XML翻译完成: {} -> {} 字节", xml.len(), translated.len());
        Ok(translated)
    }
}
