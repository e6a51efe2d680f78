/// lolspeak 常量配置
///
/// 该文件定义了输入识别、输出命名和词典文件相关的常量，方便统一管理和维护

/// 输出配置
pub mod output_config {
    /// 自动生成输出文件名时追加的后缀：input_lol.txt
    pub const DEFAULT_SUFFIX: &str = "lol";

    /// 表示写到标准输出的路径
    pub const STDOUT_MARKER: &str = "-";
}

/// 输入配置
pub mod input_config {
    /// 按XML处理的文件扩展名
    pub const XML_EXTENSIONS: &[&str] = &["xml", "xhtml", "svg", "rss", "atom"];

    /// 按纯文本处理的文件扩展名
    pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];
}

/// 词典配置
pub mod dictionary_config {
    /// 内置词典的文件名
    pub const BUNDLED_DICTIONARY_NAME: &str = "tranzlator.yml";

    /// 按JSON解析的词典扩展名，其余扩展名按YAML解析
    pub const JSON_EXTENSION: &str = "json";
}

/// 错误消息常量
pub mod error_messages {
    pub const FILE_READ_ERROR: &str = "无法读取输入文件";

    pub const FILE_WRITE_ERROR: &str = "无法写入输出文件";

    pub const TRANSLATION_ERROR: &str = "翻译失败";
}

/// 判断扩展名是否按XML处理（不区分大小写）
pub fn is_xml_extension(ext: &str) -> bool {
    input_config::XML_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

/// 判断扩展名是否为已知的输入类型
pub fn is_known_extension(ext: &str) -> bool {
    is_xml_extension(ext)
        || input_config::TEXT_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
}

/// 判断扩展名是否为JSON词典
pub fn is_json_extension(ext: &str) -> bool {
    ext.eq_ignore_ascii_case(dictionary_config::JSON_EXTENSION)
}
