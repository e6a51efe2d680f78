//! 统一错误处理模块
//!
//! 提供lolspeak库的统一错误类型定义和处理机制

// 第三方crate导入
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// lolspeak 统一错误类型
///
/// 单词本身永远不会"无法翻译"：查不到的词原样（小写）输出，不属于错误路径。
#[derive(Debug, Error)]
pub enum LolspeakError {
    /// XML解析相关错误
    #[error("XML解析失败: {details}")]
    Parse {
        /// 具体错误信息
        details: String,
    },

    /// 词典加载错误（文件缺失或反序列化失败）
    #[error("词典加载失败 [{path}]: {reason}")]
    Load {
        /// 词典文件路径
        path: String,
        /// 失败原因
        reason: String,
    },

    /// 文件操作相关错误
    #[error("文件{operation}操作失败 [{path}]: {source}")]
    FileOperation {
        /// 文件路径
        path: String,
        /// 操作类型（读取、写入等）
        operation: String,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// 过滤器回调返回的错误，原样向上传递
    #[error("过滤器执行失败: {0}")]
    Filter(#[from] AnyhowError),
}

/// lolspeak 结果类型别名
pub type Result<T> = std::result::Result<T, LolspeakError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! lolspeak_error {
    (parse, $details:expr) => {
        $crate::error::LolspeakError::Parse {
            details: $details.to_string(),
        }
    };
    (load, $path:expr, $reason:expr) => {
        $crate::error::LolspeakError::Load {
            path: $path.to_string(),
            reason: $reason.to_string(),
        }
    };
    (file_op, $path:expr, $op:expr, $source:expr) => {
        $crate::error::LolspeakError::FileOperation {
            path: $path.to_string(),
            operation: $op.to_string(),
            source: $source,
        }
    };
}

/// 从quick-xml错误转换为解析错误
impl From<quick_xml::Error> for LolspeakError {
    fn from(error: quick_xml::Error) -> Self {
        LolspeakError::Parse {
            details: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LolspeakError::Load {
            path: "tranzlator.yml".to_string(),
            reason: "文件不存在".to_string(),
        };

        assert_eq!(
            format!("{}", err),
            "词典加载失败 [tranzlator.yml]: 文件不存在"
        );
    }

    #[test]
    fn test_error_macro() {
        let err = lolspeak_error!(parse, "标签不匹配");
        match err {
            LolspeakError::Parse { details } => {
                assert_eq!(details, "标签不匹配");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_file_op_macro_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = lolspeak_error!(file_op, "out.yml", "写入", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(format!("{}", err), "文件写入操作失败 [out.yml]: missing");
    }

    #[test]
    fn test_anyhow_conversion() {
        let anyhow_err = anyhow::anyhow!("Test anyhow error");
        let lol_err: LolspeakError = anyhow_err.into();

        match lol_err {
            LolspeakError::Filter(inner) => {
                assert_eq!(inner.to_string(), "Test anyhow error");
            }
            _ => panic!("Wrong error type"),
        }
    }
}
