use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::{
    error_messages, is_known_extension, is_xml_extension, output_config,
};

/// 初始化日志系统
///
/// 静默模式下仍输出错误日志。
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = log_level(verbose, quiet);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 根据命令行开关选择日志级别，`quiet` 优先
pub fn log_level(verbose: bool, quiet: bool) -> tracing::Level {
    if quiet {
        tracing::Level::ERROR
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

/// 验证输入文件
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("输入文件不存在: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("输入路径不是文件: {}", path.display());
    }

    if let Some(ext) = path.extension() {
        if !is_known_extension(&ext.to_string_lossy()) {
            warn!("⚠️  未知的文件扩展名，按纯文本处理: {}", ext.to_string_lossy());
        }
    }

    Ok(())
}

/// 判断输入是否按XML处理
pub fn is_xml_input(path: &Path, force_xml: bool) -> bool {
    force_xml
        || path
            .extension()
            .map(|ext| is_xml_extension(&ext.to_string_lossy()))
            .unwrap_or(false)
}

/// 生成输出文件路径
pub fn generate_output_path(input: &Path, output: &Option<PathBuf>) -> PathBuf {
    if let Some(output_path) = output {
        return output_path.clone();
    }

    // 自动生成输出路径: input_lol.txt
    let stem = input.file_stem().unwrap_or_default();
    let output_name = match input.extension() {
        Some(extension) => format!(
            "{}_{}.{}",
            stem.to_string_lossy(),
            output_config::DEFAULT_SUFFIX,
            extension.to_string_lossy()
        ),
        None => format!("{}_{}", stem.to_string_lossy(), output_config::DEFAULT_SUFFIX),
    };

    if let Some(parent) = input.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// 输出路径是否表示标准输出
pub fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == output_config::STDOUT_MARKER
}

/// 写出结果到文件或标准输出
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if is_stdout(path) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context(error_messages::FILE_WRITE_ERROR)?;
        return handle.flush().context(error_messages::FILE_WRITE_ERROR);
    }

    std::fs::write(path, content)
        .with_context(|| format!("{}: {}", error_messages::FILE_WRITE_ERROR, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, false), tracing::Level::INFO);
        assert_eq!(log_level(true, false), tracing::Level::DEBUG);
        assert_eq!(log_level(false, true), tracing::Level::ERROR);
        assert_eq!(log_level(true, true), tracing::Level::ERROR);
    }

    #[test]
    fn test_generate_output_path() {
        assert_eq!(
            generate_output_path(Path::new("/tmp/story.txt"), &None),
            PathBuf::from("/tmp/story_lol.txt")
        );
        assert_eq!(
            generate_output_path(Path::new("README"), &None),
            PathBuf::from("README_lol")
        );
        let explicit = Some(PathBuf::from("out.xml"));
        assert_eq!(
            generate_output_path(Path::new("in.xml"), &explicit),
            PathBuf::from("out.xml")
        );
    }

    #[test]
    fn test_is_xml_input() {
        assert!(is_xml_input(Path::new("page.xml"), false));
        assert!(is_xml_input(Path::new("page.XHTML"), false));
        assert!(!is_xml_input(Path::new("story.txt"), false));
        assert!(is_xml_input(Path::new("story.txt"), true));
    }

    #[test]
    fn test_is_stdout() {
        assert!(is_stdout(Path::new("-")));
        assert!(!is_stdout(Path::new("out.txt")));
    }

    #[test]
    fn test_validate_input_file() {
        assert!(validate_input_file(Path::new("/nonexistent/input.txt")).is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_input_file(dir.path()).is_err());

        let file = dir.path().join("story.txt");
        std::fs::write(&file, "hi cat").unwrap();
        assert!(validate_input_file(&file).is_ok());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(&path, "oh hai").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "oh hai");
    }
}
