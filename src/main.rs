use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

use lolspeak::config::{Cli, Command, DictArgs, TranslateArgs, TranzlatorOptions};
use lolspeak::constants::error_messages;
use lolspeak::dictionary::{self, Dictionary, ExportFormat};
use lolspeak::stats::{format_duration, print_performance_stats, TranslationStats};
use lolspeak::utils::{
    generate_output_path, init_logging, is_stdout, is_xml_input, validate_input_file,
    write_output,
};
use lolspeak::{Tranzlator, WordFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    let total_start = Instant::now();
    let outcome = match &cli.command {
        Command::Translate(args) => translate_file(args, cli.quiet),
        Command::SortDict(args) => export_dictionary(args, ExportFormat::SortedYaml),
        Command::DictXml(args) => export_dictionary(args, ExportFormat::AppleDictionary),
    };

    match outcome {
        Ok(()) => {
            if !cli.quiet {
                info!("✅ 完成！总耗时: {}", format_duration(total_start.elapsed()));
            }
            Ok(())
        }
        Err(e) => {
            error!("❌ 执行失败: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// 翻译文件核心函数
fn translate_file(args: &TranslateArgs, quiet: bool) -> Result<()> {
    let total_start = Instant::now();

    // 验证输入文件
    validate_input_file(&args.input)?;

    let output_path = generate_output_path(&args.input, &args.output);
    let as_xml = is_xml_input(&args.input, args.xml);

    if !quiet {
        info!("🚀 启动LOLspeak翻译");
        info!("📂 输入文件: {}", args.input.display());
        info!("📄 输出文件: {}", output_path.display());
        info!("🔖 输入格式: {}", if as_xml { "XML" } else { "纯文本" });
    }

    // 创建翻译器
    let load_start = Instant::now();
    let mut tranzlator = Tranzlator::new(load_dictionary(args.dictionary.as_deref())?);
    let options = TranzlatorOptions::from(args);
    options.apply(&mut tranzlator);
    let dictionary_load_time = load_start.elapsed();

    // 读取文件
    let read_start = Instant::now();
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("{}: {}", error_messages::FILE_READ_ERROR, args.input.display()))?;
    let file_read_time = read_start.elapsed();

    // 执行翻译
    let translate_start = Instant::now();
    let upcase = |word: &str| -> lolspeak::Result<String> { Ok(word.to_uppercase()) };
    let filter: Option<WordFilter<'_>> = if options.is_upcase() {
        Some(&upcase)
    } else {
        None
    };
    let translated = if as_xml {
        tranzlator.translate_xml_string(&content, filter)
    } else {
        tranzlator.translate_words(&content, filter)
    }
    .context(error_messages::TRANSLATION_ERROR)?;
    let translation_time = translate_start.elapsed();

    // 写入文件
    let write_start = Instant::now();
    write_output(&output_path, &translated)?;
    let file_write_time = write_start.elapsed();

    if args.stats {
        let stats = TranslationStats {
            dictionary_load_time,
            file_read_time,
            translation_time,
            file_write_time,
            input_size: content.len(),
            output_size: translated.len(),
            dictionary_entries: tranzlator.dictionary().len(),
            traced_words: tranzlator.traced_words().clone(),
            translated_heuristics: tranzlator.translated_heuristics().clone(),
        };
        print_performance_stats(&stats, total_start.elapsed());
    }

    Ok(())
}

/// 导出词典到文件或标准输出
fn export_dictionary(args: &DictArgs, format: ExportFormat) -> Result<()> {
    let dictionary = load_dictionary(args.dictionary.as_deref())?;

    match args.output.as_deref() {
        Some(path) if !is_stdout(path) => dictionary::export_to_file(&dictionary, format, path)?,
        _ => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            dictionary::export(&dictionary, format, &mut handle)
                .and_then(|()| handle.flush())
                .context(error_messages::FILE_WRITE_ERROR)?;
            info!("📖 已导出 {} 个词条", dictionary.len());
        }
    }
    Ok(())
}

/// 加载指定词典，未指定时使用内置词典
fn load_dictionary(path: Option<&Path>) -> Result<Dictionary> {
    let dictionary = match path {
        Some(path) => dictionary::load_dictionary(path),
        None => dictionary::bundled_dictionary(),
    };
    dictionary.context("加载词典失败")
}
