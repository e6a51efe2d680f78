use std::collections::HashMap;
use std::time::Duration;

/// 翻译统计结构
#[derive(Debug, Default)]
pub struct TranslationStats {
    pub dictionary_load_time: Duration,
    pub file_read_time: Duration,
    pub translation_time: Duration,
    pub file_write_time: Duration,
    pub input_size: usize,
    pub output_size: usize,
    pub dictionary_entries: usize,
    /// 经词典翻译的单词（小写原词 -> 译文）
    pub traced_words: HashMap<String, String>,
    /// 经启发式规则翻译的单词
    pub translated_heuristics: HashMap<String, String>,
}

/// 打印统计报告
pub fn print_performance_stats(stats: &TranslationStats, total_duration: Duration) {
    eprintln!("\n📊 翻译统计报告:");
    eprintln!("═══════════════════════════════════════");

    // 时间分解
    eprintln!("⏱️  时间分解:");
    eprintln!("   词典加载: {}", format_duration(stats.dictionary_load_time));
    eprintln!("   文件读取: {}", format_duration(stats.file_read_time));
    eprintln!("   翻译执行: {}", format_duration(stats.translation_time));
    eprintln!("   文件写入: {}", format_duration(stats.file_write_time));
    eprintln!("   总耗时: {}", format_duration(total_duration));

    // 文件统计
    eprintln!("\n📏 文件统计:");
    eprintln!(
        "   输入大小: {} 字节 ({:.1} KB)",
        stats.input_size,
        stats.input_size as f64 / 1024.0
    );
    eprintln!(
        "   输出大小: {} 字节 ({:.1} KB)",
        stats.output_size,
        stats.output_size as f64 / 1024.0
    );
    if stats.input_size > 0 {
        eprintln!(
            "   大小变化: {:.1}%",
            (stats.output_size as f64 / stats.input_size as f64 - 1.0) * 100.0
        );
    }

    // 翻译统计
    eprintln!("\n🔤 翻译统计:");
    eprintln!("   词典词条: {} 个", stats.dictionary_entries);
    eprintln!("   词典命中: {} 个单词", stats.traced_words.len());
    eprintln!("   启发式命中: {} 个单词", stats.translated_heuristics.len());

    if !stats.traced_words.is_empty() {
        eprintln!("\n📖 词典翻译:");
        for line in format_word_log(&stats.traced_words) {
            eprintln!("   {}", line);
        }
    }

    if !stats.translated_heuristics.is_empty() {
        eprintln!("\n🧪 启发式翻译:");
        for line in format_word_log(&stats.translated_heuristics) {
            eprintln!("   {}", line);
        }
    }
}

/// 按原词排序，格式化为 `原词 -> 译文`
pub fn format_word_log(words: &HashMap<String, String>) -> Vec<String> {
    let mut entries: Vec<_> = words.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(word, lol)| format!("{} -> {}", word, lol))
        .collect()
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
