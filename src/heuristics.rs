//! 启发式规则模块
//!
//! 对词典中不存在的单词按固定顺序尝试LOLspeak变形规则，第一个命中的规则生效。

// 第三方crate导入
use once_cell::sync::Lazy;
use regex::Regex;

/// 以 `s` 结尾且只包含ASCII字母、数字、下划线的单词
static PLURAL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_]+s$").expect("复数规则正则无效"));

/// 单条启发式规则：名称 + 变形函数（不匹配时返回 `None`）
#[derive(Clone, Copy)]
pub struct HeuristicRule {
    /// 规则名称，用于日志
    pub name: &'static str,
    transform: fn(&str) -> Option<String>,
}

impl HeuristicRule {
    /// 对单词尝试本规则
    pub fn apply(&self, word: &str) -> Option<String> {
        (self.transform)(word)
    }
}

impl std::fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicRule").field("name", &self.name).finish()
    }
}

/// 按优先级排列的规则表
pub static RULES: &[HeuristicRule] = &[
    HeuristicRule { name: "tion", transform: tion_to_shun },
    HeuristicRule { name: "ed", transform: ed_to_d },
    HeuristicRule { name: "ing", transform: ing_to_in },
    HeuristicRule { name: "ss", transform: ss_to_s },
    HeuristicRule { name: "er", transform: er_to_r },
    HeuristicRule { name: "plural", transform: plural_s_to_z },
];

/// 依次尝试所有规则，返回第一个命中的规则和变形结果
pub fn apply_heuristics(word: &str) -> Option<(&'static HeuristicRule, String)> {
    RULES
        .iter()
        .find_map(|rule| rule.apply(word).map(|result| (rule, result)))
}

fn tion_to_shun(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("tions") {
        return Some(format!("{}shuns", stem));
    }
    word.strip_suffix("tion").map(|stem| format!("{}shun", stem))
}

// looked -> lookd
fn ed_to_d(word: &str) -> Option<String> {
    word.strip_suffix("ed").map(|stem| format!("{}d", stem))
}

fn ing_to_in(word: &str) -> Option<String> {
    word.strip_suffix("ing").map(|stem| format!("{}in", stem))
}

fn ss_to_s(word: &str) -> Option<String> {
    word.strip_suffix("ss").map(|stem| format!("{}s", stem))
}

fn er_to_r(word: &str) -> Option<String> {
    word.strip_suffix("er").map(|stem| format!("{}r", stem))
}

fn plural_s_to_z(word: &str) -> Option<String> {
    if !PLURAL_WORD.is_match(word) {
        return None;
    }
    word.strip_suffix('s').map(|stem| format!("{}z", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heuristic(word: &str) -> Option<String> {
        apply_heuristics(word).map(|(_, result)| result)
    }

    #[test]
    fn test_tion_rules() {
        assert_eq!(heuristic("invention").as_deref(), Some("invenshun"));
        assert_eq!(heuristic("inventions").as_deref(), Some("invenshuns"));
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(heuristic("looked").as_deref(), Some("lookd"));
        assert_eq!(heuristic("running").as_deref(), Some("runnin"));
        assert_eq!(heuristic("kiss").as_deref(), Some("kis"));
        assert_eq!(heuristic("mother").as_deref(), Some("mothr"));
        assert_eq!(heuristic("cats").as_deref(), Some("catz"));
    }

    #[test]
    fn test_first_rule_wins() {
        // "ss" 先于复数规则
        let (rule, result) = apply_heuristics("boss").unwrap();
        assert_eq!(rule.name, "ss");
        assert_eq!(result, "bos");

        // "tion" 先于 "ss"/"er"/复数
        let (rule, _) = apply_heuristics("stations").unwrap();
        assert_eq!(rule.name, "tion");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(heuristic("cat"), None);
        assert_eq!(heuristic("foo's"), None);
        assert_eq!(heuristic("s"), None);
        assert_eq!(heuristic("café"), None);
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["tion", "ed", "ing", "ss", "er", "plural"]);
    }
}
