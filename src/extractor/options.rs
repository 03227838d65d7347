//! 选项块解析（章节格式）
//!
//! 逐行按优先级尝试三种写法，第一个匹配的写法决定该行；
//! 再用若干经验规则排除长得像选项的解析文字。

use super::text::{char_len, normalize_whitespace};
use crate::config::Heuristics;
use crate::models::QuestionOption;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// 优先级从高到低：`A. 内容` / `A、内容` / `A内容`
static OPTION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^([A-Z])[．.\s]+(.+)$").expect("static regex"),
        Regex::new(r"^([A-Z])[、,，]\s*(.+)$").expect("static regex"),
        Regex::new(r"^([A-Z])(.+)$").expect("static regex"),
    ]
});
static RE_OPTION_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"选项[A-Z]").expect("static regex"));
static RE_JUDGMENT_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(都|均|全部)(正确|错误)").expect("static regex"));

/// 选项被排除的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    StartsWithOptionWord,
    NestedExplanation,
    TooLong,
    ReferencesOption,
    LongJudgment,
}

/// 判断一段选项文字是否其实是解析内容
pub fn reject_reason(text: &str, heuristics: &Heuristics) -> Option<Rejection> {
    let len = char_len(text);
    if text.starts_with("选项") {
        Some(Rejection::StartsWithOptionWord)
    } else if text.contains("**解析") || text.contains("解析：**") {
        Some(Rejection::NestedExplanation)
    } else if len > heuristics.max_option_len {
        Some(Rejection::TooLong)
    } else if RE_OPTION_REFERENCE.is_match(text) {
        Some(Rejection::ReferencesOption)
    } else if RE_JUDGMENT_CLAUSE.is_match(text) && len > heuristics.judgment_clause_len {
        Some(Rejection::LongJudgment)
    } else {
        None
    }
}

/// 匹配单行，返回 (选项字母, 原始文字)
fn match_option_line(line: &str) -> Option<(&str, &str)> {
    OPTION_PATTERNS.iter().find_map(|re| {
        re.captures(line).and_then(|caps| {
            let key = caps.get(1)?.as_str();
            let text = caps.get(2)?.as_str();
            Some((key, text))
        })
    })
}

/// 从选项区域解析选项
///
/// # 参数
/// - `block`: 题目之后、解析标记或下一题之前的文字
/// - `heuristics`: 经验阈值
///
/// # 返回
/// 按字母排序、字母不重复的选项列表（可能少于两个，由调用方决定是否丢弃）
pub fn parse_option_block(block: &str, heuristics: &Heuristics) -> Vec<QuestionOption> {
    let mut options: Vec<QuestionOption> = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some((key, raw_text)) = match_option_line(line) else {
            continue;
        };
        if seen_keys.contains(key) {
            continue;
        }

        let text = raw_text.trim();
        if let Some(reason) = reject_reason(text, heuristics) {
            debug!("排除疑似解析的选项行 ({:?}): {}", reason, line);
            continue;
        }

        let text = normalize_whitespace(text);
        if text.is_empty() {
            continue;
        }

        seen_keys.insert(key.to_string());
        options.push(QuestionOption::new(key, text));

        if options.len() >= heuristics.max_options {
            break;
        }
    }

    options.sort_by(|a, b| a.key.cmp(&b.key));
    options
}
