//! 文本工具：空白归一化、答案切分、按字符计的窗口偏移

use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static RE_ANSWER_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[，,；;/\s]+").expect("static regex"));

/// 把连续空白压缩成一个空格，并去掉首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// 切分答案文本：中西文逗号、分号、斜杠、空白的任意组合都算分隔符
pub fn split_answer_tokens(payload: &str) -> Vec<String> {
    RE_ANSWER_SEPARATOR
        .split(payload)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 从字节偏移 `pos` 向前退 `n` 个字符，返回新的字节偏移（不越过 0）
pub fn back_chars(text: &str, pos: usize, n: usize) -> usize {
    if n == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// 从字节偏移 `pos` 向后进 `n` 个字符，返回新的字节偏移（不越过末尾）
pub fn forward_chars(text: &str, pos: usize, n: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// 字符数（不是字节数）
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// 前 `n` 个字符组成的切片
pub fn prefix_chars(text: &str, n: usize) -> &str {
    &text[..forward_chars(text, 0, n)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  数据\n  采集 \t 方法 "), "数据 采集 方法");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_split_answer_tokens() {
        assert_eq!(split_answer_tokens(" A, B"), vec!["A", "B"]);
        assert_eq!(split_answer_tokens("A，C；D/E  F"), vec!["A", "C", "D", "E", "F"]);
        assert_eq!(split_answer_tokens("路由器"), vec!["路由器"]);
        assert!(split_answer_tokens(" ,， ").is_empty());
    }

    #[test]
    fn test_char_windows() {
        let text = "一二三abc";
        // "三" 从字节 6 开始
        assert_eq!(back_chars(text, 9, 1), 6);
        assert_eq!(back_chars(text, 9, 2), 3);
        assert_eq!(back_chars(text, 9, 100), 0);
        assert_eq!(back_chars(text, 9, 0), 9);
        assert_eq!(forward_chars(text, 0, 2), 6);
        assert_eq!(forward_chars(text, 6, 100), text.len());
        assert_eq!(prefix_chars(text, 4), "一二三a");
        assert_eq!(char_len(text), 6);
    }
}
