//! 解析文字提取（章节格式）

use super::text::normalize_whitespace;
use regex::Regex;
use std::sync::LazyLock;

/// 解析标记，全角冒号为主
pub const EXPLANATION_MARKERS: [&str; 2] = ["**解析：**", "**解析:**"];

static RE_NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[、.]").expect("static regex"));

/// 解析标记在 `block` 中的位置，返回 (起点, 标记之后的偏移)
pub fn find_marker(block: &str) -> Option<(usize, usize)> {
    EXPLANATION_MARKERS
        .iter()
        .filter_map(|marker| block.find(marker).map(|pos| (pos, pos + marker.len())))
        .min_by_key(|(pos, _)| *pos)
}

/// 解析之后的行是否开启了新内容（新题号或新的加粗标记）
fn starts_new_item(line: &str) -> bool {
    RE_NUMBERED_ITEM.is_match(line) || line.starts_with("**") || line.starts_with("解析")
}

/// 提取解析：标记之后的首个非空行，加上紧随其后的连续非空行
///
/// 遇到空行、新题号或新标记即停止；结果压缩空白。没有标记时返回空串。
pub fn extract_explanation(block: &str) -> String {
    let Some((_, body_start)) = find_marker(block) else {
        return String::new();
    };

    let mut lines = block[body_start..].lines();
    let mut collected: Vec<&str> = Vec::new();

    // 标记后可能紧跟换行，跳到第一行有内容的文字
    let first = lines.by_ref().map(str::trim).find(|l| !l.is_empty());
    let Some(first) = first else {
        return String::new();
    };
    collected.push(first);

    for line in lines {
        let line = line.trim();
        if line.is_empty() || starts_new_item(line) {
            break;
        }
        collected.push(line);
    }

    normalize_whitespace(&collected.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let block = "A. 甲\nB. 乙\n**解析：** It operates at layer 3.\n";
        assert_eq!(extract_explanation(block), "It operates at layer 3.");
    }

    #[test]
    fn test_continuation_lines_until_blank() {
        let block = "**解析：** 第一行\n第二行  继续\n\n不属于解析\n";
        assert_eq!(extract_explanation(block), "第一行 第二行 继续");
    }

    #[test]
    fn test_stops_at_numbered_item_and_marker() {
        let block = "**解析：**数据采集\n6. 下一题？（A）\n";
        assert_eq!(extract_explanation(block), "数据采集");

        let block = "**解析：**数据采集\n**知识点：** 采集\n";
        assert_eq!(extract_explanation(block), "数据采集");
    }

    #[test]
    fn test_marker_on_own_line() {
        let block = "**解析:**\n\n  正文在下一行\n";
        assert_eq!(extract_explanation(block), "正文在下一行");
    }

    #[test]
    fn test_missing_marker() {
        assert_eq!(extract_explanation("A. 甲\nB. 乙\n"), "");
        assert_eq!(find_marker("无解析"), None);
    }
}
