//! 题库合并服务 - 纯函数，不涉及文件读写
//!
//! 规则：删除已有题库中与本批同一分类（课程）的全部旧题，
//! 其余旧题保持原顺序，新题追加在后；新题 ID 冲突时追加 `_2`、`_3`…

use crate::models::Question;
use std::collections::HashSet;
use tracing::debug;

/// 合并结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// 保留的旧题
    pub kept: usize,
    /// 删除的同分类旧题
    pub removed: usize,
    /// 追加的新题
    pub added: usize,
    /// 因冲突改名的新题
    pub renamed: usize,
}

/// 合并题库
///
/// # 参数
/// - `existing`: 已有题目
/// - `incoming`: 本批新解析的题目
/// - `category`: 本批的分类（课程）
/// - `default_course`: 旧记录缺失 course 时归入的分类
///
/// # 返回
/// 返回 (合并后的题目, 统计)
pub fn merge_questions(
    existing: Vec<Question>,
    incoming: Vec<Question>,
    category: &str,
    default_course: &str,
) -> (Vec<Question>, MergeStats) {
    let mut stats = MergeStats::default();

    let mut merged: Vec<Question> = existing
        .into_iter()
        .filter(|q| {
            let keep = q.category(default_course) != category;
            if !keep {
                stats.removed += 1;
            }
            keep
        })
        .collect();
    stats.kept = merged.len();

    let mut taken: HashSet<String> = merged.iter().map(|q| q.id.clone()).collect();
    for mut question in incoming {
        let unique = unique_id(&question.id, &taken);
        if unique != question.id {
            debug!("ID 冲突: {} -> {}", question.id, unique);
            question.id = unique;
            stats.renamed += 1;
        }
        taken.insert(question.id.clone());
        merged.push(question);
        stats.added += 1;
    }

    (merged, stats)
}

/// 在 `taken` 中找一个不冲突的 ID：原 ID 可用则直接返回，否则从 `_2` 开始递增
pub fn unique_id(id: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(id) {
        return id.to_string();
    }
    (2..)
        .map(|suffix| format!("{}_{}", id, suffix))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| id.to_string())
}
