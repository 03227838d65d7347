//! 题型推断与 ID 生成
//!
//! 先按文档结构（"一、单选题" / "二、多选题" 小节位置）推断，
//! 再用答案个数复核；两者冲突时以答案个数为准。

use crate::models::QuestionType;
use tracing::debug;

/// 文档中单选/多选小节标记的位置（字节偏移）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionMarkers {
    pub single: Option<usize>,
    pub multiple: Option<usize>,
}

impl SectionMarkers {
    /// 查找小节标记：优先中文序号标题，其次"单选题"/"多选题"字样
    pub fn locate(content: &str) -> Self {
        Self {
            single: content.find("一、").or_else(|| content.find("单选题")),
            multiple: content.find("二、").or_else(|| content.find("多选题")),
        }
    }

    /// 按题目位置推断题型；没有任何标记时返回 `None`
    pub fn structural_type(&self, position: usize) -> Option<QuestionType> {
        match (self.single, self.multiple) {
            (Some(_), Some(multiple)) => Some(if position < multiple {
                QuestionType::Single
            } else {
                QuestionType::Multiple
            }),
            (Some(_), None) => Some(QuestionType::Single),
            (None, Some(_)) => Some(QuestionType::Multiple),
            (None, None) => None,
        }
    }
}

/// 推断题型
///
/// # 参数
/// - `has_options`: 是否有选项（无选项即填空题）
/// - `markers`: 文档小节标记
/// - `position`: 题目在文档中的偏移
/// - `answer_count`: 答案个数
pub fn infer_type(
    has_options: bool,
    markers: &SectionMarkers,
    position: usize,
    answer_count: usize,
) -> QuestionType {
    if !has_options {
        return QuestionType::Fill;
    }

    let by_cardinality = QuestionType::from_cardinality(answer_count);
    match markers.structural_type(position) {
        Some(structural) if structural != by_cardinality => {
            debug!(
                "题型冲突: 小节位置判断为 {}，答案个数 {} 判断为 {}，以答案个数为准",
                structural.label(),
                answer_count,
                by_cardinality.label()
            );
            by_cardinality
        }
        Some(structural) => structural,
        None => by_cardinality,
    }
}

/// 生成 ID：`{命名空间}_{单元标识}_{题号}_{题型}`
pub fn build_id(namespace: &str, unit_id: &str, number: &str, question_type: QuestionType) -> String {
    format!("{}_{}_{}_{}", namespace, unit_id, number, question_type)
}
