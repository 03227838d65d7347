//! 章节格式解析
//!
//! ```text
//! **第1章：大数据概述**
//! 一、单选题
//! 5. 负责路由的是哪一层？（B）
//! A. 物理层
//! B. 网络层
//! **解析：** 网络层负责路由选择。
//! ```
//!
//! 题目边界分两步识别：先用严格模式匹配"题号 + 题干 + 结束符 + 括号答案"，
//! 题干可疑时再在局部窗口内重新定位题号并截取题干。

use super::classify::{build_id, infer_type, SectionMarkers};
use super::explanation::{extract_explanation, find_marker};
use super::options::parse_option_block;
use super::text::{back_chars, char_len, forward_chars, normalize_whitespace, prefix_chars};
use super::{DocumentCtx, QuestionExtractor};
use crate::config::Heuristics;
use crate::models::Question;
use regex::Regex;
use serde_json::Map;
use std::sync::LazyLock;
use tracing::debug;

static RE_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)[、.]\s*([^：:？?\n]+?)[：:？?]\s*[（(]([A-Z]+)[）)]").expect("static regex")
});
static RE_CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*第(\d+)章[：:]\s*([^*\n]+)\*\*|第(\d+)章[：:]\s*([^\n]+)").expect("static regex")
});

const PROMPT_TERMINATORS: [char; 4] = ['？', '?', '：', ':'];

/// 章节信息：ID 中使用的章节号与单元名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterInfo {
    pub number: String,
    pub unit: String,
}

impl ChapterInfo {
    /// 从 `第N章：标题` 提取；没有章节标题时章节号为 "0"，单元名用文件名
    pub fn detect(content: &str, file_stem: &str) -> Self {
        RE_CHAPTER_HEADING
            .captures(content)
            .map(|caps| {
                let number = caps
                    .get(1)
                    .or_else(|| caps.get(3))
                    .map_or("0", |m| m.as_str())
                    .to_string();
                let title = caps
                    .get(2)
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str().trim());
                let unit = format!("第{}章 {}", number, title);
                Self { number, unit }
            })
            .unwrap_or_else(|| Self {
                number: "0".to_string(),
                unit: file_stem.to_string(),
            })
    }
}

/// 严格模式识别出的题目边界
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// 匹配起点（题号处）
    pub start: usize,
    /// 匹配终点（答案括号之后）
    pub end: usize,
    /// 文档中书写的题号
    pub number: String,
    /// 题干
    pub prompt: String,
    /// 括号中的答案字母
    pub answer: Vec<String>,
}

/// 第一步：严格模式扫描全文
pub fn find_boundaries(content: &str) -> Vec<Boundary> {
    RE_QUESTION
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Boundary {
                start: whole.start(),
                end: whole.end(),
                number: caps.get(1)?.as_str().to_string(),
                prompt: caps.get(2)?.as_str().trim().to_string(),
                answer: caps.get(3)?.as_str().chars().map(String::from).collect(),
            })
        })
        .collect()
}

/// 章节格式解析器
pub struct ChapterParser {
    heuristics: Heuristics,
}

impl ChapterParser {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// 题干是否可疑：过长，或混入了解析/选项字样
    pub fn needs_repair(&self, prompt: &str) -> bool {
        char_len(prompt) > self.heuristics.prompt_repair_len
            || prompt.contains("解析")
            || prefix_chars(prompt, self.heuristics.option_vocab_prefix_len).contains("选项")
    }

    /// 第二步：在匹配起点之前的窗口里找最近的同号题号，截取到第一个结束符
    ///
    /// 找不到题号或结束符时返回 `None`，调用方保留原题干。
    pub fn repair_prompt(&self, content: &str, boundary: &Boundary) -> Option<String> {
        let window_start = back_chars(content, boundary.start, self.heuristics.repair_lookbehind);
        let window = &content[window_start..boundary.start];

        let anchor_end = window
            .rmatch_indices(boundary.number.as_str())
            .find_map(|(pos, num)| {
                let after = &window[pos + num.len()..];
                let preceded_by_digit = window[..pos]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_ascii_digit());
                let delimiter = after.chars().next().filter(|c| *c == '、' || *c == '.')?;
                (!preceded_by_digit).then(|| pos + num.len() + delimiter.len_utf8())
            })?;

        let text_start = window_start + anchor_end;
        let limit = forward_chars(content, boundary.start, self.heuristics.repair_lookahead);
        let region = &content[text_start..limit];
        let text_end = region.find(&PROMPT_TERMINATORS[..])?;

        let prompt = normalize_whitespace(&region[..text_end]);
        (!prompt.is_empty()).then_some(prompt)
    }

    /// 解析单个题目块，证据不足时返回 `None`
    fn build_question(
        &self,
        content: &str,
        boundary: &Boundary,
        block: &str,
        chapter: &ChapterInfo,
        markers: &SectionMarkers,
        ctx: &DocumentCtx,
    ) -> Option<Question> {
        let mut prompt = normalize_whitespace(&boundary.prompt);
        if self.needs_repair(&prompt) {
            if let Some(repaired) = self.repair_prompt(content, boundary) {
                debug!("{} 第 {} 题题干已修复: {}", ctx, boundary.number, repaired);
                prompt = repaired;
            }
        }

        let options_end = find_marker(block).map_or(block.len(), |(pos, _)| pos);
        let options = parse_option_block(&block[..options_end], &self.heuristics);
        if options.len() < self.heuristics.min_options {
            debug!(
                "{} 第 {} 题只识别到 {} 个选项，跳过",
                ctx,
                boundary.number,
                options.len()
            );
            return None;
        }

        let question_type = infer_type(true, markers, boundary.start, boundary.answer.len());
        let question = Question {
            id: build_id(&ctx.namespace, &chapter.number, &boundary.number, question_type),
            course: Some(ctx.course.clone()),
            unit: chapter.unit.clone(),
            question_type,
            question: prompt,
            options,
            correct_answer: boundary.answer.clone(),
            explanation: extract_explanation(block),
            difficulty: ctx.difficulty.clone(),
            extra: Map::new(),
        };

        if !question.answers_match_options() {
            debug!(
                "{} 第 {} 题答案 {:?} 不在选项中，跳过",
                ctx, boundary.number, question.correct_answer
            );
            return None;
        }
        Some(question)
    }
}

impl QuestionExtractor for ChapterParser {
    fn extract(&self, content: &str, ctx: &DocumentCtx) -> Vec<Question> {
        let chapter = ChapterInfo::detect(content, &ctx.file_stem);
        let markers = SectionMarkers::locate(content);
        let boundaries = find_boundaries(content);

        boundaries
            .iter()
            .enumerate()
            .filter_map(|(i, boundary)| {
                let block_end = boundaries.get(i + 1).map_or(content.len(), |next| next.start);
                let block = &content[boundary.end..block_end];
                self.build_question(content, boundary, block, &chapter, &markers, ctx)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionOption, QuestionType};
    use pretty_assertions::assert_eq;

    fn ctx() -> DocumentCtx {
        DocumentCtx::new("大数据导论", "q", "第5章_数据采集与预处理", "medium")
    }

    fn parser() -> ChapterParser {
        ChapterParser::new(Heuristics::default())
    }

    #[test]
    fn test_routing_scenario() {
        let content = "5. Which layer handles routing？（B）\nA. Physical\nB. Network\n**解析：** It operates at layer 3.\n";
        let questions = parser().extract(content, &ctx());
        assert_eq!(questions.len(), 1);

        let q = &questions[0];
        assert_eq!(q.question_type, QuestionType::Single);
        assert_eq!(q.question, "Which layer handles routing");
        assert_eq!(q.correct_answer, vec!["B"]);
        assert_eq!(q.explanation, "It operates at layer 3.");
        assert_eq!(
            q.options,
            vec![QuestionOption::new("A", "Physical"), QuestionOption::new("B", "Network")]
        );
        assert_eq!(q.id, "q_0_5_single");
        assert_eq!(q.unit, "第5章_数据采集与预处理");
        assert_eq!(q.course.as_deref(), Some("大数据导论"));
    }

    #[test]
    fn test_chapter_heading_and_sections() {
        let content = "\
**第3章：大数据基础知识**

一、单选题

1、Hadoop 的核心组件是：(A)
A. HDFS
B. Excel
**解析：** HDFS 是分布式文件系统。

二、多选题

1. 属于 NoSQL 数据库的有？（BC）
A. MySQL
B. MongoDB
C. HBase
D. Oracle
**解析：** MongoDB 与 HBase
都是 NoSQL。

2. 大数据的特征？（A）
A. 体量大
B. 都不对
";
        let questions = parser().extract(content, &ctx());
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q_3_1_single", "q_3_1_multiple", "q_3_2_single"]);
        assert!(questions.iter().all(|q| q.unit == "第3章 大数据基础知识"));
        assert_eq!(questions[1].explanation, "MongoDB 与 HBase 都是 NoSQL。");
        assert_eq!(questions[1].options.len(), 4);
        // 多选小节中的单答案题按答案个数归为单选
        assert_eq!(questions[2].question_type, QuestionType::Single);
    }

    #[test]
    fn test_drops_question_with_too_few_options() {
        let content = "1. 只有一个选项？（A）\nA. 唯一\n\n2. 正常的题？（B）\nA. 甲\nB. 乙\n";
        let questions = parser().extract(content, &ctx());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "正常的题");
    }

    #[test]
    fn test_options_not_read_past_explanation() {
        let content = "1. 题目？（A）\nA. 甲\nB. 乙\n**解析：** 看下面\nC. 解析里的伪选项\n";
        let questions = parser().extract(content, &ctx());
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn test_drops_answer_outside_options() {
        let content = "1. 题目？（C）\nA. 甲\nB. 乙\n";
        assert!(parser().extract(content, &ctx()).is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(parser().extract("", &ctx()).is_empty());
        assert!(parser().extract("# 标题\n\n没有题目的正文。\n", &ctx()).is_empty());
    }

    #[test]
    fn test_prompt_stops_at_first_terminator() {
        let boundaries = find_boundaries("3. 数据是什么：请选择？（A）");
        // 第一个结束符之后不是答案括号，整体不匹配
        assert!(boundaries.is_empty());

        let boundaries = find_boundaries("3. 数据是什么？（AB）");
        assert_eq!(boundaries[0].prompt, "数据是什么");
        assert_eq!(boundaries[0].answer, vec!["A", "B"]);
        assert_eq!(boundaries[0].number, "3");
    }

    #[test]
    fn test_needs_repair() {
        let p = parser();
        assert!(!p.needs_repair("普通题干"));
        assert!(p.needs_repair("上一题的解析内容 下列说法正确的是"));
        assert!(p.needs_repair("选项说明 下列说法"));
        assert!(p.needs_repair(&"长".repeat(151)));
    }

    #[test]
    fn test_repair_reanchors_to_preceding_number() {
        let content = "7、数据清洗的目的是？ 见解析 7. 残留文字？（A）";
        let boundaries = find_boundaries(content);
        let boundary = boundaries.last().unwrap();
        assert_eq!(boundary.prompt, "残留文字");

        let repaired = parser().repair_prompt(content, boundary);
        assert_eq!(repaired.as_deref(), Some("数据清洗的目的是"));
    }

    #[test]
    fn test_extract_repairs_suspicious_prompt() {
        let content = "8、数据清洗的目的是？ 解析见教材\n8. 解析残留？（B）\nA. 甲\nB. 乙\n";
        let questions = parser().extract(content, &ctx());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "数据清洗的目的是");
        assert_eq!(questions[0].id, "q_0_8_single");
        assert_eq!(questions[0].correct_answer, vec!["B"]);
    }

    #[test]
    fn test_extract_keeps_prompt_when_repair_finds_nothing() {
        let content = "9. 解析相关的题干？（A）\nA. 甲\nB. 乙\n";
        let questions = parser().extract(content, &ctx());
        assert_eq!(questions[0].question, "解析相关的题干");
    }

    #[test]
    fn test_repair_ignores_longer_number() {
        // "17、" 不是第 7 题的题号
        let content = "17、无关？ 7. 题干？（A）";
        let boundaries = find_boundaries(content);
        let boundary = boundaries.iter().find(|b| b.number == "7").unwrap();
        assert_eq!(parser().repair_prompt(content, boundary), None);
    }

    #[test]
    fn test_idempotent() {
        let content = "1. 题目？（A）\nA. 甲\nB. 乙\n**解析：** 因为甲\n";
        assert_eq!(parser().extract(content, &ctx()), parser().extract(content, &ctx()));
    }
}
