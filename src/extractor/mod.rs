//! 题目提取（核心）
//!
//! 输入一篇 markdown 文本，输出按出现顺序排列的 `Question` 列表。
//! 两种源格式各有一个解析器：
//!
//! - `unit_test` - `### 1. 题干` 标题 + `**正确答案**` 标记行
//! - `chapter` - `1、题干？（AC）` 行内答案 + 选项 + `**解析：**`
//!
//! 解析是纯内存操作；证据不足的题目直接丢弃，不报错。

pub mod chapter;
pub mod classify;
pub mod explanation;
pub mod options;
pub mod text;

use crate::config::Heuristics;
use crate::models::{Question, SourceFormat};
use std::fmt::Display;

pub use chapter::ChapterParser;
pub use unit_test::UnitTestParser;

/// 文档上下文
///
/// 封装"我正在解析哪个课程的哪篇文档"这一信息
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 课程名
    pub course: String,
    /// ID 前缀
    pub namespace: String,
    /// 文件名（不含扩展名），没有单元标题时作为单元名
    pub file_stem: String,
    /// 难度
    pub difficulty: String,
}

impl DocumentCtx {
    /// 创建新的文档上下文
    pub fn new(
        course: impl Into<String>,
        namespace: impl Into<String>,
        file_stem: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            namespace: namespace.into(),
            file_stem: file_stem.into(),
            difficulty: difficulty.into(),
        }
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[课程 {} 文档 {}]", self.course, self.file_stem)
    }
}

/// 题目提取能力
pub trait QuestionExtractor {
    /// 从 markdown 文本中提取题目
    fn extract(&self, content: &str, ctx: &DocumentCtx) -> Vec<Question>;
}

/// 按格式选择解析器
pub fn extractor_for(format: SourceFormat, heuristics: &Heuristics) -> Box<dyn QuestionExtractor> {
    match format {
        SourceFormat::UnitTest => Box::new(UnitTestParser::new()),
        SourceFormat::Chapter => Box::new(ChapterParser::new(heuristics.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extractor_for_dispatches_by_format() {
        let ctx = DocumentCtx::new("计算机网络", "net", "单元测试2", "medium");
        let heuristics = Heuristics::default();
        let unit_doc = "### 1. 题目\nA. 甲\nB. 乙\n**正确答案**: A\n";
        let chapter_doc = "1. 题目？（A）\nA. 甲\nB. 乙\n";

        let unit = extractor_for(SourceFormat::UnitTest, &heuristics);
        assert_eq!(unit.extract(unit_doc, &ctx).len(), 1);
        assert!(unit.extract(chapter_doc, &ctx).is_empty());

        let chapter = extractor_for(SourceFormat::Chapter, &heuristics);
        assert_eq!(chapter.extract(chapter_doc, &ctx).len(), 1);
    }

    #[test]
    fn test_every_question_has_valid_answer() {
        let ctx = DocumentCtx::new("大数据导论", "q", "第1章", "medium");
        let doc = "\
一、单选题
1. 甲？（A）
A. 一
B. 二
2. 乙？（E）
A. 一
B. 二
二、多选题
3. 丙？（ABD）
A. 一
B. 二
C. 三
D. 四
";
        let questions = extractor_for(SourceFormat::Chapter, &Heuristics::default()).extract(doc, &ctx);
        assert_eq!(questions.len(), 2);
        for q in &questions {
            assert!(!q.correct_answer.is_empty());
            assert!(q.answers_match_options());
            let keys: HashSet<&str> = q.options.iter().map(|o| o.key.as_str()).collect();
            assert_eq!(keys.len(), q.options.len());
        }
    }
}
