use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 默认难度
pub const DEFAULT_DIFFICULTY: &str = "medium";

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    Single,
    /// 多选题
    Multiple,
    /// 填空题
    Fill,
}

impl QuestionType {
    /// 用于 ID 拼接的名称
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::Fill => "fill",
        }
    }

    /// 中文名称（日志用）
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Single => "单选题",
            QuestionType::Multiple => "多选题",
            QuestionType::Fill => "填空题",
        }
    }

    /// 按答案个数判断
    pub fn from_cardinality(answer_count: usize) -> Self {
        if answer_count > 1 {
            QuestionType::Multiple
        } else {
            QuestionType::Single
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub key: String,
    pub text: String,
}

impl QuestionOption {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// 题库中的一道题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// 课程（合并时的分类键）；旧题库可能缺失
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    pub unit: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub correct_answer: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// 已有题库里本工具不认识的字段，原样写回
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

impl Question {
    /// 合并时使用的分类；缺失 course 的旧记录归入 `default_course`
    pub fn category<'a>(&'a self, default_course: &'a str) -> &'a str {
        self.course.as_deref().unwrap_or(default_course)
    }

    /// 答案中的每个字母都能在选项中找到（填空题不检查）
    pub fn answers_match_options(&self) -> bool {
        if self.options.is_empty() {
            return true;
        }
        self.correct_answer
            .iter()
            .all(|ans| self.options.iter().any(|opt| &opt.key == ans))
    }
}

/// 题库文件的顶层结构：`{"questions": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub questions: Vec<Question>,
}
