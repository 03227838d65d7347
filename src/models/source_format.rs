/// 源文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// 单元测试：`### 1. 题干` + `**正确答案**: A`
    UnitTest,
    /// 章节复习：`1、题干？（AC）` + 选项 + `**解析：**`
    Chapter,
}

impl SourceFormat {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::UnitTest => "单元测试",
            SourceFormat::Chapter => "章节",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
