use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{SourceFormat, DEFAULT_DIFFICULTY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 默认配置文件名（相对当前工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "quiz_bank.toml";

/// 程序配置文件
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 源文档根目录
    pub base_dir: PathBuf,
    /// 输出题库 JSON（相对 base_dir）
    pub output_file: PathBuf,
    /// 旧记录缺少 course 字段时归入的课程
    pub default_course: String,
    /// 写入每道题的难度
    pub difficulty: String,
    /// 待解析的文档批次，每批对应一个课程
    pub batches: Vec<BatchConfig>,
    /// 选项/题干识别阈值
    pub heuristics: Heuristics,
}

/// 一个课程的文档批次
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// 课程名，同时是合并时的分类键
    pub course: String,
    /// ID 前缀
    pub namespace: String,
    /// 文档格式
    pub format: SourceFormat,
    /// 文档所在子目录（相对 base_dir）
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// 文件名列表，按顺序解析
    pub files: Vec<String>,
}

/// 经验阈值，用于区分选项与解析文字、判断题干是否需要修复
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// 选项文字最大长度（字符）
    pub max_option_len: usize,
    /// 含"都正确/均错误"类判断词时允许的最大长度
    pub judgment_clause_len: usize,
    /// 每题最多收集的选项数
    pub max_options: usize,
    /// 少于该数量的选项视为无法解析
    pub min_options: usize,
    /// 题干超过该长度触发修复
    pub prompt_repair_len: usize,
    /// 题干前若干字符内出现"选项"触发修复
    pub option_vocab_prefix_len: usize,
    /// 修复时向前查找题号的窗口（字符）
    pub repair_lookbehind: usize,
    /// 修复时越过匹配起点向后查找结束符的窗口（字符）
    pub repair_lookahead: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            max_option_len: 200,
            judgment_clause_len: 50,
            max_options: 4,
            min_options: 2,
            prompt_repair_len: 150,
            option_vocab_prefix_len: 20,
            repair_lookbehind: 100,
            repair_lookahead: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            output_file: PathBuf::from("习题测验/questions.json"),
            default_course: "大数据导论".to_string(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            batches: vec![
                BatchConfig {
                    course: "大数据导论".to_string(),
                    namespace: "q".to_string(),
                    format: SourceFormat::Chapter,
                    dir: None,
                    files: [
                        "第1章_大数据概述.md",
                        "第2章_大数据与其他新兴技术之间的关系.md",
                        "第3章_大数据基础知识.md",
                        "第4章_大数据应用.md",
                        "第5章_数据采集与预处理.md",
                        "第6章_数据存储与管理.md",
                        "第7章_数据处理与分析.md",
                        "第8章_数据可视化.md",
                    ]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                },
                BatchConfig {
                    course: "计算机网络".to_string(),
                    namespace: "net".to_string(),
                    format: SourceFormat::UnitTest,
                    dir: Some(PathBuf::from("计算机网络")),
                    files: (1..=6).map(|i| format!("单元测试{}.md", i)).collect(),
                },
            ],
            heuristics: Heuristics::default(),
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置；文件不存在时使用默认配置
    ///
    /// # 参数
    /// - `path`: 配置文件路径
    ///
    /// # 返回
    /// 校验通过的配置
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!("未找到配置文件 {}，使用默认配置", path.display());
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let config = Self::from_toml_str(&content, &path.display().to_string())?;

        info!("✓ 已加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 解析 TOML 文本（`origin` 仅用于错误信息）
    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> AppResult<()> {
        if self.default_course.trim().is_empty() {
            return Err(AppError::empty_config_field("default_course"));
        }
        for (i, batch) in self.batches.iter().enumerate() {
            if batch.course.trim().is_empty() {
                return Err(AppError::empty_config_field(format!("batches[{}].course", i)));
            }
            if batch.namespace.trim().is_empty() {
                return Err(AppError::empty_config_field(format!("batches[{}].namespace", i)));
            }
        }

        // 合并按课程整体替换，同一课程只能由一个批次产出
        let mut courses: HashMap<&str, usize> = HashMap::new();
        for (i, batch) in self.batches.iter().enumerate() {
            if let Some(&first) = courses.get(batch.course.as_str()) {
                return Err(ConfigError::DuplicateCourse {
                    course: batch.course.clone(),
                    first,
                    second: i,
                }
                .into());
            }
            courses.insert(batch.course.as_str(), i);
        }

        let h = &self.heuristics;
        if h.min_options == 0 {
            return Err(ConfigError::InvalidValue {
                field: "heuristics.min_options".to_string(),
                value: h.min_options,
            }
            .into());
        }
        if h.max_options < h.min_options {
            return Err(ConfigError::InvalidValue {
                field: "heuristics.max_options".to_string(),
                value: h.max_options,
            }
            .into());
        }
        Ok(())
    }

    /// 输出文件的完整路径
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_file)
    }

    /// 批次中某个文档的完整路径
    pub fn document_path(&self, batch: &BatchConfig, file: &str) -> PathBuf {
        match &batch.dir {
            Some(dir) => self.base_dir.join(dir).join(file),
            None => self.base_dir.join(file),
        }
    }
}
