//! # Quiz Bank Builder
//!
//! 把 markdown 复习资料（单元测试 / 章节习题）转换为题库 JSON 的工具
//!
//! ## 架构设计
//!
//! ### ① 核心解析层（Extractor）
//! - `extractor/` - markdown 文本 → `Vec<Question>`，纯内存、无 I/O
//! - `UnitTestParser` - `### 1. 题干` + `**正确答案**` 格式
//! - `ChapterParser` - `1、题干？（AC）` 行内答案格式，含题干修复与选项过滤
//!
//! ### ② 服务层（Services）
//! - `services/` - 题库合并（纯函数）与 JSON 读写
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 逐批解析、合并、写出、统计
//! - `orchestrator/document_processor` - 单篇文档的读取与解析
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{BatchConfig, Config, Heuristics};
pub use error::{AppError, AppResult};
pub use extractor::{extractor_for, DocumentCtx, QuestionExtractor};
pub use models::{Question, QuestionBank, QuestionOption, QuestionType, SourceFormat};
pub use orchestrator::{App, RunSummary};
pub use services::{merge_questions, BankStore};
