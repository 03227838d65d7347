//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **读取文档**：一次性读入整篇 markdown，文件不存在时报告"缺失"
//! 2. **构建上下文**：课程、ID 前缀、文件名、难度
//! 3. **委托解析**：按批次格式选择解析器
//! 4. **日志输出**：记录提取到的题目数

use crate::config::{BatchConfig, Config};
use crate::error::{AppError, AppResult, FileError};
use crate::extractor::{extractor_for, DocumentCtx};
use crate::models::Question;
use crate::utils::logging::{log_document_missing, log_document_parsed};
use crate::utils::truncate_text;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 处理单个文档
///
/// # 参数
/// - `path`: 文档完整路径
/// - `batch`: 所属批次
/// - `config`: 配置
///
/// # 返回
/// 提取到的题目；文件不存在时返回 `FileError::NotFound`
pub fn process_document(path: &Path, batch: &BatchConfig, config: &Config) -> AppResult<Vec<Question>> {
    let display = path.display().to_string();
    if !path.is_file() {
        log_document_missing(&display);
        return Err(FileError::NotFound { path: display }.into());
    }

    let content = read_document(path)?;
    let ctx = DocumentCtx::new(
        batch.course.as_str(),
        batch.namespace.as_str(),
        file_stem(path),
        config.difficulty.as_str(),
    );

    let questions = extractor_for(batch.format, &config.heuristics).extract(&content, &ctx);

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    log_document_parsed(&file_name, questions.len());
    for q in &questions {
        debug!("{} {} | {}", ctx, q.id, truncate_text(&q.question, 40));
    }

    Ok(questions)
}

/// 读取文档全文（必须是 UTF-8）
fn read_document(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}

/// 不含扩展名的文件名
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
