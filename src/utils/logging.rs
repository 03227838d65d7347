//! 日志工具模块
//!
//! 提供日志初始化与控制台统计输出的辅助函数

use crate::config::{BatchConfig, Config};
use crate::models::{Question, QuestionType};
use crate::orchestrator::{BatchStats, RunSummary};
use std::collections::BTreeMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化控制台日志，默认级别 info，可用 `RUST_LOG` 调整
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库生成");
    info!("📁 源文档目录: {}", config.base_dir.display());
    info!("📄 输出文件: {}", config.output_path().display());
    info!("📦 批次数量: {}", config.batches.len());
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `batch`: 批次配置
pub fn log_batch_start(batch_num: usize, total_batches: usize, batch: &BatchConfig) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📦 开始处理第 {}/{} 批: {} ({}格式)",
        batch_num, total_batches, batch.course, batch.format
    );
    info!("📄 本批文档: {} 个", batch.files.len());
    info!("{}", "=".repeat(60));
}

/// 记录单个文档的解析结果
pub fn log_document_parsed(file: &str, count: usize) {
    info!("正在解析: {}", file);
    info!("  ✓ 提取了 {} 道题目", count);
}

/// 记录缺失的文档
pub fn log_document_missing(path: &str) {
    warn!("⚠️ 文件不存在，跳过: {}", path);
}

/// 记录批次完成信息
///
/// # 参数
/// - `stats`: 批次统计
pub fn log_batch_complete(stats: &BatchStats) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ {} 完成: 解析 {} 个文档, 缺失 {}, 失败 {}, 共提取 {} 道题目",
        stats.course, stats.parsed, stats.missing, stats.failed, stats.extracted
    );
    info!(
        "  移除旧题 {} 道, 保留其他题目 {} 道, ID 冲突改名 {} 道",
        stats.merge.removed, stats.merge.kept, stats.merge.renamed
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 运行汇总
/// - `questions`: 合并后的全部题目
/// - `default_course`: 缺失 course 的旧记录归入的课程
pub fn print_final_stats(summary: &RunSummary, questions: &[Question], default_course: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 本次共提取 {} 道题目", summary.extracted);
    info!(
        "📄 文档: 解析 {}, 缺失 {}, 失败 {}",
        summary.parsed, summary.missing, summary.failed
    );
    info!("📚 题库总题数: {}", questions.len());

    for (question_type, count) in type_counts(questions) {
        info!("  {}: {} 道", question_type.label(), count);
    }

    info!("\n各课程题目数量:");
    for (course, count) in count_by(questions, |q| q.category(default_course).to_string()) {
        info!("  {}: {} 道", course, count);
    }

    info!("\n各单元题目数量:");
    for (unit, count) in count_by(questions, |q| q.unit.clone()) {
        info!("  {}: {} 道", unit, count);
    }
    info!("{}", "=".repeat(60));
}

/// 按键计数，结果按键排序
pub fn count_by<K: Ord>(questions: &[Question], key: impl Fn(&Question) -> K) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for q in questions {
        *counts.entry(key(q)).or_insert(0) += 1;
    }
    counts
}

/// 各题型数量
pub fn type_counts(questions: &[Question]) -> BTreeMap<QuestionType, usize> {
    count_by(questions, |q| q.question_type)
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("数据采集与预处理", 4), "数据采集...");
        assert_eq!(truncate_text("短", 4), "短");
    }
}
