//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责按批次解析文档并生成题库。
//!
//! ## 核心功能
//!
//! 1. **读取现有题库**：输出文件存在时先读入
//! 2. **逐批解析**：每批对应一个课程，逐个文档委托给 document_processor
//! 3. **容错**：缺失文档只警告，单个文档失败记录完整错误链后继续
//! 4. **合并**：按课程替换旧题并解决 ID 冲突
//! 5. **写出**：整体写出题库，写入失败视为致命错误
//! 6. **全局统计**：汇总各批次结果

use crate::config::{BatchConfig, Config};
use crate::models::{Question, QuestionBank};
use crate::orchestrator::document_processor;
use crate::services::{merge_questions, BankStore, MergeStats};
use crate::utils::logging::{log_batch_complete, log_batch_start, log_startup, print_final_stats};
use anyhow::{Context, Result};
use tracing::{error, warn};

/// 单个批次的统计
#[derive(Debug, Default, Clone)]
pub struct BatchStats {
    pub course: String,
    /// 成功解析的文档数
    pub parsed: usize,
    /// 缺失的文档数
    pub missing: usize,
    /// 解析失败的文档数
    pub failed: usize,
    /// 本批提取的题目数
    pub extracted: usize,
    /// 合并统计
    pub merge: MergeStats,
}

/// 整次运行的汇总
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub parsed: usize,
    pub missing: usize,
    pub failed: usize,
    pub extracted: usize,
    /// 写出后题库的总题数
    pub total: usize,
    pub batches: Vec<BatchStats>,
}

impl RunSummary {
    fn absorb(&mut self, stats: BatchStats) {
        self.parsed += stats.parsed;
        self.missing += stats.missing;
        self.failed += stats.failed;
        self.extracted += stats.extracted;
        self.batches.push(stats);
    }
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行应用主逻辑：读取 → 逐批解析合并 → 写出
    pub fn run(&self) -> Result<RunSummary> {
        self.config.validate().context("配置校验失败")?;
        log_startup(&self.config);

        let store = BankStore::new(self.config.output_path());
        let mut questions = store
            .load()
            .with_context(|| format!("无法读取现有题库: {}", store.path().display()))?
            .unwrap_or_default()
            .questions;

        let mut summary = RunSummary::default();
        let total_batches = self.config.batches.len();

        for (index, batch) in self.config.batches.iter().enumerate() {
            log_batch_start(index + 1, total_batches, batch);

            let (incoming, mut stats) = self.process_batch(batch);
            if stats.parsed == 0 {
                warn!("⚠️ {} 没有可解析的文档，保留该课程的旧题", batch.course);
                summary.absorb(stats);
                continue;
            }

            let (merged, merge_stats) =
                merge_questions(questions, incoming, &batch.course, &self.config.default_course);
            questions = merged;
            stats.merge = merge_stats;

            log_batch_complete(&stats);
            summary.absorb(stats);
        }

        summary.total = questions.len();
        let bank = QuestionBank { questions };
        store
            .save(&bank)
            .with_context(|| format!("无法写出题库: {}", store.path().display()))?;

        print_final_stats(&summary, &bank.questions, &self.config.default_course);
        Ok(summary)
    }

    /// 解析一个批次的全部文档，返回按文档顺序拼接的题目
    fn process_batch(&self, batch: &BatchConfig) -> (Vec<Question>, BatchStats) {
        let mut stats = BatchStats {
            course: batch.course.clone(),
            ..Default::default()
        };
        let mut questions = Vec::new();

        for file in &batch.files {
            let path = self.config.document_path(batch, file);
            match document_processor::process_document(&path, batch, &self.config) {
                Ok(mut parsed) => {
                    stats.parsed += 1;
                    stats.extracted += parsed.len();
                    questions.append(&mut parsed);
                }
                Err(e) if e.is_not_found() => {
                    stats.missing += 1;
                }
                Err(e) => {
                    error!("❌ 解析出错 {}: {:?}", path.display(), anyhow::Error::from(e));
                    stats.failed += 1;
                }
            }
        }

        (questions, stats)
    }
}
