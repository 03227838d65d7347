//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 读取现有题库
//! - 逐批（逐课程）解析文档
//! - 合并并写出题库
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 读取单篇 markdown
//! - 构建 DocumentCtx 并委托 extractor 解析
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<BatchConfig>)
//!     ↓
//! document_processor (处理单篇文档)
//!     ↓
//! extractor (markdown → Vec<Question>)
//!
//! batch_processor → services (合并 / 读写题库)
//! ```

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::{App, BatchStats, RunSummary};
pub use document_processor::process_document;
