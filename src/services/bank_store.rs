//! 题库文件读写服务
//!
//! 只负责 `{"questions": [...]}` 的读与写，不关心合并规则

use crate::error::{AppError, AppResult, BankError, FileError};
use crate::models::QuestionBank;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 题库存储
pub struct BankStore {
    path: PathBuf,
}

impl BankStore {
    /// 创建题库存储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取已有题库；文件不存在时返回 `None`
    pub fn load(&self) -> AppResult<Option<QuestionBank>> {
        if !self.path.exists() {
            debug!("题库文件不存在: {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| AppError::file_read_failed(self.display(), e))?;
        let bank: QuestionBank =
            serde_json::from_str(&content).map_err(|source| BankError::JsonParseFailed {
                path: self.display(),
                source,
            })?;

        info!(
            "✓ 已读取现有题库: {} 道题目 ({})",
            bank.questions.len(),
            self.path.display()
        );
        Ok(Some(bank))
    }

    /// 整体写出题库
    ///
    /// 先写同目录下的临时文件再重命名，避免写到一半留下残缺的 JSON
    pub fn save(&self, bank: &QuestionBank) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| FileError::CreateDirFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut json = serde_json::to_string_pretty(bank)
            .map_err(|source| BankError::SerializeFailed { source })?;
        json.push('\n');

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)
            .map_err(|e| AppError::file_write_failed(tmp_path.display().to_string(), e))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| AppError::file_write_failed(self.display(), e))?;

        info!("💾 已保存到: {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionOption, QuestionType};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map};

    fn bank() -> QuestionBank {
        QuestionBank {
            questions: vec![Question {
                id: "net_ch1_q1_fill".to_string(),
                course: Some("计算机网络".to_string()),
                unit: "计算机网络_第一单元测验".to_string(),
                question_type: QuestionType::Fill,
                question: "TCP 属于哪一层".to_string(),
                options: Vec::<QuestionOption>::new(),
                correct_answer: vec!["传输层".to_string()],
                explanation: String::new(),
                difficulty: "medium".to_string(),
                extra: Map::new(),
            }],
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = BankStore::new(dir.path().join("nested/out/questions.json"));

        assert!(store.load().unwrap().is_none());
        store.save(&bank()).unwrap();
        assert_eq!(store.load().unwrap(), Some(bank()));
        assert!(!dir.path().join("nested/out/questions.json.tmp").exists());
    }

    #[test]
    fn test_output_is_unescaped_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = BankStore::new(dir.path().join("questions.json"));
        store.save(&bank()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"correctAnswer\""));
        assert!(raw.contains("传输层"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["questions"][0]["type"], json!("fill"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, "{ not json").unwrap();

        let err = BankStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Bank(BankError::JsonParseFailed { .. })));
    }
}
