use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 题库读写错误
    #[error("题库错误: {0}")]
    Bank(#[from] BankError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 字段为空
    #[error("配置项 {field} 不能为空")]
    EmptyField { field: String },
    /// 阈值取值无效
    #[error("配置项 {field} 取值无效: {value}")]
    InvalidValue { field: String, value: usize },
    /// 多个批次写入同一课程
    #[error("课程 {course} 同时出现在 batches[{first}] 与 batches[{second}]")]
    DuplicateCourse {
        course: String,
        first: usize,
        second: usize,
    },
}

/// 题库 JSON 错误
#[derive(Debug, Error)]
pub enum BankError {
    /// 已有题库 JSON 解析失败
    #[error("题库JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 序列化失败
    #[error("题库序列化失败: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建配置项为空错误
    pub fn empty_config_field(field: impl Into<String>) -> Self {
        AppError::Config(ConfigError::EmptyField {
            field: field.into(),
        })
    }

    /// 是否为"文件不存在"
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::File(FileError::NotFound { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
