use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations that can produce FlistError
pub type FlistResult<T> = Result<T, FlistError>;

/// flist 的错误类型
#[derive(Debug, Error)]
pub enum FlistError {
    /// 无效的正则表达式
    #[error("invalid regular expression for {option} '{pattern}': {source}")]
    InvalidPattern {
        option: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// 无法创建输出目录
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 无法打开 CSV 文件
    #[error("cannot open CSV file {}: {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV 写入错误
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// 其他 IO 错误
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
