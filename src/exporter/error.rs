// ==========================================
// 供应链风险感知 - 导出层错误类型
// ==========================================

use thiserror::Error;

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录创建失败: {path}: {message}")]
    OutputDirError { path: String, message: String },

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV序列化失败: {0}")]
    CsvWriteError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
