// ==========================================
// 供应链风险感知 - 导入层
// ==========================================
// 职责: 外部表文件 → 强类型输入快照
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod snapshot_loader;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, RawRow};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use snapshot_loader::{DirectorySnapshotLoader, TableKind};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, SnapshotLoader};
