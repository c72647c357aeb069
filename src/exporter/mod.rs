// ==========================================
// 供应链风险感知 - 导出层
// ==========================================
// 职责: 建议行/汇总行 → CSV 文件
// ==========================================

pub mod csv_exporter;
pub mod error;

pub use csv_exporter::{CsvExporter, RECOMMENDATIONS_FILE, ROLLUPS_FILE};
pub use error::{ExportError, ExportResult};
