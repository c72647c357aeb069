// ==========================================
// 供应链风险感知 - 领域模型层
// ==========================================
// 职责: 定义输入表结构、建议行、汇总行与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod input;
pub mod recommendation;
pub mod rollup;
pub mod types;

// 重导出核心类型
pub use input::{BomEntry, Dependency, Event, Exposure, InputSnapshot, InventoryRecord, Site};
pub use recommendation::{InventorySource, RecommendationRow, DRIVER_DELIMITER};
pub use rollup::{RollupKey, RollupRow, IMPACTED_DELIMITER};
pub use types::RiskLevel;
