// ==========================================
// 供应链风险感知 - 核心库
// ==========================================
// 链路: 事件 → 站点 → 物料 → 产品 → 市场
// 系统定位: 决策支持 (只输出建议, 不自动执行)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输入表与输出行
pub mod domain;

// 引擎层 - 展开评分 / 汇总
pub mod engine;

// 导入层 - 外部表文件
pub mod importer;

// 导出层 - CSV
pub mod exporter;

// 数据仓储层 - 运行结果落库
pub mod repository;

// 配置层 - 评分策略
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BomEntry, Dependency, Event, Exposure, InputSnapshot, InventoryRecord, InventorySource,
    RecommendationRow, RiskLevel, RollupKey, RollupRow, Site,
};

// 引擎
pub use engine::{
    generate_run_id, ExpansionEngine, PipelineResult, RiskScorer, RollupEngine, RunSummary,
    SensingPipeline,
};

// 配置
pub use config::{ConfigManager, ScoringPolicy};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供应链风险感知";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
