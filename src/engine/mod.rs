// ==========================================
// 供应链风险感知 - 引擎层
// ==========================================
// 职责: 展开评分与汇总的纯函数引擎
// 红线: 引擎不做 I/O, 所有评分必须输出驱动因素
// ==========================================

pub mod expansion;
pub mod inventory;
pub mod pipeline;
pub mod rollup;
pub mod scoring;

// 重导出核心引擎
pub use expansion::ExpansionEngine;
pub use inventory::{InventoryIndex, InventoryMetrics, InventoryPosition};
pub use pipeline::{generate_run_id, PipelineResult, RunSummary, SensingPipeline};
pub use rollup::{GroupAccumulator, RollupEngine};
pub use scoring::{recommend_action, RiskAssessment, RiskFactors, RiskScorer};
