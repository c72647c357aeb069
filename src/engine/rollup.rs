// ==========================================
// 供应链风险感知 - 风险汇总引擎
// ==========================================
// 职责: 将 事件×站点×物料×产品×市场 明细行收敛为 事件×站点×物料 汇总行
// 输入: 展开引擎输出的 RecommendationRow 列表
// 输出: RollupRow 列表,每个分组一行
// ==========================================
// 合并规则:
// - 代表性评分: 严格更高分才替换 (score/level/drivers/action 原子替换)
// - 最坏库存: 覆盖天数严格更小才替换 (整组库存快照原子替换)
// - 优先级取最小, 周需求取最大
// - 受影响产品/市场: 首次出现顺序去重
// ==========================================

mod accumulator;
mod core;


pub use accumulator::{GroupAccumulator, RepresentativeRisk, WorstInventory};
pub use self::core::RollupEngine;
