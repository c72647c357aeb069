// ==========================================
// 供应链风险感知 - 风险汇总领域模型
// ==========================================
// 一行 = 一个 (event, site, material) 分组的最坏情况代表
// ==========================================

use crate::domain::types::{compose_id, RiskLevel};
use serde::Serialize;

/// 受影响产品/市场的渲染分隔符
pub const IMPACTED_DELIMITER: &str = ", ";

// ==========================================
// RollupKey - 汇总分组键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RollupKey {
    pub event_id: String,
    pub site_id: String,
    pub material_id: String,
}

impl RollupKey {
    pub fn rollup_id(&self) -> String {
        compose_id(
            "ROLL",
            &[
                self.event_id.as_str(),
                self.site_id.as_str(),
                self.material_id.as_str(),
            ],
        )
    }
}

// ==========================================
// RollupRow - 风险汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupRow {
    pub run_id: String,
    pub rollup_id: String,

    // ===== 事件 =====
    pub event_id: String,
    pub event_ts: String,
    pub event_type: String,
    pub headline: String,
    pub source_url: String,
    pub country: String,
    pub region: String,
    pub city: String,

    // ===== 站点 =====
    pub site_id: String,
    pub supplier_name: String,
    pub site_name: String,

    // ===== 物料 =====
    pub material_id: String,
    pub material_name: String,
    pub criticality: String,
    pub single_source_flag: String,

    // ===== 代表性评分 (组内最高分行) =====
    pub risk_score: i64,
    pub risk_level: RiskLevel,
    pub drivers: String,
    pub recommended_action: String,

    // ===== 受影响范围 =====
    pub impacted_products: String,
    pub impacted_markets: String,

    // ===== 最坏库存 (组内覆盖天数最小行) =====
    pub worst_on_hand_days: f64,
    pub worst_in_transit_days: f64,
    pub worst_coverage_days: f64,
    pub worst_safety_stock_days: f64,
    pub worst_lead_time_days: f64,
    pub worst_next_po_eta_days: Option<f64>,
    pub worst_time_to_impact: bool,
    pub worst_market: String,
    pub worst_product: String,

    // ===== 优先级/需求 =====
    pub best_priority_tier: f64,
    pub max_weekly_demand: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollup_id() {
        let key = RollupKey {
            event_id: "E1".to_string(),
            site_id: "S1".to_string(),
            material_id: "M1".to_string(),
        };
        assert_eq!(key.rollup_id(), "ROLL-E1-S1-M1");
    }
}
