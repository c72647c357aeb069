use serde::{Deserialize, Serialize};

/// 当前默认策略版本
pub const DEFAULT_POLICY_VERSION: &str = "v1";

/// 风险评分策略（持久化对象）
///
/// 存储位置：config_kv（scope_id='global'，key='scoring_policy'）
///
/// 所有权重/阈值均为固定策略常量，任何改动都应作为新版本发布，
/// 而不是在引擎代码里调整。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// 策略版本号
    pub policy_version: String,

    // ===== 物料关键度权重 =====
    pub criticality_a_weight: i64,
    pub criticality_b_weight: i64,
    pub criticality_other_weight: i64,

    // ===== 供应脆弱性 =====
    pub single_source_points: i64,
    pub inventory_gap_points: i64,

    // ===== 时间敏感性 =====
    pub long_lead_days: f64,
    pub long_lead_points: i64,
    pub time_to_impact_points: i64,

    // ===== 优先级/需求 =====
    pub tier_one_points: i64,
    pub tier_two_points: i64,
    pub demand_high_units: f64,
    pub demand_high_points: i64,
    pub demand_medium_units: f64,
    pub demand_medium_points: i64,

    // ===== 风险等级阈值 =====
    pub high_threshold: i64,
    pub medium_threshold: i64,

    // ===== 库存缺失时的保守默认值 =====
    pub default_safety_stock_days: f64,
    pub default_lead_time_days: f64,
    /// 未知/远期 ETA 哨兵值
    pub unknown_eta_days: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            policy_version: DEFAULT_POLICY_VERSION.to_string(),
            criticality_a_weight: 4,
            criticality_b_weight: 2,
            criticality_other_weight: 1,
            single_source_points: 3,
            inventory_gap_points: 3,
            long_lead_days: 30.0,
            long_lead_points: 2,
            time_to_impact_points: 2,
            tier_one_points: 2,
            tier_two_points: 1,
            demand_high_units: 1000.0,
            demand_high_points: 2,
            demand_medium_units: 500.0,
            demand_medium_points: 1,
            high_threshold: 12,
            medium_threshold: 8,
            default_safety_stock_days: 7.0,
            default_lead_time_days: 14.0,
            unknown_eta_days: 999.0,
        }
    }
}

impl ScoringPolicy {
    /// 物料关键度权重（A/B 精确匹配，其余按 C/未知处理）
    pub fn criticality_weight(&self, criticality: &str) -> i64 {
        match criticality {
            "A" => self.criticality_a_weight,
            "B" => self.criticality_b_weight,
            _ => self.criticality_other_weight,
        }
    }
}
