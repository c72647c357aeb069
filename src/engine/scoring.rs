// ==========================================
// 供应链风险感知 - 风险评分器
// ==========================================
// 红线: 确定性加法评分,每一项可独立审计
// 红线: 驱动因素与评分项一一对应,作为评分的审计轨迹
// 红线: 建议动作仅为人工分诊参考,不触发任何自动执行
// ==========================================
// 评分公式:
//   severity
//   + 关键度权重 (A=4, B=2, 其他=1)
//   + 3 单一来源
//   + 3 低于安全库存
//   + 2 长交期 (>=30 天)
//   + 2 断供先于下一张 PO 到货
//   + 2 优先级 (0,1] / + 1 优先级 ==2
//   + 2 周需求 >=1000 / + 1 周需求 >=500
// ==========================================

use crate::config::ScoringPolicy;
use crate::domain::types::RiskLevel;

pub const ACTION_EXPEDITE: &str = "expedite + evaluate alternates now";
pub const ACTION_EVALUATE_ALTERNATES: &str = "evaluate alternates + monitor closely";
pub const ACTION_MONITOR: &str = "monitor and prepare mitigation";
pub const ACTION_PREPARE: &str = "prepare mitigation options";
pub const ACTION_INFO: &str = "informational only";

// ==========================================
// RiskFactors - 单行评分输入
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFactors<'a> {
    pub severity: i64,
    pub criticality: &'a str,
    pub single_source: bool,
    pub inventory_gap_days: f64,
    pub long_lead: bool,
    pub lead_time_days: f64,
    pub time_to_impact: bool,
    pub next_po_eta_days: f64,
    pub priority_tier: f64,
    pub weekly_demand: f64,
}

// ==========================================
// RiskAssessment - 单行评分结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub risk_score: i64,
    pub risk_level: RiskLevel,
    pub drivers: Vec<String>,
    pub recommended_action: &'static str,
}

// ==========================================
// RiskScorer - 风险评分器
// ==========================================
pub struct RiskScorer {
    policy: ScoringPolicy,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

impl RiskScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// 评分 + 等级 + 驱动因素 + 建议动作
    pub fn assess(&self, factors: &RiskFactors<'_>) -> RiskAssessment {
        let risk_score = self.score(factors);
        let risk_level = self.level(risk_score);
        RiskAssessment {
            risk_score,
            risk_level,
            drivers: self.drivers(factors),
            recommended_action: recommend_action(
                risk_level,
                factors.inventory_gap_days,
                factors.single_source,
            ),
        }
    }

    /// 加法评分
    pub fn score(&self, factors: &RiskFactors<'_>) -> i64 {
        let p = &self.policy;
        let mut score = factors.severity;
        score += p.criticality_weight(factors.criticality);

        if factors.single_source {
            score += p.single_source_points;
        }
        if factors.inventory_gap_days > 0.0 {
            score += p.inventory_gap_points;
        }
        if factors.long_lead {
            score += p.long_lead_points;
        }
        if factors.time_to_impact {
            score += p.time_to_impact_points;
        }

        // 优先级: 1 档与 2 档互斥
        let tier = factors.priority_tier;
        if tier > 0.0 && tier <= 1.0 {
            score += p.tier_one_points;
        } else if tier == 2.0 {
            score += p.tier_two_points;
        }

        // 周需求: 高/中互斥
        let demand = factors.weekly_demand;
        if demand >= p.demand_high_units {
            score += p.demand_high_points;
        } else if demand >= p.demand_medium_units {
            score += p.demand_medium_points;
        }

        score
    }

    /// 评分 → 风险等级
    pub fn level(&self, score: i64) -> RiskLevel {
        if score >= self.policy.high_threshold {
            RiskLevel::High
        } else if score >= self.policy.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// 驱动因素（固定顺序）
    pub fn drivers(&self, factors: &RiskFactors<'_>) -> Vec<String> {
        let mut drivers = Vec::new();

        drivers.push(format!("Severity {}", factors.severity));
        let criticality = if factors.criticality.is_empty() {
            "n/a"
        } else {
            factors.criticality
        };
        drivers.push(format!("Criticality {}", criticality));

        if factors.single_source {
            drivers.push("Single-source".to_string());
        }
        if factors.inventory_gap_days > 0.0 {
            drivers.push(format!(
                "Below safety by {} days",
                format_number(factors.inventory_gap_days)
            ));
        }
        if factors.long_lead {
            drivers.push(format!(
                "Lead time {} days",
                format_number(factors.lead_time_days)
            ));
        }
        if factors.time_to_impact {
            drivers.push(format!(
                "Time-to-impact: will run out before next PO (ETA {}d)",
                format_number(factors.next_po_eta_days)
            ));
        }
        if factors.priority_tier != 0.0 {
            drivers.push(format!(
                "Priority tier {}",
                format_number(factors.priority_tier)
            ));
        }
        if factors.weekly_demand != 0.0 {
            drivers.push(format!(
                "Weekly demand {}",
                format_number(factors.weekly_demand)
            ));
        }

        drivers
    }
}

/// 建议动作（等级 + 缺口 + 单一来源）
///
/// HIGH 内部顺序: 缺口优先,其次单一来源,最后常规监控
pub fn recommend_action(level: RiskLevel, inventory_gap_days: f64, single_source: bool) -> &'static str {
    match level {
        RiskLevel::High if inventory_gap_days > 0.0 => ACTION_EXPEDITE,
        RiskLevel::High if single_source => ACTION_EVALUATE_ALTERNATES,
        RiskLevel::High => ACTION_MONITOR,
        RiskLevel::Medium => ACTION_PREPARE,
        RiskLevel::Low => ACTION_INFO,
    }
}

/// 数值渲染: 整数不带小数部分
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
