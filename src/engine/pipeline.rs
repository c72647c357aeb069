// ==========================================
// 供应链风险感知 - 运行编排
// ==========================================
// 职责: 按顺序执行 展开评分 → 汇总, 为整批行打上同一 run_id
// 红线: 不做 I/O,不保留跨运行状态
// ==========================================

use crate::config::ScoringPolicy;
use crate::domain::input::InputSnapshot;
use crate::domain::recommendation::RecommendationRow;
use crate::domain::rollup::RollupRow;
use crate::domain::types::RiskLevel;
use crate::engine::expansion::ExpansionEngine;
use crate::engine::rollup::RollupEngine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{info, instrument};

/// 生成运行标识: RUN-{UTC 时间戳}
pub fn generate_run_id(now: DateTime<Utc>) -> String {
    format!("RUN-{}", now.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ==========================================
// PipelineResult - 单次运行结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub run_id: String,
    pub policy_version: String,
    pub recommendations: Vec<RecommendationRow>,
    pub rollups: Vec<RollupRow>,
}

/// 运行摘要（日志/CLI 输出）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub policy_version: String,
    pub recommendation_count: usize,
    pub rollup_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
}

impl PipelineResult {
    pub fn summary(&self) -> RunSummary {
        let count = |level: RiskLevel| self.rollups.iter().filter(|r| r.risk_level == level).count();
        RunSummary {
            run_id: self.run_id.clone(),
            policy_version: self.policy_version.clone(),
            recommendation_count: self.recommendations.len(),
            rollup_count: self.rollups.len(),
            high_count: count(RiskLevel::High),
            medium_count: count(RiskLevel::Medium),
            low_count: count(RiskLevel::Low),
        }
    }
}

// ==========================================
// SensingPipeline - 运行编排器
// ==========================================
pub struct SensingPipeline {
    expansion: ExpansionEngine,
    rollup: RollupEngine,
}

impl Default for SensingPipeline {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

impl SensingPipeline {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            expansion: ExpansionEngine::with_policy(policy),
            rollup: RollupEngine::new(),
        }
    }

    /// 执行一次完整运行
    #[instrument(skip(self, snapshot))]
    pub fn run(&self, run_id: &str, snapshot: &InputSnapshot) -> PipelineResult {
        let recommendations = self.expansion.expand(run_id, snapshot);
        let rollups = self.rollup.rollup(&recommendations);

        let result = PipelineResult {
            run_id: run_id.to_string(),
            policy_version: self.expansion.policy().policy_version.clone(),
            recommendations,
            rollups,
        };

        let summary = result.summary();
        info!(
            recommendations = summary.recommendation_count,
            rollups = summary.rollup_count,
            high = summary.high_count,
            medium = summary.medium_count,
            low = summary.low_count,
            "run finished"
        );
        result
    }
}
