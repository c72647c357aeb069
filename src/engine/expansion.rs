// ==========================================
// 供应链风险感知 - 展开与评分引擎
// ==========================================
// 职责: 六表连接展开 + 逐行评分 + 建议动作
// 输入: InputSnapshot (事件/站点/依赖/BOM/敞口/库存)
// 输出: RecommendationRow 列表,每条完整连接路径一行
// ==========================================
// 连接链: Event → Site → Dependency → BOM → Exposure → Inventory
// 任一阶段无匹配即剪枝,不输出半截行
// 各阶段使用保序哈希索引,阶段内迭代顺序与输入顺序一致
// ==========================================

use crate::config::ScoringPolicy;
use crate::domain::input::{BomEntry, Dependency, Event, Exposure, InputSnapshot, Site};
use crate::domain::recommendation::RecommendationRow;
use crate::engine::inventory::{InventoryIndex, InventoryMetrics, InventoryPosition};
use crate::engine::scoring::{RiskAssessment, RiskFactors, RiskScorer};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

// ==========================================
// ExpansionEngine - 展开与评分引擎
// ==========================================
pub struct ExpansionEngine {
    scorer: RiskScorer,
}

impl Default for ExpansionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionEngine {
    /// 使用默认策略 (v1) 创建引擎
    pub fn new() -> Self {
        Self {
            scorer: RiskScorer::default(),
        }
    }

    /// 使用指定评分策略创建引擎
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self {
            scorer: RiskScorer::new(policy),
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        self.scorer.policy()
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 展开全部连接路径并评分
    ///
    /// # 参数
    /// - `run_id`: 本次运行标识,写入每一行
    /// - `snapshot`: 输入快照
    ///
    /// # 返回
    /// 建议行列表（事件 → 站点 → 依赖 → BOM → 敞口 的嵌套顺序）
    #[instrument(skip(self, snapshot), fields(events = snapshot.events.len()))]
    pub fn expand(&self, run_id: &str, snapshot: &InputSnapshot) -> Vec<RecommendationRow> {
        let deps_by_site = group_by(&snapshot.dependencies, |d| d.site_id.as_str());
        let bom_by_material = group_by(&snapshot.bom, |b| b.material_id.as_str());
        let exposure_by_product = group_by(&snapshot.exposure, |x| x.product_id.as_str());
        let inventory = InventoryIndex::build(&snapshot.inventory);
        let policy = self.scorer.policy();

        let mut rows = Vec::new();

        for event in &snapshot.events {
            let matched_sites: Vec<&Site> = snapshot
                .sites
                .iter()
                .filter(|s| s.matches_event(event))
                .collect();

            if matched_sites.is_empty() {
                debug!(event_id = %event.event_id, "no site matched event");
                continue;
            }

            for site in matched_sites {
                for dep in lookup(&deps_by_site, &site.site_id) {
                    for bom in lookup(&bom_by_material, &dep.material_id) {
                        for exposure in lookup(&exposure_by_product, &bom.product_id) {
                            let position = InventoryPosition::resolve(
                                &inventory,
                                &bom.product_id,
                                &dep.material_id,
                                &exposure.market,
                                policy,
                            );
                            let metrics = InventoryMetrics::derive(&position, policy);
                            let assessment = self.scorer.assess(&RiskFactors {
                                severity: event.severity,
                                criticality: &dep.criticality,
                                single_source: dep.single_source,
                                inventory_gap_days: metrics.inventory_gap_days,
                                long_lead: metrics.long_lead,
                                lead_time_days: position.lead_time_days,
                                time_to_impact: metrics.time_to_impact,
                                next_po_eta_days: position.next_po_eta_days,
                                priority_tier: exposure.priority_tier,
                                weekly_demand: exposure.avg_weekly_demand_units,
                            });

                            rows.push(build_row(
                                run_id,
                                JoinPath {
                                    event,
                                    site,
                                    dep,
                                    bom,
                                    exposure,
                                },
                                &position,
                                &metrics,
                                assessment,
                            ));
                        }
                    }
                }
            }
        }

        info!(
            run_id,
            rows = rows.len(),
            policy_version = %policy.policy_version,
            "expansion finished"
        );
        rows
    }
}

// ==========================================
// 连接索引
// ==========================================

/// 按键分组（组内保持输入顺序）
fn group_by<'a, T, F>(items: &'a [T], key: F) -> HashMap<&'a str, Vec<&'a T>>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut index: HashMap<&'a str, Vec<&'a T>> = HashMap::new();
    for item in items {
        index.entry(key(item)).or_default().push(item);
    }
    index
}

fn lookup<'i, 'a, T>(index: &'i HashMap<&'a str, Vec<&'a T>>, key: &str) -> &'i [&'a T] {
    index.get(key).map(|v| v.as_slice()).unwrap_or(&[])
}

// ==========================================
// 行构造
// ==========================================

struct JoinPath<'a> {
    event: &'a Event,
    site: &'a Site,
    dep: &'a Dependency,
    bom: &'a BomEntry,
    exposure: &'a Exposure,
}

fn build_row(
    run_id: &str,
    path: JoinPath<'_>,
    position: &InventoryPosition,
    metrics: &InventoryMetrics,
    assessment: RiskAssessment,
) -> RecommendationRow {
    let JoinPath {
        event,
        site,
        dep,
        bom,
        exposure,
    } = path;

    RecommendationRow {
        run_id: run_id.to_string(),
        rec_id: RecommendationRow::make_rec_id(
            &event.event_id,
            &site.site_id,
            &dep.material_id,
            &bom.product_id,
            &exposure.market,
        ),

        event_id: event.event_id.clone(),
        event_ts: event.event_ts.clone(),
        event_type: event.event_type.clone(),
        headline: event.headline.clone(),
        source_url: event.source_url.clone(),
        country: event.country.clone(),
        region: event.region.clone(),
        city: event.city.clone(),
        severity: event.severity,

        site_id: site.site_id.clone(),
        supplier_name: site.supplier_name.clone(),
        site_name: site.site_name.clone(),

        material_id: dep.material_id.clone(),
        material_name: dep.material_name.clone(),
        criticality: dep.criticality.clone(),
        single_source_flag: dep.single_source_flag.clone(),

        product_id: bom.product_id.clone(),
        product_name: bom.product_name.clone(),
        product_family: bom.product_family.clone(),

        market: exposure.market.clone(),
        avg_weekly_demand_units: exposure.avg_weekly_demand_units,
        priority_tier: exposure.priority_tier,

        on_hand_days: position.on_hand_days,
        in_transit_days: position.in_transit_days,
        coverage_days: metrics.coverage_days,
        safety_stock_days: position.safety_stock_days,
        lead_time_days: position.lead_time_days,
        next_po_eta_days: metrics.known_eta_days,
        time_to_impact_flag: metrics.time_to_impact,
        inventory_gap_days: metrics.inventory_gap_days,
        inventory_source: position.source,

        risk_score: assessment.risk_score,
        risk_level: assessment.risk_level,
        drivers: assessment.drivers,
        recommended_action: assessment.recommended_action.to_string(),

        auto_override_ready: false,
    }
}
