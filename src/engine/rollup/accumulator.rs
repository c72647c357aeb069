use crate::domain::recommendation::RecommendationRow;
use crate::domain::rollup::{RollupKey, RollupRow, IMPACTED_DELIMITER};
use crate::domain::types::RiskLevel;

// ==========================================
// WorstInventory - 最坏库存快照
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct WorstInventory {
    pub on_hand_days: f64,
    pub in_transit_days: f64,
    pub coverage_days: f64,
    pub safety_stock_days: f64,
    pub lead_time_days: f64,
    pub next_po_eta_days: Option<f64>,
    pub time_to_impact: bool,
    pub market: String,
    pub product: String,
}

impl WorstInventory {
    fn from_row(row: &RecommendationRow) -> Self {
        Self {
            on_hand_days: row.on_hand_days,
            in_transit_days: row.in_transit_days,
            coverage_days: row.coverage_days,
            safety_stock_days: row.safety_stock_days,
            lead_time_days: row.lead_time_days,
            next_po_eta_days: row.next_po_eta_days,
            time_to_impact: row.time_to_impact_flag,
            market: row.market.clone(),
            product: row.product_name.clone(),
        }
    }
}

// ==========================================
// RepresentativeRisk - 代表性评分
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RepresentativeRisk {
    pub risk_score: i64,
    pub risk_level: RiskLevel,
    pub drivers: String,
    pub recommended_action: String,
}

impl RepresentativeRisk {
    fn from_row(row: &RecommendationRow) -> Self {
        Self {
            risk_score: row.risk_score,
            risk_level: row.risk_level,
            drivers: row.drivers_text(),
            recommended_action: row.recommended_action.clone(),
        }
    }
}

// ==========================================
// GroupAccumulator - 分组累加器
// ==========================================
/// 单个 (event, site, material) 分组的累加状态
///
/// 由分组首行初始化（`open`），之后的行通过 `merge` 合并，
/// 最终 `finish` 渲染为 RollupRow。
#[derive(Debug, Clone)]
pub struct GroupAccumulator {
    key: RollupKey,
    header: RecommendationRow,
    impacted_products: Vec<String>,
    impacted_markets: Vec<String>,
    worst: WorstInventory,
    representative: RepresentativeRisk,
    best_priority_tier: f64,
    max_weekly_demand: f64,
    row_count: usize,
}

impl GroupAccumulator {
    /// 以分组首行初始化
    pub fn open(row: &RecommendationRow) -> Self {
        let mut acc = Self {
            key: row.rollup_key(),
            header: row.clone(),
            impacted_products: Vec::new(),
            impacted_markets: Vec::new(),
            worst: WorstInventory::from_row(row),
            representative: RepresentativeRisk::from_row(row),
            best_priority_tier: row.priority_tier,
            max_weekly_demand: row.avg_weekly_demand_units,
            row_count: 1,
        };
        acc.note_impacted(row);
        acc
    }

    /// 合并同组的后续行
    pub fn merge(&mut self, row: &RecommendationRow) {
        debug_assert_eq!(self.key, row.rollup_key());

        self.note_impacted(row);

        if row.coverage_days < self.worst.coverage_days {
            self.worst = WorstInventory::from_row(row);
        }

        self.best_priority_tier = self.best_priority_tier.min(row.priority_tier);
        self.max_weekly_demand = self.max_weekly_demand.max(row.avg_weekly_demand_units);

        if row.risk_score > self.representative.risk_score {
            self.representative = RepresentativeRisk::from_row(row);
        }

        self.row_count += 1;
    }

    fn note_impacted(&mut self, row: &RecommendationRow) {
        push_distinct(&mut self.impacted_products, &row.product_name);
        push_distinct(&mut self.impacted_markets, &row.market);
    }

    pub fn key(&self) -> &RollupKey {
        &self.key
    }

    pub fn worst(&self) -> &WorstInventory {
        &self.worst
    }

    pub fn representative(&self) -> &RepresentativeRisk {
        &self.representative
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 渲染为汇总行
    pub fn finish(self) -> RollupRow {
        let h = self.header;
        RollupRow {
            run_id: h.run_id,
            rollup_id: self.key.rollup_id(),

            event_id: h.event_id,
            event_ts: h.event_ts,
            event_type: h.event_type,
            headline: h.headline,
            source_url: h.source_url,
            country: h.country,
            region: h.region,
            city: h.city,

            site_id: h.site_id,
            supplier_name: h.supplier_name,
            site_name: h.site_name,

            material_id: h.material_id,
            material_name: h.material_name,
            criticality: h.criticality,
            single_source_flag: h.single_source_flag,

            risk_score: self.representative.risk_score,
            risk_level: self.representative.risk_level,
            drivers: self.representative.drivers,
            recommended_action: self.representative.recommended_action,

            impacted_products: self.impacted_products.join(IMPACTED_DELIMITER),
            impacted_markets: self.impacted_markets.join(IMPACTED_DELIMITER),

            worst_on_hand_days: self.worst.on_hand_days,
            worst_in_transit_days: self.worst.in_transit_days,
            worst_coverage_days: self.worst.coverage_days,
            worst_safety_stock_days: self.worst.safety_stock_days,
            worst_lead_time_days: self.worst.lead_time_days,
            worst_next_po_eta_days: self.worst.next_po_eta_days,
            worst_time_to_impact: self.worst.time_to_impact,
            worst_market: self.worst.market,
            worst_product: self.worst.product,

            best_priority_tier: self.best_priority_tier,
            max_weekly_demand: self.max_weekly_demand,
        }
    }
}

// 组内首行的空名称同样跳过, 渲染结果不会出现 ", P2" 这类空项
/// 去重追加（空值跳过,保持首次出现顺序）
fn push_distinct(items: &mut Vec<String>, value: &str) {
    if value.is_empty() || items.iter().any(|v| v == value) {
        return;
    }
    items.push(value.to_string());
}
