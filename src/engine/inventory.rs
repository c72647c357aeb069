// ==========================================
// 供应链风险感知 - 库存定位与派生指标
// ==========================================
// 职责: 为每个 产品×市场 解析唯一一条库存记录,并派生覆盖天数等指标
// 查找顺序: (product_id, market) → (material_id, market) → 保守默认值
// ==========================================

use crate::config::ScoringPolicy;
use crate::domain::input::InventoryRecord;
use crate::domain::recommendation::InventorySource;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// InventoryIndex - 库存双键索引
// ==========================================
pub struct InventoryIndex<'a> {
    by_product: HashMap<(&'a str, &'a str), &'a InventoryRecord>,
    by_material: HashMap<(&'a str, &'a str), &'a InventoryRecord>,
}

impl<'a> InventoryIndex<'a> {
    /// 构建索引
    ///
    /// 同一键出现多条记录属于输入契约违规：保留输入顺序中的第一条并告警。
    pub fn build(records: &'a [InventoryRecord]) -> Self {
        let mut by_product = HashMap::new();
        let mut by_material = HashMap::new();

        for record in records {
            let market = record.market.as_str();

            if let Some(product_id) = record.product_id.as_deref() {
                Self::insert_first(&mut by_product, (product_id, market), record, "product_id");
            }
            if let Some(material_id) = record.material_id.as_deref() {
                Self::insert_first(&mut by_material, (material_id, market), record, "material_id");
            }
        }

        Self {
            by_product,
            by_material,
        }
    }

    fn insert_first(
        index: &mut HashMap<(&'a str, &'a str), &'a InventoryRecord>,
        key: (&'a str, &'a str),
        record: &'a InventoryRecord,
        key_name: &str,
    ) {
        match index.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(_) => {
                warn!(
                    key_name,
                    id = key.0,
                    market = key.1,
                    "duplicate inventory key, keeping first record"
                );
            }
        }
    }

    /// 解析库存记录（命中时返回记录与来源）
    pub fn resolve(
        &self,
        product_id: &str,
        material_id: &str,
        market: &str,
    ) -> Option<(&'a InventoryRecord, InventorySource)> {
        if let Some(record) = self.by_product.get(&(product_id, market)) {
            return Some((*record, InventorySource::ProductMarket));
        }
        self.by_material
            .get(&(material_id, market))
            .map(|record| (*record, InventorySource::MaterialMarket))
    }
}

// ==========================================
// InventoryPosition - 已解析的库存头寸
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryPosition {
    pub on_hand_days: f64,
    pub in_transit_days: f64,
    pub safety_stock_days: f64,
    pub lead_time_days: f64,
    pub next_po_eta_days: f64,
    pub source: InventorySource,
}

impl InventoryPosition {
    pub fn from_record(record: &InventoryRecord, source: InventorySource) -> Self {
        Self {
            on_hand_days: record.on_hand_days,
            in_transit_days: record.in_transit_days,
            safety_stock_days: record.safety_stock_days,
            lead_time_days: record.lead_time_days,
            next_po_eta_days: record.next_po_eta_days,
            source,
        }
    }

    /// 库存缺失时的保守默认值,避免评分被低估
    pub fn conservative_default(policy: &ScoringPolicy) -> Self {
        Self {
            on_hand_days: 0.0,
            in_transit_days: 0.0,
            safety_stock_days: policy.default_safety_stock_days,
            lead_time_days: policy.default_lead_time_days,
            next_po_eta_days: policy.unknown_eta_days,
            source: InventorySource::Default,
        }
    }

    /// 按回退链解析
    pub fn resolve(
        index: &InventoryIndex<'_>,
        product_id: &str,
        material_id: &str,
        market: &str,
        policy: &ScoringPolicy,
    ) -> Self {
        match index.resolve(product_id, material_id, market) {
            Some((record, source)) => Self::from_record(record, source),
            None => Self::conservative_default(policy),
        }
    }
}

// ==========================================
// InventoryMetrics - 派生库存指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryMetrics {
    pub coverage_days: f64,
    pub time_to_impact: bool,
    pub inventory_gap_days: f64,
    pub long_lead: bool,
    /// ETA 为哨兵值时为 None
    pub known_eta_days: Option<f64>,
}

impl InventoryMetrics {
    /// 计算派生指标
    ///
    /// - coverage = on_hand + in_transit
    /// - time_to_impact = coverage < eta 且 eta < 哨兵
    /// - gap = max(0, safety - coverage)
    /// - long_lead = lead >= 阈值
    pub fn derive(position: &InventoryPosition, policy: &ScoringPolicy) -> Self {
        let coverage_days = position.on_hand_days + position.in_transit_days;
        let eta = position.next_po_eta_days;
        let eta_known = eta < policy.unknown_eta_days;

        Self {
            coverage_days,
            time_to_impact: coverage_days < eta && eta_known,
            inventory_gap_days: (position.safety_stock_days - coverage_days).max(0.0),
            long_lead: position.lead_time_days >= policy.long_lead_days,
            known_eta_days: if eta_known { Some(eta) } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        product_id: Option<&str>,
        material_id: Option<&str>,
        market: &str,
        on_hand: f64,
    ) -> InventoryRecord {
        InventoryRecord {
            product_id: product_id.map(|s| s.to_string()),
            material_id: material_id.map(|s| s.to_string()),
            market: market.to_string(),
            on_hand_days: on_hand,
            in_transit_days: 2.0,
            safety_stock_days: 10.0,
            lead_time_days: 21.0,
            next_po_eta_days: 15.0,
        }
    }

    #[test]
    fn test_resolve_prefers_product_market() {
        let records = vec![
            record(None, Some("M1"), "US", 1.0),
            record(Some("P1"), None, "US", 5.0),
        ];
        let index = InventoryIndex::build(&records);
        let (rec, source) = index.resolve("P1", "M1", "US").unwrap();
        assert_eq!(source, InventorySource::ProductMarket);
        assert_eq!(rec.on_hand_days, 5.0);
    }

    #[test]
    fn test_resolve_falls_back_to_material_market() {
        let records = vec![record(None, Some("M1"), "US", 1.0)];
        let index = InventoryIndex::build(&records);
        let (rec, source) = index.resolve("P1", "M1", "US").unwrap();
        assert_eq!(source, InventorySource::MaterialMarket);
        assert_eq!(rec.on_hand_days, 1.0);
    }

    #[test]
    fn test_resolve_market_must_match() {
        let records = vec![record(Some("P1"), Some("M1"), "EU", 1.0)];
        let index = InventoryIndex::build(&records);
        assert!(index.resolve("P1", "M1", "US").is_none());
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let records = vec![
            record(Some("P1"), None, "US", 3.0),
            record(Some("P1"), None, "US", 9.0),
        ];
        let index = InventoryIndex::build(&records);
        let (rec, _) = index.resolve("P1", "M1", "US").unwrap();
        assert_eq!(rec.on_hand_days, 3.0);
    }

    #[test]
    fn test_conservative_default_metrics() {
        let policy = ScoringPolicy::default();
        let index = InventoryIndex::build(&[]);
        let position = InventoryPosition::resolve(&index, "P1", "M1", "US", &policy);
        assert_eq!(position.source, InventorySource::Default);

        let metrics = InventoryMetrics::derive(&position, &policy);
        assert_eq!(metrics.coverage_days, 0.0);
        assert_eq!(metrics.inventory_gap_days, 7.0);
        assert!(!metrics.time_to_impact);
        assert!(!metrics.long_lead);
        assert_eq!(metrics.known_eta_days, None);
    }

    #[test]
    fn test_time_to_impact_requires_finite_eta() {
        let policy = ScoringPolicy::default();
        let mut position = InventoryPosition::conservative_default(&policy);
        position.on_hand_days = 3.0;
        position.next_po_eta_days = 10.0;
        let metrics = InventoryMetrics::derive(&position, &policy);
        assert!(metrics.time_to_impact);
        assert_eq!(metrics.known_eta_days, Some(10.0));

        position.next_po_eta_days = 3.0;
        assert!(!InventoryMetrics::derive(&position, &policy).time_to_impact);
    }

    #[test]
    fn test_long_lead_threshold_inclusive() {
        let policy = ScoringPolicy::default();
        let mut position = InventoryPosition::conservative_default(&policy);
        position.lead_time_days = 30.0;
        assert!(InventoryMetrics::derive(&position, &policy).long_lead);
        position.lead_time_days = 29.0;
        assert!(!InventoryMetrics::derive(&position, &policy).long_lead);
    }
}
