// ==========================================
// 供应链风险感知 - 输入表领域模型
// ==========================================
// 六张输入表: 事件 / 站点 / 依赖 / BOM / 市场敞口 / 库存
// 所有字段在导入边界完成默认值填充,引擎内不做字段猜测
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Event - 外部事件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub event_ts: String,
    pub event_type: String,
    pub headline: String,
    pub source_url: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub severity: i64, // 通常 1~5
}

// ==========================================
// Site - 供应商/制造站点
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub site_id: String,
    pub region: String,
    pub country: String,
    pub supplier_name: String,
    pub site_name: String,
}

impl Site {
    /// 站点是否受事件影响（区域相等 或 国家相等,两侧均需非空）
    pub fn matches_event(&self, event: &Event) -> bool {
        let region_hit =
            !self.region.is_empty() && !event.region.is_empty() && self.region == event.region;
        let country_hit =
            !self.country.is_empty() && !event.country.is_empty() && self.country == event.country;
        region_hit || country_hit
    }
}

// ==========================================
// Dependency - 站点 → 物料依赖
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub site_id: String,
    pub material_id: String,
    pub material_name: String,
    pub criticality: String,        // A / B / C
    pub single_source_flag: String, // 原始标记 (Y/N)
    pub single_source: bool,        // 解析结果
}

// ==========================================
// BomEntry - 物料 → 产品
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomEntry {
    pub material_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_family: String,
}

// ==========================================
// Exposure - 产品 → 市场需求敞口
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    pub product_id: String,
    pub market: String,
    pub avg_weekly_demand_units: f64,
    pub priority_tier: f64,
}

// ==========================================
// InventoryRecord - 库存头寸
// ==========================================
// 主键为回退链: (product_id, market) 优先,否则 (material_id, market)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id: Option<String>,
    pub material_id: Option<String>,
    pub market: String,
    pub on_hand_days: f64,
    pub in_transit_days: f64,
    pub safety_stock_days: f64,
    pub lead_time_days: f64,
    pub next_po_eta_days: f64,
}

// ==========================================
// InputSnapshot - 单次运行的输入快照
// ==========================================
// 一次运行只读取一份固定快照,引擎不修改任何输入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub events: Vec<Event>,
    pub sites: Vec<Site>,
    pub dependencies: Vec<Dependency>,
    pub bom: Vec<BomEntry>,
    pub exposure: Vec<Exposure>,
    pub inventory: Vec<InventoryRecord>,
}

impl InputSnapshot {
    /// 各表行数（日志用）
    pub fn table_sizes(&self) -> [(&'static str, usize); 6] {
        [
            ("events", self.events.len()),
            ("sites", self.sites.len()),
            ("dependencies", self.dependencies.len()),
            ("bom", self.bom.len()),
            ("exposure", self.exposure.len()),
            ("inventory", self.inventory.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(region: &str, country: &str) -> Site {
        Site {
            site_id: "S1".to_string(),
            region: region.to_string(),
            country: country.to_string(),
            ..Default::default()
        }
    }

    fn event(region: &str, country: &str) -> Event {
        Event {
            event_id: "E1".to_string(),
            region: region.to_string(),
            country: country.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_site_matches_by_region_or_country() {
        assert!(site("EU", "").matches_event(&event("EU", "")));
        assert!(site("", "DE").matches_event(&event("", "DE")));
        assert!(site("APAC", "DE").matches_event(&event("EU", "DE")));
        assert!(!site("APAC", "CN").matches_event(&event("EU", "DE")));
    }

    #[test]
    fn test_empty_fields_never_match() {
        assert!(!site("", "").matches_event(&event("", "")));
        assert!(!site("", "DE").matches_event(&event("EU", "")));
    }
}
