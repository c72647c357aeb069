// ==========================================
// 供应链风险感知 - 建议行领域模型
// ==========================================
// 一行 = 事件 × 站点 × 物料 × 产品 × 市场 的一条完整连接路径
// 红线: auto_override_ready 恒为 false,输出仅供计划员参考
// ==========================================

use crate::domain::rollup::RollupKey;
use crate::domain::types::{compose_id, RiskLevel};
use serde::{Serialize, Serializer};

/// 驱动因素对外渲染分隔符
pub const DRIVER_DELIMITER: &str = " | ";

// ==========================================
// InventorySource - 库存记录来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventorySource {
    ProductMarket,  // 按 (product_id, market) 命中
    MaterialMarket, // 回退到 (material_id, market)
    Default,        // 均未命中,使用保守默认值
}

impl InventorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventorySource::ProductMarket => "PRODUCT_MARKET",
            InventorySource::MaterialMarket => "MATERIAL_MARKET",
            InventorySource::Default => "DEFAULT",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "PRODUCT_MARKET" => InventorySource::ProductMarket,
            "MATERIAL_MARKET" => InventorySource::MaterialMarket,
            _ => InventorySource::Default,
        }
    }
}

// ==========================================
// RecommendationRow - 建议行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRow {
    pub run_id: String,
    pub rec_id: String,

    // ===== 事件证据 =====
    pub event_id: String,
    pub event_ts: String,
    pub event_type: String,
    pub headline: String,
    pub source_url: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub severity: i64,

    // ===== 供应链上下文 =====
    pub site_id: String,
    pub supplier_name: String,
    pub site_name: String,

    pub material_id: String,
    pub material_name: String,
    pub criticality: String,
    pub single_source_flag: String,

    pub product_id: String,
    pub product_name: String,
    pub product_family: String,

    pub market: String,
    pub avg_weekly_demand_units: f64,
    pub priority_tier: f64,

    // ===== 库存 =====
    pub on_hand_days: f64,
    pub in_transit_days: f64,
    pub coverage_days: f64,
    pub safety_stock_days: f64,
    pub lead_time_days: f64,
    pub next_po_eta_days: Option<f64>, // 哨兵值(未知 ETA)输出为空
    pub time_to_impact_flag: bool,
    pub inventory_gap_days: f64,
    pub inventory_source: InventorySource,

    // ===== 输出 =====
    pub risk_score: i64,
    pub risk_level: RiskLevel,
    #[serde(serialize_with = "serialize_drivers")]
    pub drivers: Vec<String>,
    pub recommended_action: String,

    // ===== 安全标记 =====
    pub auto_override_ready: bool,
}

impl RecommendationRow {
    /// 生成建议行 ID（五个连接键, 键内 `-` 转义）
    pub fn make_rec_id(
        event_id: &str,
        site_id: &str,
        material_id: &str,
        product_id: &str,
        market: &str,
    ) -> String {
        compose_id("REC", &[event_id, site_id, material_id, product_id, market])
    }

    /// 驱动因素渲染为单个字符串
    pub fn drivers_text(&self) -> String {
        self.drivers.join(DRIVER_DELIMITER)
    }

    /// 汇总分组键 (event, site, material)
    pub fn rollup_key(&self) -> RollupKey {
        RollupKey {
            event_id: self.event_id.clone(),
            site_id: self.site_id.clone(),
            material_id: self.material_id.clone(),
        }
    }
}

/// 将驱动因素列表序列化为分隔字符串
pub fn serialize_drivers<S>(drivers: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&drivers.join(DRIVER_DELIMITER))
}

/// 分隔字符串还原为驱动因素列表
pub fn split_drivers(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(DRIVER_DELIMITER).map(|s| s.to_string()).collect()
}
