// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use supply_sensing::domain::input::{
    BomEntry, Dependency, Event, Exposure, InputSnapshot, InventoryRecord, Site,
};

// ==========================================
// Event 构建器
// ==========================================

pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(event_id: &str) -> Self {
        Self {
            event: Event {
                event_id: event_id.to_string(),
                event_ts: "2026-01-20T08:00:00Z".to_string(),
                event_type: "PORT_CLOSURE".to_string(),
                headline: format!("Disruption {}", event_id),
                source_url: format!("https://news.example/{}", event_id),
                severity: 3,
                ..Default::default()
            },
        }
    }

    pub fn region(mut self, region: &str) -> Self {
        self.event.region = region.to_string();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.event.country = country.to_string();
        self
    }

    pub fn severity(mut self, severity: i64) -> Self {
        self.event.severity = severity;
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

// ==========================================
// Site 构建器
// ==========================================

pub struct SiteBuilder {
    site: Site,
}

impl SiteBuilder {
    pub fn new(site_id: &str) -> Self {
        Self {
            site: Site {
                site_id: site_id.to_string(),
                supplier_name: format!("Supplier {}", site_id),
                site_name: format!("Plant {}", site_id),
                ..Default::default()
            },
        }
    }

    pub fn region(mut self, region: &str) -> Self {
        self.site.region = region.to_string();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.site.country = country.to_string();
        self
    }

    pub fn build(self) -> Site {
        self.site
    }
}

// ==========================================
// Dependency 构建器
// ==========================================

pub struct DependencyBuilder {
    dep: Dependency,
}

impl DependencyBuilder {
    pub fn new(site_id: &str, material_id: &str) -> Self {
        Self {
            dep: Dependency {
                site_id: site_id.to_string(),
                material_id: material_id.to_string(),
                material_name: format!("Material {}", material_id),
                criticality: "C".to_string(),
                single_source_flag: "N".to_string(),
                single_source: false,
            },
        }
    }

    pub fn criticality(mut self, criticality: &str) -> Self {
        self.dep.criticality = criticality.to_string();
        self
    }

    pub fn single_source(mut self) -> Self {
        self.dep.single_source_flag = "Y".to_string();
        self.dep.single_source = true;
        self
    }

    pub fn build(self) -> Dependency {
        self.dep
    }
}

/// BOM 行
pub fn bom(material_id: &str, product_id: &str) -> BomEntry {
    BomEntry {
        material_id: material_id.to_string(),
        product_id: product_id.to_string(),
        product_name: format!("Product {}", product_id),
        product_family: "Family".to_string(),
    }
}

/// 市场敞口行
pub fn exposure(product_id: &str, market: &str, tier: f64, demand: f64) -> Exposure {
    Exposure {
        product_id: product_id.to_string(),
        market: market.to_string(),
        avg_weekly_demand_units: demand,
        priority_tier: tier,
    }
}

// ==========================================
// InventoryRecord 构建器
// ==========================================

pub struct InventoryBuilder {
    record: InventoryRecord,
}

impl InventoryBuilder {
    /// 按 (product_id, market) 建档
    pub fn for_product(product_id: &str, market: &str) -> Self {
        Self::with_keys(Some(product_id), None, market)
    }

    /// 按 (material_id, market) 建档
    pub fn for_material(material_id: &str, market: &str) -> Self {
        Self::with_keys(None, Some(material_id), market)
    }

    fn with_keys(product_id: Option<&str>, material_id: Option<&str>, market: &str) -> Self {
        Self {
            record: InventoryRecord {
                product_id: product_id.map(|s| s.to_string()),
                material_id: material_id.map(|s| s.to_string()),
                market: market.to_string(),
                on_hand_days: 20.0,
                in_transit_days: 0.0,
                safety_stock_days: 7.0,
                lead_time_days: 14.0,
                next_po_eta_days: 999.0,
            },
        }
    }

    pub fn on_hand(mut self, days: f64) -> Self {
        self.record.on_hand_days = days;
        self
    }

    pub fn in_transit(mut self, days: f64) -> Self {
        self.record.in_transit_days = days;
        self
    }

    pub fn safety_stock(mut self, days: f64) -> Self {
        self.record.safety_stock_days = days;
        self
    }

    pub fn lead_time(mut self, days: f64) -> Self {
        self.record.lead_time_days = days;
        self
    }

    pub fn next_po_eta(mut self, days: f64) -> Self {
        self.record.next_po_eta_days = days;
        self
    }

    pub fn build(self) -> InventoryRecord {
        self.record
    }
}

// ==========================================
// 典型快照
// ==========================================

/// 单链路: EU 事件(sev 4) → EU 站点 → A 类单一来源物料 → 产品 → US 市场(tier 1, 1200/周), 无库存
pub fn single_chain_snapshot() -> InputSnapshot {
    InputSnapshot {
        events: vec![EventBuilder::new("E1").region("EU").severity(4).build()],
        sites: vec![SiteBuilder::new("S1").region("EU").country("DE").build()],
        dependencies: vec![DependencyBuilder::new("S1", "M1")
            .criticality("A")
            .single_source()
            .build()],
        bom: vec![bom("M1", "P1")],
        exposure: vec![exposure("P1", "US", 1.0, 1200.0)],
        inventory: vec![],
    }
}

/// 扇出链路: 1 事件 → 1 站点 → 1 物料 → 2 产品 → 各 2 市场
pub fn fan_out_snapshot() -> InputSnapshot {
    InputSnapshot {
        events: vec![EventBuilder::new("E1").country("DE").severity(3).build()],
        sites: vec![SiteBuilder::new("S1").region("EU").country("DE").build()],
        dependencies: vec![DependencyBuilder::new("S1", "M1").criticality("B").build()],
        bom: vec![bom("M1", "P1"), bom("M1", "P2")],
        exposure: vec![
            exposure("P1", "US", 2.0, 600.0),
            exposure("P1", "EU", 3.0, 100.0),
            exposure("P2", "US", 1.0, 50.0),
            exposure("P2", "APAC", 0.0, 0.0),
        ],
        inventory: vec![
            InventoryBuilder::for_product("P1", "US").on_hand(3.0).build(),
            InventoryBuilder::for_material("M1", "EU").on_hand(12.0).build(),
            InventoryBuilder::for_product("P2", "US")
                .on_hand(2.0)
                .in_transit(1.0)
                .lead_time(45.0)
                .next_po_eta(10.0)
                .build(),
        ],
    }
}
