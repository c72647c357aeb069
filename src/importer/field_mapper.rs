// ==========================================
// 供应链风险感知 - 字段映射器
// ==========================================
// 职责: 原始行(列名 → 文本) → 强类型输入记录
// 规则: 字符串缺失为空串; 数值宽松转换; 库存键缺失为 None
// ==========================================

use crate::domain::input::{BomEntry, Dependency, Event, Exposure, InventoryRecord, Site};
use crate::importer::data_cleaner::DataCleaner;
use std::collections::HashMap;

/// 原始行
pub type RawRow = HashMap<String, String>;

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    pub fn map_event(&self, row: &RawRow) -> Event {
        Event {
            event_id: self.get_text(row, "event_id"),
            event_ts: self.get_text(row, "event_ts"),
            event_type: self.get_text(row, "event_type"),
            headline: self.get_text(row, "headline"),
            source_url: self.get_text(row, "source_url"),
            country: self.get_text(row, "country"),
            region: self.get_text(row, "region"),
            city: self.get_text(row, "city"),
            severity: self.cleaner.to_int(&self.get_text(row, "severity")),
        }
    }

    pub fn map_site(&self, row: &RawRow) -> Site {
        Site {
            site_id: self.get_text(row, "site_id"),
            region: self.get_text(row, "region"),
            country: self.get_text(row, "country"),
            supplier_name: self.get_text(row, "supplier_name"),
            site_name: self.get_text(row, "site_name"),
        }
    }

    pub fn map_dependency(&self, row: &RawRow) -> Dependency {
        let flag = self.get_text(row, "single_source_flag");
        Dependency {
            site_id: self.get_text(row, "site_id"),
            material_id: self.get_text(row, "material_id"),
            material_name: self.get_text(row, "material_name"),
            criticality: self.get_text(row, "criticality"),
            single_source: self.cleaner.is_yes_flag(&flag),
            single_source_flag: flag,
        }
    }

    pub fn map_bom(&self, row: &RawRow) -> BomEntry {
        BomEntry {
            material_id: self.get_text(row, "material_id"),
            product_id: self.get_text(row, "product_id"),
            product_name: self.get_text(row, "product_name"),
            product_family: self.get_text(row, "product_family"),
        }
    }

    pub fn map_exposure(&self, row: &RawRow) -> Exposure {
        Exposure {
            product_id: self.get_text(row, "product_id"),
            market: self.get_text(row, "market"),
            avg_weekly_demand_units: self.get_num(row, "avg_weekly_demand_units"),
            priority_tier: self.get_num(row, "priority_tier"),
        }
    }

    pub fn map_inventory(&self, row: &RawRow) -> InventoryRecord {
        InventoryRecord {
            product_id: self.get_optional(row, "product_id"),
            material_id: self.get_optional(row, "material_id"),
            market: self.get_text(row, "market"),
            on_hand_days: self.get_num(row, "on_hand_days"),
            in_transit_days: self.get_num(row, "in_transit_days"),
            safety_stock_days: self.get_num(row, "safety_stock_days"),
            lead_time_days: self.get_num(row, "lead_time_days"),
            next_po_eta_days: self.get_num(row, "next_po_eta_days"),
        }
    }

    /// 提取字段（返回 Option），支持多个可能的列名（别名）
    fn get_optional(&self, row: &RawRow, key: &str) -> Option<String> {
        // 定义列名别名映射
        let aliases: &[&str] = match key {
            "single_source_flag" => &["single_source_flag", "single_source"],
            "avg_weekly_demand_units" => &["avg_weekly_demand_units", "avg_weekly_demand"],
            "next_po_eta_days" => &["next_po_eta_days", "next_po_eta"],
            "event_ts" => &["event_ts", "timestamp"],
            _ => &[],
        };

        std::iter::once(key)
            .chain(aliases.iter().copied())
            .filter_map(|alias| row.get(alias))
            .find_map(|v| self.cleaner.normalize_null(Some(v.clone())))
    }

    fn get_text(&self, row: &RawRow, key: &str) -> String {
        self.get_optional(row, key).unwrap_or_default()
    }

    fn get_num(&self, row: &RawRow, key: &str) -> f64 {
        self.get_optional(row, key)
            .map(|v| self.cleaner.to_num(&v))
            .unwrap_or(0.0)
    }
}
