// ==========================================
// 供应链风险感知 - CSV 导出器
// ==========================================
// 输出: recommendations.csv / risk_rollup.csv
// 格式: 首行表头, 列序与行结构字段顺序一致
// ==========================================

use crate::domain::recommendation::RecommendationRow;
use crate::domain::rollup::RollupRow;
use crate::exporter::error::{ExportError, ExportResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// 建议行导出文件名
pub const RECOMMENDATIONS_FILE: &str = "recommendations.csv";
/// 汇总行导出文件名
pub const ROLLUPS_FILE: &str = "risk_rollup.csv";

// ==========================================
// CsvExporter
// ==========================================
pub struct CsvExporter {
    out_dir: PathBuf,
}

impl CsvExporter {
    /// 创建导出器（目录不存在时自动创建）
    pub fn new(out_dir: impl AsRef<Path>) -> ExportResult<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir).map_err(|e| ExportError::OutputDirError {
            path: out_dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// 写出建议行
    pub fn write_recommendations(&self, rows: &[RecommendationRow]) -> ExportResult<PathBuf> {
        self.write_rows(RECOMMENDATIONS_FILE, rows)
    }

    /// 写出汇总行
    pub fn write_rollups(&self, rows: &[RollupRow]) -> ExportResult<PathBuf> {
        self.write_rows(ROLLUPS_FILE, rows)
    }

    fn write_rows<T: Serialize>(&self, file_name: &str, rows: &[T]) -> ExportResult<PathBuf> {
        let path = self.out_dir.join(file_name);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = rows.len(), "CSV 导出完成");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::InventorySource;
    use crate::domain::types::RiskLevel;

    fn sample_row() -> RecommendationRow {
        RecommendationRow {
            run_id: "RUN-1".to_string(),
            rec_id: "REC-E1-S1-M1-P1-US".to_string(),
            event_id: "E1".to_string(),
            event_ts: "2026-01-01T00:00:00Z".to_string(),
            event_type: "flood".to_string(),
            headline: "River flooding, port closed".to_string(),
            source_url: String::new(),
            country: "DE".to_string(),
            region: "EU".to_string(),
            city: "Hamburg".to_string(),
            severity: 4,
            site_id: "S1".to_string(),
            supplier_name: "Acme".to_string(),
            site_name: "Acme Hamburg".to_string(),
            material_id: "M1".to_string(),
            material_name: "Resin".to_string(),
            criticality: "A".to_string(),
            single_source_flag: "Y".to_string(),
            product_id: "P1".to_string(),
            product_name: "Widget".to_string(),
            product_family: "Widgets".to_string(),
            market: "US".to_string(),
            avg_weekly_demand_units: 1200.0,
            priority_tier: 1.0,
            on_hand_days: 0.0,
            in_transit_days: 0.0,
            coverage_days: 0.0,
            safety_stock_days: 7.0,
            lead_time_days: 14.0,
            next_po_eta_days: None,
            time_to_impact_flag: false,
            inventory_gap_days: 7.0,
            inventory_source: InventorySource::Default,
            risk_score: 18,
            risk_level: RiskLevel::High,
            drivers: vec!["Severity 4".to_string(), "Criticality A".to_string()],
            recommended_action: "expedite + evaluate alternates now".to_string(),
            auto_override_ready: false,
        }
    }

    #[test]
    fn test_write_recommendations_header_and_drivers() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("out")).unwrap();

        let path = exporter.write_recommendations(&[sample_row()]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("run_id,rec_id,event_id"));
        assert!(header.ends_with("recommended_action,auto_override_ready"));

        let body = lines.next().unwrap();
        assert!(body.contains("Severity 4 | Criticality A"));
        assert!(body.contains("\"River flooding, port closed\""));
        assert!(body.contains(",HIGH,"));
        assert!(body.ends_with(",false"));
    }

    #[test]
    fn test_write_empty_rollups() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();

        let path = exporter.write_rollups(&[]).unwrap();
        assert!(path.ends_with(ROLLUPS_FILE));
        assert!(path.exists());
    }
}
