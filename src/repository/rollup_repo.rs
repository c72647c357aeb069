// ==========================================
// 供应链风险感知 - 风险汇总数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 主键: (run_id, event_id, site_id, material_id); rollup_id 唯一
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::rollup::RollupRow;
use crate::domain::types::RiskLevel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// RollupRepository - 风险汇总仓储
// ==========================================
pub struct RollupRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RollupRepository {
    /// 创建新的 RollupRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量插入汇总行（单事务，重复键整批回滚）
    pub fn batch_insert(&self, rows: &[RollupRow]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO risk_rollup (
                    run_id, rollup_id, seq_no,
                    event_id, event_ts, event_type, headline, source_url, country, region, city,
                    site_id, supplier_name, site_name,
                    material_id, material_name, criticality, single_source_flag,
                    risk_score, risk_level, drivers, recommended_action,
                    impacted_products, impacted_markets,
                    worst_on_hand_days, worst_in_transit_days, worst_coverage_days,
                    worst_safety_stock_days, worst_lead_time_days, worst_next_po_eta_days,
                    worst_time_to_impact, worst_market, worst_product,
                    best_priority_tier, max_weekly_demand
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                    ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
                    ?33, ?34, ?35
                )
                "#,
            )?;

            for (seq_no, row) in rows.iter().enumerate() {
                stmt.execute(params![
                    row.run_id,
                    row.rollup_id,
                    seq_no as i64,
                    row.event_id,
                    row.event_ts,
                    row.event_type,
                    row.headline,
                    row.source_url,
                    row.country,
                    row.region,
                    row.city,
                    row.site_id,
                    row.supplier_name,
                    row.site_name,
                    row.material_id,
                    row.material_name,
                    row.criticality,
                    row.single_source_flag,
                    row.risk_score,
                    row.risk_level.to_string(),
                    row.drivers,
                    row.recommended_action,
                    row.impacted_products,
                    row.impacted_markets,
                    row.worst_on_hand_days,
                    row.worst_in_transit_days,
                    row.worst_coverage_days,
                    row.worst_safety_stock_days,
                    row.worst_lead_time_days,
                    row.worst_next_po_eta_days,
                    row.worst_time_to_impact,
                    row.worst_market,
                    row.worst_product,
                    row.best_priority_tier,
                    row.max_weekly_demand,
                ])?;
                count += 1;
            }
        }

        tx.commit()?;
        Ok(count)
    }

    /// 查询某次运行的汇总行（按汇总输出顺序）
    pub fn list_by_run(&self, run_id: &str) -> RepositoryResult<Vec<RollupRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                run_id, rollup_id,
                event_id, event_ts, event_type, headline, source_url, country, region, city,
                site_id, supplier_name, site_name,
                material_id, material_name, criticality, single_source_flag,
                risk_score, risk_level, drivers, recommended_action,
                impacted_products, impacted_markets,
                worst_on_hand_days, worst_in_transit_days, worst_coverage_days,
                worst_safety_stock_days, worst_lead_time_days, worst_next_po_eta_days,
                worst_time_to_impact, worst_market, worst_product,
                best_priority_tier, max_weekly_demand
            FROM risk_rollup
            WHERE run_id = ?1
            ORDER BY seq_no
            "#,
        )?;
        let rows = stmt
            .query_map(params![run_id], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 按风险等级统计某次运行的汇总行数
    pub fn count_by_level(&self, run_id: &str, level: RiskLevel) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM risk_rollup WHERE run_id = ?1 AND risk_level = ?2",
            params![run_id, level.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<RollupRow> {
    Ok(RollupRow {
        run_id: row.get(0)?,
        rollup_id: row.get(1)?,
        event_id: row.get(2)?,
        event_ts: row.get(3)?,
        event_type: row.get(4)?,
        headline: row.get(5)?,
        source_url: row.get(6)?,
        country: row.get(7)?,
        region: row.get(8)?,
        city: row.get(9)?,
        site_id: row.get(10)?,
        supplier_name: row.get(11)?,
        site_name: row.get(12)?,
        material_id: row.get(13)?,
        material_name: row.get(14)?,
        criticality: row.get(15)?,
        single_source_flag: row.get(16)?,
        risk_score: row.get(17)?,
        risk_level: RiskLevel::from_str(&row.get::<_, String>(18)?),
        drivers: row.get(19)?,
        recommended_action: row.get(20)?,
        impacted_products: row.get(21)?,
        impacted_markets: row.get(22)?,
        worst_on_hand_days: row.get(23)?,
        worst_in_transit_days: row.get(24)?,
        worst_coverage_days: row.get(25)?,
        worst_safety_stock_days: row.get(26)?,
        worst_lead_time_days: row.get(27)?,
        worst_next_po_eta_days: row.get(28)?,
        worst_time_to_impact: row.get(29)?,
        worst_market: row.get(30)?,
        worst_product: row.get(31)?,
        best_priority_tier: row.get(32)?,
        max_weekly_demand: row.get(33)?,
    })
}
