// ==========================================
// 供应链风险感知 - 建议行数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 主键: (run_id, 五个连接键); rec_id 唯一; seq_no 保留引擎输出顺序
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::recommendation::{split_drivers, InventorySource, RecommendationRow};
use crate::domain::types::RiskLevel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    run_id, rec_id,
    event_id, event_ts, event_type, headline, source_url, country, region, city, severity,
    site_id, supplier_name, site_name,
    material_id, material_name, criticality, single_source_flag,
    product_id, product_name, product_family,
    market, avg_weekly_demand_units, priority_tier,
    on_hand_days, in_transit_days, coverage_days, safety_stock_days, lead_time_days,
    next_po_eta_days, time_to_impact_flag, inventory_gap_days, inventory_source,
    risk_score, risk_level, drivers, recommended_action, auto_override_ready
"#;

// ==========================================
// RecommendationRepository - 建议行仓储
// ==========================================
pub struct RecommendationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RecommendationRepository {
    /// 创建新的 RecommendationRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量插入建议行（单事务，重复键整批回滚）
    ///
    /// # 返回
    /// - Ok(usize): 成功插入的记录数
    pub fn batch_insert(&self, rows: &[RecommendationRow]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO recommendation (
                    run_id, rec_id, seq_no,
                    event_id, event_ts, event_type, headline, source_url, country, region, city, severity,
                    site_id, supplier_name, site_name,
                    material_id, material_name, criticality, single_source_flag,
                    product_id, product_name, product_family,
                    market, avg_weekly_demand_units, priority_tier,
                    on_hand_days, in_transit_days, coverage_days, safety_stock_days, lead_time_days,
                    next_po_eta_days, time_to_impact_flag, inventory_gap_days, inventory_source,
                    risk_score, risk_level, drivers, recommended_action, auto_override_ready
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                    ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
                    ?33, ?34, ?35, ?36, ?37, ?38, ?39
                )
                "#,
            )?;

            for (seq_no, row) in rows.iter().enumerate() {
                stmt.execute(params![
                    row.run_id,
                    row.rec_id,
                    seq_no as i64,
                    row.event_id,
                    row.event_ts,
                    row.event_type,
                    row.headline,
                    row.source_url,
                    row.country,
                    row.region,
                    row.city,
                    row.severity,
                    row.site_id,
                    row.supplier_name,
                    row.site_name,
                    row.material_id,
                    row.material_name,
                    row.criticality,
                    row.single_source_flag,
                    row.product_id,
                    row.product_name,
                    row.product_family,
                    row.market,
                    row.avg_weekly_demand_units,
                    row.priority_tier,
                    row.on_hand_days,
                    row.in_transit_days,
                    row.coverage_days,
                    row.safety_stock_days,
                    row.lead_time_days,
                    row.next_po_eta_days,
                    row.time_to_impact_flag,
                    row.inventory_gap_days,
                    row.inventory_source.as_str(),
                    row.risk_score,
                    row.risk_level.to_string(),
                    row.drivers_text(),
                    row.recommended_action,
                    row.auto_override_ready,
                ])?;
                count += 1;
            }
        }

        tx.commit()?;
        Ok(count)
    }

    /// 统计某次运行的建议行数
    pub fn count_by_run(&self, run_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM recommendation WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// 查询某次运行的全部建议行（按引擎输出顺序）
    pub fn list_by_run(&self, run_id: &str) -> RepositoryResult<Vec<RecommendationRow>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM recommendation WHERE run_id = ?1 ORDER BY seq_no",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![run_id], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<RecommendationRow> {
    Ok(RecommendationRow {
        run_id: row.get(0)?,
        rec_id: row.get(1)?,
        event_id: row.get(2)?,
        event_ts: row.get(3)?,
        event_type: row.get(4)?,
        headline: row.get(5)?,
        source_url: row.get(6)?,
        country: row.get(7)?,
        region: row.get(8)?,
        city: row.get(9)?,
        severity: row.get(10)?,
        site_id: row.get(11)?,
        supplier_name: row.get(12)?,
        site_name: row.get(13)?,
        material_id: row.get(14)?,
        material_name: row.get(15)?,
        criticality: row.get(16)?,
        single_source_flag: row.get(17)?,
        product_id: row.get(18)?,
        product_name: row.get(19)?,
        product_family: row.get(20)?,
        market: row.get(21)?,
        avg_weekly_demand_units: row.get(22)?,
        priority_tier: row.get(23)?,
        on_hand_days: row.get(24)?,
        in_transit_days: row.get(25)?,
        coverage_days: row.get(26)?,
        safety_stock_days: row.get(27)?,
        lead_time_days: row.get(28)?,
        next_po_eta_days: row.get(29)?,
        time_to_impact_flag: row.get(30)?,
        inventory_gap_days: row.get(31)?,
        inventory_source: InventorySource::from_str(&row.get::<_, String>(32)?),
        risk_score: row.get(33)?,
        risk_level: RiskLevel::from_str(&row.get::<_, String>(34)?),
        drivers: split_drivers(&row.get::<_, String>(35)?),
        recommended_action: row.get(36)?,
        auto_override_ready: row.get(37)?,
    })
}
