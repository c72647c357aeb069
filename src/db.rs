// ==========================================
// 供应链风险感知 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 建表幂等 (CREATE TABLE IF NOT EXISTS)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    crate::perf::install_sqlite_tracing(&mut conn);
    Ok(conn)
}

/// 建表（幂等）
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS recommendation (
            run_id TEXT NOT NULL,
            rec_id TEXT NOT NULL,
            seq_no INTEGER NOT NULL,
            event_id TEXT NOT NULL,
            event_ts TEXT NOT NULL,
            event_type TEXT NOT NULL,
            headline TEXT NOT NULL,
            source_url TEXT NOT NULL,
            country TEXT NOT NULL,
            region TEXT NOT NULL,
            city TEXT NOT NULL,
            severity INTEGER NOT NULL,
            site_id TEXT NOT NULL,
            supplier_name TEXT NOT NULL,
            site_name TEXT NOT NULL,
            material_id TEXT NOT NULL,
            material_name TEXT NOT NULL,
            criticality TEXT NOT NULL,
            single_source_flag TEXT NOT NULL,
            product_id TEXT NOT NULL,
            product_name TEXT NOT NULL,
            product_family TEXT NOT NULL,
            market TEXT NOT NULL,
            avg_weekly_demand_units REAL NOT NULL,
            priority_tier REAL NOT NULL,
            on_hand_days REAL NOT NULL,
            in_transit_days REAL NOT NULL,
            coverage_days REAL NOT NULL,
            safety_stock_days REAL NOT NULL,
            lead_time_days REAL NOT NULL,
            next_po_eta_days REAL,
            time_to_impact_flag INTEGER NOT NULL,
            inventory_gap_days REAL NOT NULL,
            inventory_source TEXT NOT NULL,
            risk_score INTEGER NOT NULL,
            risk_level TEXT NOT NULL,
            drivers TEXT NOT NULL,
            recommended_action TEXT NOT NULL,
            auto_override_ready INTEGER NOT NULL DEFAULT 0 CHECK (auto_override_ready = 0),
            PRIMARY KEY (run_id, event_id, site_id, material_id, product_id, market),
            UNIQUE (run_id, rec_id)
        );

        CREATE TABLE IF NOT EXISTS risk_rollup (
            run_id TEXT NOT NULL,
            rollup_id TEXT NOT NULL,
            seq_no INTEGER NOT NULL,
            event_id TEXT NOT NULL,
            event_ts TEXT NOT NULL,
            event_type TEXT NOT NULL,
            headline TEXT NOT NULL,
            source_url TEXT NOT NULL,
            country TEXT NOT NULL,
            region TEXT NOT NULL,
            city TEXT NOT NULL,
            site_id TEXT NOT NULL,
            supplier_name TEXT NOT NULL,
            site_name TEXT NOT NULL,
            material_id TEXT NOT NULL,
            material_name TEXT NOT NULL,
            criticality TEXT NOT NULL,
            single_source_flag TEXT NOT NULL,
            risk_score INTEGER NOT NULL,
            risk_level TEXT NOT NULL,
            drivers TEXT NOT NULL,
            recommended_action TEXT NOT NULL,
            impacted_products TEXT NOT NULL,
            impacted_markets TEXT NOT NULL,
            worst_on_hand_days REAL NOT NULL,
            worst_in_transit_days REAL NOT NULL,
            worst_coverage_days REAL NOT NULL,
            worst_safety_stock_days REAL NOT NULL,
            worst_lead_time_days REAL NOT NULL,
            worst_next_po_eta_days REAL,
            worst_time_to_impact INTEGER NOT NULL,
            worst_market TEXT NOT NULL,
            worst_product TEXT NOT NULL,
            best_priority_tier REAL NOT NULL,
            max_weekly_demand REAL NOT NULL,
            PRIMARY KEY (run_id, event_id, site_id, material_id),
            UNIQUE (run_id, rollup_id)
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
