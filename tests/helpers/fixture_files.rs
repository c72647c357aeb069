// ==========================================
// 测试文件夹具: 临时表文件目录 / 临时数据库
// ==========================================

use rusqlite::Connection;
use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};
use supply_sensing::db::{ensure_schema, open_sqlite_connection};
use tempfile::{NamedTempFile, TempDir};

/// 写入一张 CSV 表（首行为表头）
pub fn write_table(dir: &Path, file_name: &str, lines: &[&str]) {
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(dir.join(file_name), content).unwrap();
}

/// 创建包含六张表的输入目录（单链路场景, 两个市场各一条库存记录）
pub fn create_snapshot_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();

    write_table(
        path,
        "events.csv",
        &[
            "event_id,timestamp,event_type,headline,source_url,country,region,city,severity",
            "E1,2026-01-20T08:00:00Z,FLOOD,\"Flooding, Rhine closed\",https://news.example/e1,DE,EU,Cologne,4",
            "E2,2026-01-20T09:00:00Z,STRIKE,Port strike,https://news.example/e2,BR,LATAM,Santos,2",
        ],
    );
    write_table(
        path,
        "sites.csv",
        &[
            "site_id,region,country,supplier_name,site_name",
            "S1,EU,DE,Acme,Acme Cologne",
            "S2,APAC,CN,Beta,Beta Shenzhen",
        ],
    );
    write_table(
        path,
        "deps.csv",
        &[
            "site_id,material_id,material_name,criticality,single_source",
            "S1,M1,Resin,A,y",
            "S2,M2,Chip,B,N",
        ],
    );
    write_table(
        path,
        "products.csv",
        &[
            "material_id,product_id,product_name,product_family",
            "M1,P1,Widget,Widgets",
            "M2,P2,Gadget,Gadgets",
        ],
    );
    write_table(
        path,
        "exposure.csv",
        &[
            "product_id,market,avg_weekly_demand,priority_tier",
            "P1,US,1200,1",
            "P1,EU,300,3",
        ],
    );
    write_table(
        path,
        "inventory.csv",
        &[
            "product_id,material_id,market,on_hand_days,in_transit_days,safety_stock_days,lead_time_days,next_po_eta",
            "P1,,EU,10,2,7,35,20",
        ],
    );

    dir
}

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - Arc<Mutex<Connection>>: 共享连接
pub fn create_test_db() -> Result<(NamedTempFile, Arc<Mutex<Connection>>), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().into_owned();

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;

    Ok((temp_file, Arc::new(Mutex::new(conn))))
}
