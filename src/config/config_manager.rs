// ==========================================
// 供应链风险感知 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::scoring_policy::ScoringPolicy;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 读取评分策略
    ///
    /// 未配置时返回默认策略；配置 JSON 缺失的字段按默认值补齐。
    pub fn get_scoring_policy(&self) -> Result<ScoringPolicy, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::SCORING_POLICY)? {
            Some(v) => v,
            None => return Ok(ScoringPolicy::default()),
        };

        let policy: ScoringPolicy = serde_json::from_str(&raw)?;
        tracing::debug!(policy_version = %policy.policy_version, "评分策略已加载");
        Ok(policy)
    }

    /// 保存评分策略（整体覆盖）
    pub fn save_scoring_policy(&self, policy: &ScoringPolicy) -> Result<(), Box<dyn Error>> {
        let raw = serde_json::to_string(policy)?;
        self.set_config_value(config_keys::SCORING_POLICY, &raw)
    }

    /// 获取所有 global 配置的快照（JSON格式，按 key 排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 评分策略 (JSON)
    pub const SCORING_POLICY: &str = "scoring_policy";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn create_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_missing_policy_falls_back_to_default() {
        let manager = create_manager();
        let policy = manager.get_scoring_policy().unwrap();
        assert_eq!(policy, ScoringPolicy::default());
    }

    #[test]
    fn test_save_and_reload_policy() {
        let manager = create_manager();
        let mut policy = ScoringPolicy::default();
        policy.policy_version = "v2".to_string();
        policy.high_threshold = 14;

        manager.save_scoring_policy(&policy).unwrap();
        let loaded = manager.get_scoring_policy().unwrap();
        assert_eq!(loaded, policy);
    }

    #[test]
    fn test_partial_policy_json_is_completed_with_defaults() {
        let manager = create_manager();
        manager
            .set_config_value(config_keys::SCORING_POLICY, r#"{"policy_version":"v1-eu"}"#)
            .unwrap();

        let policy = manager.get_scoring_policy().unwrap();
        assert_eq!(policy.policy_version, "v1-eu");
        assert_eq!(policy.high_threshold, 12);
        assert_eq!(policy.criticality_a_weight, 4);
    }

    #[test]
    fn test_set_value_overwrites_and_snapshot_is_sorted() {
        let manager = create_manager();
        manager.set_config_value("zeta", "1").unwrap();
        manager.set_config_value("alpha", "2").unwrap();
        manager.set_config_value("zeta", "3").unwrap();

        assert_eq!(manager.get_config_value("zeta").unwrap().as_deref(), Some("3"));
        assert_eq!(manager.get_config_value("missing").unwrap(), None);

        let snapshot = manager.get_config_snapshot().unwrap();
        assert_eq!(snapshot, r#"{"alpha":"2","zeta":"3"}"#);
    }
}
