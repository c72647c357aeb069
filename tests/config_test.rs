// ==========================================
// 配置管理集成测试
// ==========================================
// 测试目标: 评分策略在数据库文件中的持久化与跨实例读取
// ==========================================

mod helpers;

use helpers::fixture_files::create_test_db;
use supply_sensing::config::{config_keys, ConfigManager, ScoringPolicy};

#[test]
fn test_policy_survives_reopen() {
    let (db_file, conn) = create_test_db().unwrap();
    let db_path = db_file.path().to_string_lossy().into_owned();

    let policy = ScoringPolicy {
        policy_version: "v3".to_string(),
        long_lead_days: 21.0,
        demand_high_units: 2000.0,
        ..ScoringPolicy::default()
    };
    ConfigManager::from_connection(conn)
        .unwrap()
        .save_scoring_policy(&policy)
        .unwrap();

    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_scoring_policy().unwrap(), policy);

    let snapshot = reopened.get_config_snapshot().unwrap();
    assert!(snapshot.contains(config_keys::SCORING_POLICY));
    assert!(snapshot.contains("v3"));
}

#[test]
fn test_malformed_policy_is_error() {
    let (_db_file, conn) = create_test_db().unwrap();
    let manager = ConfigManager::from_connection(conn).unwrap();
    manager
        .set_config_value(config_keys::SCORING_POLICY, "not json")
        .unwrap();

    assert!(manager.get_scoring_policy().is_err());
}
