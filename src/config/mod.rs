// ==========================================
// 供应链风险感知 - 配置层
// ==========================================
// 职责: 评分策略与系统配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod scoring_policy;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use scoring_policy::{ScoringPolicy, DEFAULT_POLICY_VERSION};
