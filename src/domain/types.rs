// ==========================================
// 供应链风险感知 - 领域类型定义
// ==========================================
// 风险等级由评分阈值映射得到,阈值见 ScoringPolicy
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
// 顺序: Low < Medium < High
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库/导出一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,    // 仅供参考
    Medium, // 准备预案
    High,   // 立即评审
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

impl RiskLevel {
    /// 从字符串解析（未知值视为 LOW）
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => RiskLevel::High,
            "MEDIUM" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

// ==========================================
// 行标识拼接
// ==========================================

/// 标识分隔符
pub const ID_SEPARATOR: char = '-';
const ID_ESCAPE: char = '\\';

/// 拼接行标识: `{prefix}-{part}-{part}...`
///
/// 各段内的 `-` 与 `\` 以 `\` 转义, 不同键组合不会得到相同标识；
/// 不含这两个字符的键与直接拼接结果一致。
pub fn compose_id(prefix: &str, parts: &[&str]) -> String {
    let mut id = String::from(prefix);
    for part in parts {
        id.push(ID_SEPARATOR);
        for ch in part.chars() {
            if ch == ID_SEPARATOR || ch == ID_ESCAPE {
                id.push(ID_ESCAPE);
            }
            id.push(ch);
        }
    }
    id
}
