// ==========================================
// 供应链风险感知 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 运行结果落库 (recommendation / risk_rollup)
// 约束: 所有查询使用参数化
// ==========================================

pub mod error;
pub mod recommendation_repo;
pub mod rollup_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use recommendation_repo::RecommendationRepository;
pub use rollup_repo::RollupRepository;
