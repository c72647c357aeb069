use super::accumulator::GroupAccumulator;
use crate::domain::recommendation::RecommendationRow;
use crate::domain::rollup::{RollupKey, RollupRow};
use std::collections::HashMap;
use tracing::{info, instrument};

// ==========================================
// RollupEngine - 风险汇总引擎
// ==========================================
pub struct RollupEngine {
    // 无状态引擎,累加器在每次调用内创建并丢弃
}

impl Default for RollupEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RollupEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 按 (event, site, material) 汇总
    ///
    /// # 返回
    /// 每个分组一行,顺序为分组首次出现的顺序
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn rollup(&self, rows: &[RecommendationRow]) -> Vec<RollupRow> {
        let groups = self.accumulate(rows);
        let rollups: Vec<RollupRow> = groups.into_iter().map(GroupAccumulator::finish).collect();

        info!(groups = rollups.len(), "rollup finished");
        rollups
    }

    /// 累加阶段（返回保序的分组累加器,便于检查中间状态）
    pub fn accumulate(&self, rows: &[RecommendationRow]) -> Vec<GroupAccumulator> {
        let mut slots: HashMap<RollupKey, usize> = HashMap::new();
        let mut groups: Vec<GroupAccumulator> = Vec::new();

        for row in rows {
            let key = row.rollup_key();
            match slots.get(&key) {
                Some(&slot) => groups[slot].merge(row),
                None => {
                    slots.insert(key, groups.len());
                    groups.push(GroupAccumulator::open(row));
                }
            }
        }

        groups
    }
}
