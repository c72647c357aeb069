// ==========================================
// RollupEngine 集成测试
// ==========================================
// 测试目标: 展开结果 → (事件, 站点, 物料) 汇总
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use supply_sensing::domain::types::RiskLevel;
use supply_sensing::engine::{ExpansionEngine, RollupEngine};

#[test]
fn test_fan_out_collapses_to_single_group() {
    let rows = ExpansionEngine::new().expand("RUN-1", &fan_out_snapshot());
    let rollups = RollupEngine::new().rollup(&rows);

    assert_eq!(rollups.len(), 1);
    let r = &rollups[0];
    assert_eq!(r.rollup_id, "ROLL-E1-S1-M1");
    assert_eq!(r.run_id, "RUN-1");
    assert_eq!(r.impacted_products, "Product P1, Product P2");
    assert_eq!(r.impacted_markets, "US, EU, APAC");
}

#[test]
fn test_representative_is_highest_score_row() {
    let rows = ExpansionEngine::new().expand("RUN-1", &fan_out_snapshot());
    let r = &RollupEngine::new().rollup(&rows)[0];

    assert_eq!(r.risk_score, 14);
    assert_eq!(r.risk_level, RiskLevel::High);
    assert_eq!(r.recommended_action, "expedite + evaluate alternates now");
    assert!(r.drivers.starts_with("Severity 3 | Criticality B | Below safety by 4 days"));
}

#[test]
fn test_worst_inventory_is_lowest_coverage_row() {
    let rows = ExpansionEngine::new().expand("RUN-1", &fan_out_snapshot());
    let r = &RollupEngine::new().rollup(&rows)[0];

    // P2/APAC 无库存 → 覆盖 0
    assert_eq!(r.worst_coverage_days, 0.0);
    assert_eq!(r.worst_market, "APAC");
    assert_eq!(r.worst_product, "Product P2");
    assert_eq!(r.worst_safety_stock_days, 7.0);
    assert_eq!(r.worst_lead_time_days, 14.0);
    assert_eq!(r.worst_next_po_eta_days, None);
    assert!(!r.worst_time_to_impact);

    assert_eq!(r.best_priority_tier, 0.0);
    assert_eq!(r.max_weekly_demand, 600.0);
}

#[test]
fn test_single_row_group_mirrors_row() {
    let rows = ExpansionEngine::new().expand("RUN-1", &single_chain_snapshot());
    let rollups = RollupEngine::new().rollup(&rows);

    assert_eq!(rollups.len(), 1);
    let (row, r) = (&rows[0], &rollups[0]);
    assert_eq!(r.risk_score, row.risk_score);
    assert_eq!(r.drivers, row.drivers_text());
    assert_eq!(r.impacted_products, row.product_name);
    assert_eq!(r.impacted_markets, row.market);
    assert_eq!(r.worst_coverage_days, row.coverage_days);
    assert_eq!(r.best_priority_tier, row.priority_tier);
    assert_eq!(r.max_weekly_demand, row.avg_weekly_demand_units);
}

#[test]
fn test_groups_follow_first_appearance_order() {
    let mut snapshot = single_chain_snapshot();
    snapshot
        .events
        .push(EventBuilder::new("E0").region("EU").severity(1).build());
    snapshot
        .dependencies
        .push(DependencyBuilder::new("S1", "M2").criticality("C").build());
    snapshot.bom.push(bom("M2", "P1"));

    let rows = ExpansionEngine::new().expand("RUN-1", &snapshot);
    let ids: Vec<String> = RollupEngine::new()
        .rollup(&rows)
        .into_iter()
        .map(|r| r.rollup_id)
        .collect();

    assert_eq!(
        ids,
        vec![
            "ROLL-E1-S1-M1",
            "ROLL-E1-S1-M2",
            "ROLL-E0-S1-M1",
            "ROLL-E0-S1-M2",
        ]
    );
}

#[test]
fn test_empty_rows_give_empty_rollup() {
    assert!(RollupEngine::new().rollup(&[]).is_empty());
}
