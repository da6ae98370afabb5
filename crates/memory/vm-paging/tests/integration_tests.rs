//! vm-paging integration tests
//!
//! End-to-end verification of the translation engine:
//! - The reference demo scenario (TLB capacity 2, seven addresses)
//! - Counter invariants after every translation
//! - Read-only accessors never mutate state
//! - JSON serialization of outcome and metrics records

use vm_paging::{
    TranslationEngine, TranslationLevel, TranslationOutcome, PAGE_SIZE,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Reference address sequence from the demo driver
const DEMO_ADDRESSES: [u64; 7] = [0, 4096, 8192, 12288, 4096, 16384, 16384];

/// Assert the structural invariants that must hold after every translation
fn assert_invariants(engine: &TranslationEngine) {
    let stats = engine.stats();
    assert_eq!(stats.tlb_hits + stats.tlb_misses, stats.total_accesses);
    assert_eq!(
        stats.tlb_misses,
        stats.page_table_hits + stats.page_table_misses
    );
    assert!(engine.tlb().len() <= engine.tlb().capacity());
    // TLB 严格是页表子集
    for entry in engine.tlb().entries() {
        assert_eq!(engine.page_table().lookup(entry.page), Some(entry.frame));
    }
}

fn expect_outcome(
    outcome: &TranslationOutcome,
    level: TranslationLevel,
    page: u64,
    frame: u64,
    evicted_page: Option<u64>,
) {
    assert_eq!(outcome.level, level, "level for VA {}", outcome.virtual_address);
    assert_eq!(outcome.page, page);
    assert_eq!(outcome.frame, frame);
    assert_eq!(outcome.evicted_page, evicted_page);
    assert_eq!(
        outcome.physical_address,
        frame * PAGE_SIZE + outcome.offset
    );
}

// ============================================================================
// Reference Scenario
// ============================================================================

#[test]
fn test_reference_demo_scenario() {
    let mut engine = TranslationEngine::with_capacity(2).unwrap();
    let outcomes: Vec<_> = DEMO_ADDRESSES
        .iter()
        .map(|&va| {
            let outcome = engine.translate(va);
            assert_invariants(&engine);
            outcome
        })
        .collect();

    use TranslationLevel::*;
    expect_outcome(&outcomes[0], PageFault, 0, 4, None);
    expect_outcome(&outcomes[1], PageFault, 1, 5, None);
    expect_outcome(&outcomes[2], PageFault, 2, 6, Some(0));
    expect_outcome(&outcomes[3], PageFault, 3, 7, Some(1));
    expect_outcome(&outcomes[4], PageTableHit, 1, 5, Some(2));
    expect_outcome(&outcomes[5], PageFault, 4, 8, Some(3));
    expect_outcome(&outcomes[6], TlbHit, 4, 8, None);

    let stats = engine.stats();
    assert_eq!(stats.tlb_hits, 1);
    assert_eq!(stats.tlb_misses, 6);
    assert_eq!(stats.page_table_hits, 1);
    assert_eq!(stats.page_table_misses, 5);
    assert_eq!(stats.total_accesses, 7);

    // 页表保留全部五个映射，TLB 只剩最后两个
    assert_eq!(
        engine.page_table().sorted_entries(),
        vec![(0, 4), (1, 5), (2, 6), (3, 7), (4, 8)]
    );
    let tlb_pages: Vec<u64> = engine
        .tlb()
        .sorted_entries()
        .iter()
        .map(|entry| entry.page)
        .collect();
    assert_eq!(tlb_pages, vec![1, 4]);

    let report = engine.report();
    let expected_emat = (1.0 / 7.0) * 110.0 + (6.0 / 7.0) * 210.0;
    assert!((report.emat_ns - expected_emat).abs() < 1e-9);
}

// ============================================================================
// Physical Addresses
// ============================================================================

#[test]
fn test_physical_addresses_in_demo_scenario() {
    let mut engine = TranslationEngine::with_capacity(2).unwrap();
    let physical: Vec<u64> = DEMO_ADDRESSES
        .iter()
        .map(|&va| engine.translate(va).physical_address)
        .collect();
    assert_eq!(
        physical,
        vec![16384, 20480, 24576, 28672, 20480, 32768, 32768]
    );
}

// ============================================================================
// Read-Only Accessors
// ============================================================================

#[test]
fn test_display_operations_are_idempotent() {
    let mut engine = TranslationEngine::with_capacity(2).unwrap();
    for &va in &DEMO_ADDRESSES[..4] {
        engine.translate(va);
    }
    let stats_before = engine.stats();
    let table_before = engine.page_table().sorted_entries();
    let tlb_before = engine.tlb().sorted_entries();

    // 任意次只读操作不得改变任何状态
    for _ in 0..3 {
        let _ = engine.page_table().sorted_entries();
        let _ = engine.tlb().sorted_entries();
        let _ = engine.tlb().fifo_order().count();
        let _ = engine.tlb().lookup(0);
        let _ = engine.page_table().lookup(0);
        let _ = engine.report();
    }

    assert_eq!(engine.stats(), stats_before);
    assert_eq!(engine.page_table().sorted_entries(), table_before);
    assert_eq!(engine.tlb().sorted_entries(), tlb_before);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_outcome_and_report_serialize_to_json() {
    let mut engine = TranslationEngine::with_capacity(2).unwrap();
    let outcome = engine.translate(8192 + 5);

    let json = serde_json::to_value(outcome).unwrap();
    assert_eq!(json["virtual_address"], 8197);
    assert_eq!(json["page"], 2);
    assert_eq!(json["offset"], 5);
    assert_eq!(json["level"], "PageFault");

    let report = serde_json::to_value(engine.report()).unwrap();
    assert_eq!(report["stats"]["total_accesses"], 1);
    assert_eq!(report["tlb_miss_ratio"], 1.0);
}

// ============================================================================
// Fresh Engine
// ============================================================================

#[test]
fn test_empty_engine_reports_zero_metrics() {
    let engine = TranslationEngine::with_capacity(2).unwrap();
    let report = engine.report();
    assert_eq!(report.stats.total_accesses, 0);
    assert_eq!(report.emat_ns, 0.0);
    assert!(engine.page_table().is_empty());
    assert!(engine.tlb().is_empty());
}
