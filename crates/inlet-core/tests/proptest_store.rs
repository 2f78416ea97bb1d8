// crates/inlet-core/tests/proptest_store.rs
// ============================================================================
// Module: Process-Log Store Property-Based Tests
// Description: Property tests for store round trips and query invariants.
// Purpose: Detect ordering and filtering violations across wide input ranges.
// ============================================================================

//! Property-based tests for process-log store invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use inlet_core::BusinessId;
use inlet_core::InMemoryProcessLogStore;
use inlet_core::LogId;
use inlet_core::LogRecord;
use inlet_core::ProcessLogStore;
use inlet_core::Timestamp;
use proptest::prelude::*;
use serde_json::json;

fn record(log_id: String, business_id: String, timestamp: String) -> LogRecord {
    LogRecord::new(
        LogId::new(log_id),
        BusinessId::new(business_id),
        Timestamp::new(timestamp),
        json!({}),
    )
}

proptest! {
    #[test]
    fn store_then_get_round_trips(
        log_id in "[a-z0-9-]{1,24}",
        business_id in "[a-z0-9]{1,8}",
        timestamp in "[0-9T:Z-]{1,32}",
    ) {
        let store = InMemoryProcessLogStore::new();
        let stored = record(log_id.clone(), business_id, timestamp);
        store.store(stored.clone()).unwrap();
        let found = store.get(&LogId::new(log_id)).unwrap();
        prop_assert_eq!(found, Some(stored));
    }

    #[test]
    fn list_recent_is_filtered_sorted_and_bounded(
        timestamps in prop::collection::vec("[0-9TZ:-]{1,24}", 0 .. 24),
        other in prop::collection::vec("[0-9TZ:-]{1,24}", 0 .. 8),
        limit in 0i64 .. 16,
    ) {
        let store = InMemoryProcessLogStore::new();
        for (index, timestamp) in timestamps.iter().enumerate() {
            store
                .store(record(format!("match-{index}"), "b1".to_string(), timestamp.clone()))
                .unwrap();
        }
        for (index, timestamp) in other.iter().enumerate() {
            store
                .store(record(format!("other-{index}"), "b2".to_string(), timestamp.clone()))
                .unwrap();
        }
        let recent = store.list_recent(&BusinessId::new("b1"), limit).unwrap();
        let bound = usize::try_from(limit).unwrap();
        prop_assert!(recent.len() <= bound);
        prop_assert!(recent.iter().all(|record| record.business_id == BusinessId::new("b1")));
        for pair in recent.windows(2) {
            prop_assert!(pair[0].timestamp.as_str() >= pair[1].timestamp.as_str());
        }
    }

    #[test]
    fn overwrite_keeps_exactly_one_record(
        log_id in "[a-z0-9-]{1,24}",
        first in "[0-9TZ:-]{1,24}",
        second in "[0-9TZ:-]{1,24}",
    ) {
        let store = InMemoryProcessLogStore::new();
        store.store(record(log_id.clone(), "b1".to_string(), first)).unwrap();
        store.store(record(log_id.clone(), "b1".to_string(), second.clone())).unwrap();
        prop_assert_eq!(store.len().unwrap(), 1);
        let found = store.get(&LogId::new(log_id)).unwrap().unwrap();
        prop_assert_eq!(found.timestamp.as_str(), second.as_str());
    }
}
