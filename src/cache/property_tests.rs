//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the gateway's observable contract.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::{CacheCounters, CacheGateway, CacheService, CacheStats, MemoryCache};
use crate::runtime::CacheFlag;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 1000;

// == Strategies ==
/// Generates email-like cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_.]{1,32}@[a-z]{1,12}\\.(com|org|edu)".prop_map(|s| s)
}

/// Generates opaque cache values
fn valid_value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..512)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Vec<u8> },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn gateway(enabled: bool) -> (CacheGateway, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new(TEST_MAX_ENTRIES));
    let gateway = CacheGateway::new(
        cache.clone(),
        Arc::new(CacheFlag::fixed(enabled)),
        Arc::new(CacheCounters::new()),
    );
    (gateway, cache)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a value and reading it back returns the same bytes.
    #[test]
    fn prop_set_then_get(key in valid_key_strategy(), value in valid_value_strategy()) {
        let (gateway, _) = gateway(true);

        prop_assert!(gateway.set(&key, value.clone()));

        prop_assert_eq!(gateway.get(&key), Some(value));
    }

    // A disabled gateway returns nothing and moves no counter, whatever was stored.
    #[test]
    fn prop_disabled_is_inert(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let (gateway, cache) = gateway(false);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => prop_assert!(!gateway.set(&key, value)),
                CacheOp::Get { key } => prop_assert_eq!(gateway.get(&key), None),
                CacheOp::Delete { key } => gateway.delete(&key),
            }
        }

        prop_assert_eq!(gateway.stats(), CacheStats::default());
        prop_assert!(cache.is_empty());
    }

    // Counters match exactly the traffic performed.
    #[test]
    fn prop_counter_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let (gateway, _) = gateway(true);
        let mut expected = CacheStats::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    gateway.set(&key, value);
                    expected.puts += 1;
                }
                CacheOp::Get { key } => {
                    match gateway.get(&key) {
                        Some(_) => expected.hits += 1,
                        None => expected.misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    gateway.delete(&key);
                    expected.deletes += 1;
                }
            }
        }

        prop_assert_eq!(gateway.stats(), expected);
    }

    // N reads of a present key are N hits; N reads of an absent key are N misses.
    #[test]
    fn prop_hit_miss_counts(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        n in 1u64..30,
    ) {
        let (gateway, _) = gateway(true);
        gateway.set(&key, value);

        for _ in 0..n {
            prop_assert!(gateway.get(&key).is_some());
        }
        prop_assert_eq!(gateway.stats().hits, n);
        prop_assert_eq!(gateway.stats().misses, 0);

        gateway.delete(&key);
        for _ in 0..n {
            prop_assert!(gateway.get(&key).is_none());
        }
        prop_assert_eq!(gateway.stats().hits, n);
        prop_assert_eq!(gateway.stats().misses, n);
    }

    // A later write for the same key replaces the earlier one.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        first in valid_value_strategy(),
        second in valid_value_strategy(),
    ) {
        let (gateway, cache) = gateway(true);

        gateway.set(&key, first);
        gateway.set(&key, second.clone());

        prop_assert_eq!(cache.get(&key).unwrap(), Some(second));
        prop_assert_eq!(cache.len(), 1);
    }
}
