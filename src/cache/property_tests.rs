//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify store behavior over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, sleep};
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const LONG_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,32}"
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations on live entries, the store agrees with a
    // plain map model and the statistics count every lookup.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let store = CacheStore::new();
        let mut model: HashMap<String, String> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key.clone(), value.clone(), LONG_TTL);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                    if got.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // For any key and value, a put followed immediately by a get returns the value.
    #[test]
    fn prop_put_then_get(key in key_strategy(), value in value_strategy(), ttl_secs in 1u64..100_000) {
        let store = CacheStore::new();

        store.put(key.clone(), value.clone(), Duration::from_secs(ttl_secs));

        prop_assert_eq!(store.get(&key), Some(value.clone()));
        let (with_expire, _) = store.get_with_expire(&key).unwrap();
        prop_assert_eq!(with_expire, value);
    }

    // Storing V1 then V2 under one key leaves exactly one entry holding V2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let store = CacheStore::new();

        store.put(key.clone(), value1, LONG_TTL);
        store.put(key.clone(), value2.clone(), LONG_TTL);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Once the TTL has elapsed, both read paths report absence and the entry
    // is physically gone.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let store = CacheStore::new();

        store.put(key.clone(), value.clone(), Duration::from_millis(20));
        prop_assert_eq!(store.get(&key), Some(value));

        sleep(Duration::from_millis(40));

        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.get_with_expire(&key), None);
        prop_assert!(store.is_empty());
    }

    // A sweep removes exactly the expired entries.
    #[test]
    fn prop_purge_removes_only_expired(
        short_keys in prop::collection::hash_set(key_strategy(), 0..20),
        long_keys in prop::collection::hash_set(key_strategy(), 0..20)
    ) {
        let store = CacheStore::new();
        let long_only: Vec<String> = long_keys.difference(&short_keys).cloned().collect();

        for key in &short_keys {
            store.put(key.clone(), (), Duration::from_millis(10));
        }
        for key in &long_only {
            store.put(key.clone(), (), LONG_TTL);
        }

        sleep(Duration::from_millis(30));

        prop_assert_eq!(store.purge_expired(), short_keys.len());
        prop_assert_eq!(store.len(), long_only.len());
        for key in &long_only {
            prop_assert!(store.get(key).is_some());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent writers on distinct keys never lose an update.
    #[test]
    fn prop_concurrent_distinct_keys(keys in prop::collection::hash_set(key_strategy(), 1..200)) {
        let store = Arc::new(CacheStore::new());
        let keys: Vec<String> = keys.into_iter().collect();

        let workers: Vec<_> = keys
            .chunks(keys.len().div_ceil(4))
            .map(|chunk| {
                let store = Arc::clone(&store);
                let chunk = chunk.to_vec();
                thread::spawn(move || {
                    for key in chunk {
                        store.put(key.clone(), key.len(), LONG_TTL);
                        store.get(&key);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        prop_assert_eq!(store.len(), keys.len());
        for key in &keys {
            prop_assert_eq!(store.get(key), Some(key.len()));
        }
    }
}
