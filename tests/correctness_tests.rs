//! Correctness Tests for Bounded Caches
//!
//! This module validates the eviction semantics of each cache through its
//! public API, using small sizes and deterministic access patterns. Every
//! test states which keys must be gone and which must survive after the
//! operation that triggers an eviction.
//!
//! ## Test Strategy
//! - Small caches (4-12 entries) for predictable behavior
//! - Explicit reachability checks after each evicting operation
//! - `peek`/`contains_key` for verification, since `get` may promote

use gencache::config::{
    ClockMapConfig, EvictionOrder, FastHashMapConfig, GenerationalCacheConfig, LruHashMapConfig,
};
use gencache::metrics::CacheMetrics;
use gencache::{ClockMap, ConfigError, FastHashMap, LruFastHashMap, LruHashMap, LruList};
use std::num::NonZeroUsize;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

/// Helper to create a generational cache with the default three generations
fn make_generational<K: std::hash::Hash + Eq + Clone, V: Clone>(
    capacity: usize,
) -> LruFastHashMap<K, V> {
    LruFastHashMap::init(GenerationalCacheConfig::new(nz(capacity)), None)
}

/// Helper to create a size-capped map with the given eviction order
fn make_lru_map<K: std::hash::Hash + Eq + Clone, V>(
    max_size: usize,
    order: EvictionOrder,
) -> LruHashMap<K, V> {
    LruHashMap::init(
        LruHashMapConfig {
            max_size: nz(max_size),
            order,
        },
        None,
    )
}

/// Fills a 12-entry generational cache with 1..=12
fn filled_generational() -> LruFastHashMap<u32, u32> {
    let mut cache = make_generational(12);
    for i in 1..=12 {
        cache.put(i, i);
    }
    cache
}

fn put_pairs(cache: &mut LruFastHashMap<String, String>, pairs: &[&str]) {
    for key in pairs {
        cache.put(key.to_string(), format!("v{}", &key[1..]));
    }
}

// ============================================================================
// GENERATIONAL CACHE
// ============================================================================

#[test]
fn test_generational_all_in() {
    let cache = filled_generational();
    assert_eq!(cache.len(), 12);
    for i in 1..=12 {
        assert!(cache.contains_key(&i), "{} should be cached", i);
    }
}

#[test]
fn test_generational_read_oldest_drops_its_generation() {
    let mut cache = filled_generational();
    assert_eq!(cache.get(&1), Some(&1));
    assert_eq!(cache.len(), 9);

    for i in 2..=4 {
        assert_eq!(cache.peek(&i), None, "{} should be evicted", i);
    }
    assert!(cache.contains_key(&1));
    for i in 5..=12 {
        assert!(cache.contains_key(&i), "{} should be cached", i);
    }
}

#[test]
fn test_generational_insert_pushes_out_oldest() {
    let mut cache = filled_generational();
    cache.put(13, 13);

    for i in 1..=4 {
        assert!(!cache.contains_key(&i), "{} should be evicted", i);
    }
    for i in 5..=13 {
        assert!(cache.contains_key(&i), "{} should be cached", i);
    }
}

#[test]
fn test_generational_middle_read_protects_only_that_copy() {
    let mut cache = filled_generational();
    cache.get(&6);

    // Rotate twice more: the generation holding 5..8 ages out
    for i in 13..=20 {
        cache.put(i, i);
    }
    assert!(cache.contains_key(&6));
    for i in [5, 7, 8] {
        assert!(!cache.contains_key(&i), "{} should be evicted", i);
    }
}

#[test]
fn test_generational_pairs_bulk_drop() {
    let mut cache = make_generational(6);
    put_pairs(&mut cache, &["k11", "k12", "k21", "k22", "k31", "k32"]);
    put_pairs(&mut cache, &["k41", "k42"]);

    assert_eq!(cache.peek("k11"), None);
    assert_eq!(cache.peek("k12"), None);
    for key in ["k21", "k22", "k31", "k32", "k41", "k42"] {
        assert_eq!(cache.peek(key), Some(&format!("v{}", &key[1..])));
    }
    assert_eq!(cache.len(), 6);
}

#[test]
fn test_generational_pairs_promotion_rescue() {
    let mut cache = make_generational(6);
    put_pairs(&mut cache, &["k11", "k12", "k21", "k22", "k31", "k32"]);

    assert_eq!(cache.get("k11"), Some(&"v11".to_string()));
    assert_eq!(cache.get("k12"), None);

    put_pairs(&mut cache, &["k41", "k42"]);
    assert!(cache.contains_key("k11"));
    assert!(!cache.contains_key("k21"));
    assert!(!cache.contains_key("k22"));
    for key in ["k31", "k32", "k41", "k42"] {
        assert!(cache.contains_key(key), "{} should be cached", key);
    }
}

#[test]
fn test_generational_hot_key_never_evicted() {
    let mut cache = make_generational(30);
    cache.put(0, 0);
    for i in 1..1_000 {
        cache.put(i, i);
        assert_eq!(cache.get(&0), Some(&0), "hot key lost after {}", i);
    }
    assert!(cache.len() <= 30 + 1);
}

#[test]
fn test_generational_custom_generations() {
    let config = GenerationalCacheConfig {
        capacity: nz(20),
        generations: nz(4),
    };
    let mut cache: LruFastHashMap<u32, u32> = LruFastHashMap::init(config, None);
    assert_eq!(cache.generation_size(), 5);

    for i in 0..20 {
        cache.put(i, i);
    }
    assert_eq!(cache.len(), 20);
    cache.put(20, 20);
    for i in 0..5 {
        assert!(!cache.contains_key(&i));
    }
    assert_eq!(cache.len(), 16);
}

#[test]
fn test_generational_invalid_configs() {
    let config = GenerationalCacheConfig {
        capacity: nz(10),
        generations: nz(1),
    };
    assert_eq!(
        LruFastHashMap::<u32, u32>::try_init(config, None).unwrap_err(),
        ConfigError::InvalidGenerations(1)
    );
}

// ============================================================================
// SIZE-CAPPED MAP
// ============================================================================

/// Runs the overwrite/remove sequence shared by both eviction orders.
fn overwrite_remove_sequence(order: EvictionOrder) -> LruHashMap<u32, &'static str> {
    let mut map = make_lru_map(5, order);
    for i in 1..=5 {
        map.put(i, "a");
    }
    map.put(1, "b");
    assert_eq!(map.len(), 5);
    assert_eq!(map.remove(&5), Some("a"));
    assert_eq!(map.len(), 4);
    map.put(1, "c");
    assert_eq!(map.len(), 4);
    map.put(6, "a");
    assert_eq!(map.len(), 5);
    map.put(7, "a");
    assert_eq!(map.len(), 5);
    map
}

#[test]
fn test_lru_map_insertion_order_sequence() {
    let map = overwrite_remove_sequence(EvictionOrder::Insertion);
    // Overwrites keep the original age of key 1
    assert!(!map.contains_key(&1));
    assert!(map.contains_key(&2));
    assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [2, 3, 4, 6, 7]);
}

#[test]
fn test_lru_map_access_order_sequence() {
    let map = overwrite_remove_sequence(EvictionOrder::Access);
    assert!(!map.contains_key(&2));
    assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [3, 4, 1, 6, 7]);
    assert_eq!(map.iter().find(|(k, _)| **k == 1).map(|(_, v)| *v), Some("c"));
}

#[test]
fn test_lru_map_access_order_get_refreshes() {
    let mut map = make_lru_map(3, EvictionOrder::Access);
    map.put("a", 1);
    map.put("b", 2);
    map.put("c", 3);
    map.get(&"a");
    map.put("d", 4);
    assert!(map.contains_key(&"a"));
    assert!(!map.contains_key(&"b"));
}

#[test]
fn test_lru_map_insertion_order_get_does_not_refresh() {
    let mut map = make_lru_map(3, EvictionOrder::Insertion);
    map.put("a", 1);
    map.put("b", 2);
    map.put("c", 3);
    map.get(&"a");
    map.put("d", 4);
    assert!(!map.contains_key(&"a"));
    assert!(map.contains_key(&"b"));
}

// ============================================================================
// SIZE-CAPPED LIST
// ============================================================================

#[test]
fn test_lru_list_drops_front() {
    let mut list = LruList::new(nz(3));
    assert_eq!(list.add(1), None);
    assert_eq!(list.add(2), None);
    assert_eq!(list.add(3), None);
    assert_eq!(list.add(4), Some(1));
    assert_eq!(list.len(), 3);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
}

#[test]
fn test_lru_list_get_refreshes() {
    let mut list = LruList::new(nz(3));
    list.add("a");
    list.add("b");
    list.add("c");
    assert_eq!(list.get(0), Some(&"a"));
    assert_eq!(list.add("d"), Some("b"));
    assert_eq!(list.peek(0), Some(&"c"));
    assert_eq!(list.remove(1), Some("a"));
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["c", "d"]);
}

// ============================================================================
// OPEN-ADDRESSING MAP
// ============================================================================

/// Key whose hash is chosen by the test, so any number of keys can collide.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CollidingKey {
    hash: u64,
    id: u32,
}

impl std::hash::Hash for CollidingKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

fn colliding(id: u32) -> CollidingKey {
    CollidingKey { hash: 7, id }
}

#[test]
fn test_fast_map_colliding_keys() {
    let mut map = FastHashMap::new();
    for id in 0..20 {
        assert_eq!(map.put(colliding(id), id), None);
    }
    assert_eq!(map.len(), 20);

    for id in (0..20).step_by(2) {
        assert_eq!(map.remove(&colliding(id)), Some(id));
    }
    assert_eq!(map.len(), 10);
    for id in 0..20 {
        let expected = if id % 2 == 0 { None } else { Some(&id) };
        assert_eq!(map.get(&colliding(id)), expected);
    }

    for id in (0..20).step_by(2) {
        assert_eq!(map.put(colliding(id), id * 10), None);
    }
    assert_eq!(map.len(), 20);
    for id in (0..20).step_by(2) {
        assert_eq!(map.get(&colliding(id)), Some(&(id * 10)));
    }
}

#[test]
fn test_fast_map_grows_past_initial_capacity() {
    let config = FastHashMapConfig {
        initial_capacity: nz(4),
        load_factor: 0.5,
    };
    let mut map = FastHashMap::init(config, None);
    let initial = map.slot_capacity();
    for i in 0..152u32 {
        map.put(i, i.to_string());
    }
    assert_eq!(map.len(), 152);
    assert!(map.slot_capacity() > initial);
    for i in 0..152u32 {
        assert_eq!(map.get(&i), Some(&i.to_string()));
    }
}

#[test]
fn test_fast_map_churn_keeps_len_exact() {
    let mut map = FastHashMap::new();
    for round in 0..50u32 {
        for i in 0..10 {
            map.put(round * 10 + i, i);
        }
        for i in 0..10 {
            assert_eq!(map.remove(&(round * 10 + i)), Some(i));
        }
        assert!(map.is_empty());
    }
    // Tombstones from the churn must not have grown the table without bound
    assert!(map.slot_capacity() <= 64);
}

// ============================================================================
// CLOCK MAP
// ============================================================================

#[test]
fn test_clock_map_bound_and_reads() {
    let mut map = ClockMap::init(ClockMapConfig { max_size: nz(8) }, None);
    for i in 0..100u32 {
        map.put(i, i * 2);
        assert!(map.len() <= 8);
    }
    assert_eq!(map.len(), 8);
    for (k, v) in map.iter() {
        assert_eq!(*v, k * 2);
    }
}

#[test]
fn test_clock_map_evicts_one_per_overflow() {
    let mut map = ClockMap::new(nz(4));
    for i in 0..200u32 {
        map.put(i, i);
        map.get(&(i / 2));
    }
    assert_eq!(map.len(), 4);

    let metrics = map.metrics();
    assert_eq!(metrics.get("insertions"), Some(&200.0));
    assert_eq!(metrics.get("evictions"), Some(&196.0));
    assert!(metrics["hand_steps"] >= 196.0);
}

#[test]
fn test_clock_map_too_small() {
    let result: Result<ClockMap<u32, u32>, _> =
        ClockMap::try_init(ClockMapConfig { max_size: nz(3) }, None);
    assert!(matches!(
        result,
        Err(ConfigError::CapacityTooSmall { capacity: 3, .. })
    ));
}
