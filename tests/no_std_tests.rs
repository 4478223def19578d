#![no_std]
extern crate alloc;
extern crate gencache;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use gencache::config::{
    ClockMapConfig, EvictionOrder, FastHashMapConfig, GenerationalCacheConfig, LruHashMapConfig,
};
use gencache::{ClockMap, FastHashMap, LruFastHashMap, LruHashMap, LruList};

// Helper functions to create caches with the init pattern
fn make_fast_map<K: core::hash::Hash + Eq, V>(initial_capacity: usize) -> FastHashMap<K, V> {
    let config = FastHashMapConfig {
        initial_capacity: NonZeroUsize::new(initial_capacity).unwrap(),
        load_factor: 0.5,
    };
    FastHashMap::init(config, None)
}

fn make_lru_map<K: core::hash::Hash + Eq + Clone, V>(max_size: usize) -> LruHashMap<K, V> {
    let config = LruHashMapConfig {
        max_size: NonZeroUsize::new(max_size).unwrap(),
        order: EvictionOrder::Access,
    };
    LruHashMap::init(config, None)
}

fn make_generational<K: core::hash::Hash + Eq + Clone, V: Clone>(
    capacity: usize,
) -> LruFastHashMap<K, V> {
    let config = GenerationalCacheConfig::new(NonZeroUsize::new(capacity).unwrap());
    LruFastHashMap::init(config, None)
}

fn make_clock<K: core::hash::Hash + Eq, V>(max_size: usize) -> ClockMap<K, V> {
    let config = ClockMapConfig {
        max_size: NonZeroUsize::new(max_size).unwrap(),
    };
    ClockMap::init(config, None)
}

#[test]
fn test_fast_map_in_no_std() {
    let mut map = make_fast_map(2);

    // Using String as it requires the alloc crate
    for i in 0..50 {
        map.put(format!("key{i}"), i);
    }
    assert_eq!(map.len(), 50);
    assert_eq!(map.get("key7"), Some(&7));
    assert_eq!(map.remove("key7"), Some(7));
    assert!(!map.contains_key("key7"));
}

#[test]
fn test_lru_map_in_no_std() {
    let mut map = make_lru_map(2);

    let key1 = String::from("key1");
    let key2 = String::from("key2");
    let key3 = String::from("key3");

    map.put(key1.clone(), 1);
    map.put(key2.clone(), 2);

    // Touch key1 so key2 becomes the oldest
    assert_eq!(*map.get(&key1).unwrap(), 1);

    map.put(key3.clone(), 3);

    assert!(map.get(&key2).is_none());
    assert_eq!(*map.get(&key1).unwrap(), 1);
    assert_eq!(*map.get(&key3).unwrap(), 3);
}

#[test]
fn test_lru_list_in_no_std() {
    let mut list = LruList::new(NonZeroUsize::new(2).unwrap());
    list.add(String::from("a"));
    list.add(String::from("b"));
    assert_eq!(list.add(String::from("c")), Some(String::from("a")));
    assert_eq!(list.iter().cloned().collect::<Vec<_>>(), ["b", "c"]);
}

#[test]
fn test_generational_in_no_std() {
    let mut cache = make_generational(12);

    let keys: Vec<String> = (1..=13).map(|i| format!("key{i}")).collect();
    for (i, key) in keys.iter().enumerate().take(12) {
        cache.put(key.clone(), i);
    }

    // Read the oldest key to rescue it
    assert_eq!(*cache.get(&keys[0]).unwrap(), 0);
    cache.put(keys[12].clone(), 12);

    assert!(cache.contains_key(&keys[0]));
    for key in keys.iter().take(4).skip(1) {
        assert!(cache.peek(key).is_none());
    }
    assert_eq!(*cache.peek(&keys[12]).unwrap(), 12);
}

#[test]
fn test_clock_in_no_std() {
    let mut map = make_clock(4);
    for i in 0..10 {
        map.put(format!("key{i}"), i);
    }
    assert_eq!(map.len(), 4);

    map.clear();
    assert!(map.is_empty());
    assert!(map.get("key9").is_none());
}

#[test]
fn test_complex_types_in_no_std() {
    // Test with more complex types that require alloc
    let mut cache = make_generational(30);

    let key1 = Vec::<u8>::from([1, 2, 3]);
    let value1 = Vec::<i32>::from([10, 20, 30]);

    let key2 = Vec::<u8>::from([4, 5, 6]);
    let value2 = Vec::<i32>::from([40, 50, 60]);

    cache.put(key1.clone(), value1.clone());
    cache.put(key2.clone(), value2.clone());

    assert_eq!(*cache.get(&key1).unwrap(), value1);
    assert_eq!(*cache.get(&key2).unwrap(), value2);
}
